use std::collections::BTreeMap;

use super::text;

/// Sparse document vector as `(term index, weight)` pairs in ascending index order.
pub(crate) type SparseVector = Vec<(usize, f64)>;

/// Batch TF-IDF over unigrams and bigrams with smoothed IDF and L2-normalized rows.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TfIdfVectorizer {
    min_token_len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TfIdfMatrix {
    pub vocabulary_len: usize,
    pub rows: Vec<SparseVector>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self { min_token_len: 2 }
    }
}

impl TfIdfVectorizer {
    /// Returns `None` when no document contributes a single term.
    pub(crate) fn fit_transform(&self, documents: &[String]) -> Option<TfIdfMatrix> {
        let counts: Vec<BTreeMap<String, u32>> = documents
            .iter()
            .map(|document| self.term_counts(document))
            .collect();

        let mut document_frequency: BTreeMap<&str, u32> = BTreeMap::new();
        for terms in &counts {
            for term in terms.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return None;
        }

        let corpus_size = documents.len() as f64;
        let vocabulary: BTreeMap<&str, (usize, f64)> = document_frequency
            .iter()
            .enumerate()
            .map(|(index, (term, df))| {
                let idf = ((1.0 + corpus_size) / (1.0 + f64::from(*df))).ln() + 1.0;
                (*term, (index, idf))
            })
            .collect();

        let rows = counts
            .iter()
            .map(|terms| {
                let mut row: SparseVector = terms
                    .iter()
                    .filter_map(|(term, count)| {
                        vocabulary
                            .get(term.as_str())
                            .map(|(index, idf)| (*index, f64::from(*count) * idf))
                    })
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        Some(TfIdfMatrix {
            vocabulary_len: vocabulary.len(),
            rows,
        })
    }

    fn term_counts(&self, document: &str) -> BTreeMap<String, u32> {
        let normalized = text::normalize(document);
        let tokens = text::tokenize(&normalized, self.min_token_len);

        let mut counts = BTreeMap::new();
        for term in text::ngrams(&tokens) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }
}

fn l2_normalize(row: &mut SparseVector) {
    let norm = row.iter().map(|(_, weight)| weight * weight).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in row.iter_mut() {
            *weight /= norm;
        }
    }
}

/// Cosine similarity between two sparse vectors. Zero-norm inputs score exactly 0.
pub(crate) fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let magnitude_a = a.iter().map(|(_, x)| x * x).sum::<f64>().sqrt();
    let magnitude_b = b.iter().map(|(_, y)| y * y).sum::<f64>().sqrt();
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    let mut dot_product = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot_product += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn empty_vocabulary_yields_no_matrix() {
        let vectorizer = TfIdfVectorizer::default();
        assert!(vectorizer
            .fit_transform(&corpus(&["the and of", "!!! ???", ""]))
            .is_none());
    }

    #[test]
    fn rows_are_unit_length_or_empty() {
        let vectorizer = TfIdfVectorizer::default();
        let matrix = vectorizer
            .fit_transform(&corpus(&["rotate credentials weekly", "", "rotate keys"]))
            .expect("vocabulary present");

        assert_eq!(matrix.rows.len(), 3);
        assert!(matrix.rows[1].is_empty());
        for row in [&matrix.rows[0], &matrix.rows[2]] {
            let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn vocabulary_counts_unigrams_and_bigrams() {
        let vectorizer = TfIdfVectorizer::default();
        let matrix = vectorizer
            .fit_transform(&corpus(&["rotate credentials weekly"]))
            .expect("vocabulary present");
        // rotate, credentials, weekly, rotate credentials, credentials weekly
        assert_eq!(matrix.vocabulary_len, 5);
    }

    #[test]
    fn shared_terms_weigh_less_than_distinct_ones() {
        let vectorizer = TfIdfVectorizer::default();
        let matrix = vectorizer
            .fit_transform(&corpus(&["deploy pipeline", "deploy cache"]))
            .expect("vocabulary present");
        // sorted vocabulary: cache, deploy, deploy cache, deploy pipeline, pipeline
        let row = &matrix.rows[0];
        let shared = row.iter().find(|(index, _)| *index == 1).map(|(_, w)| *w);
        let distinct = row.iter().find(|(index, _)| *index == 4).map(|(_, w)| *w);
        assert!(shared.expect("deploy weight") < distinct.expect("pipeline weight"));
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let populated: SparseVector = vec![(0, 1.0)];
        assert_eq!(cosine(&populated, &Vec::new()), 0.0);
        assert_eq!(cosine(&Vec::new(), &Vec::new()), 0.0);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let vector: SparseVector = vec![(0, 0.6), (3, 0.8)];
        assert!((cosine(&vector, &vector) - 1.0).abs() < 1e-9);
    }
}
