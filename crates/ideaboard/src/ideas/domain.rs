use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted ideas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(pub String);

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Idea category. Values outside the known set deserialize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Innovation,
    Automation,
    Security,
    #[serde(other)]
    Unknown,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Innovation => "Innovation",
            Category::Automation => "Automation",
            Category::Security => "Security",
            Category::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Innovation" => Category::Innovation,
            "Automation" => Category::Automation,
            "Security" => Category::Security,
            _ => Category::Unknown,
        }
    }
}

/// Reviewer-facing estimate of how much an idea is worth once delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenefitLevel {
    Marginal,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Gamechanger,
    #[serde(other)]
    Unknown,
}

impl BenefitLevel {
    pub const ALL: [BenefitLevel; 5] = [
        BenefitLevel::Marginal,
        BenefitLevel::Moderate,
        BenefitLevel::High,
        BenefitLevel::VeryHigh,
        BenefitLevel::Gamechanger,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BenefitLevel::Marginal => "Marginal",
            BenefitLevel::Moderate => "Moderate",
            BenefitLevel::High => "High",
            BenefitLevel::VeryHigh => "Very High",
            BenefitLevel::Gamechanger => "Gamechanger",
            BenefitLevel::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Marginal" => BenefitLevel::Marginal,
            "Moderate" => BenefitLevel::Moderate,
            "High" => BenefitLevel::High,
            "Very High" => BenefitLevel::VeryHigh,
            "Gamechanger" => BenefitLevel::Gamechanger,
            _ => BenefitLevel::Unknown,
        }
    }
}

/// Review state. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaStatus {
    Pending,
    Approved,
    Rejected,
}

impl IdeaStatus {
    pub const fn label(self) -> &'static str {
        match self {
            IdeaStatus::Pending => "pending",
            IdeaStatus::Approved => "approved",
            IdeaStatus::Rejected => "rejected",
        }
    }
}

/// Immutable snapshot of an idea as consumed by scoring and similarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRecord {
    pub id: IdeaId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub benefit_level: BenefitLevel,
    #[serde(default)]
    pub implemented: bool,
    pub status: IdeaStatus,
}

/// Engineer credited for an idea on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineerRef {
    pub id: String,
    pub display_name: String,
}

/// Form payload for a new idea. The description is derived from the category-specific fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaSubmission {
    pub title: String,
    pub category: String,
    pub service_area: String,
    pub benefit_level: String,
    pub assigned_sdm_id: String,
    #[serde(default)]
    pub implemented: bool,
    #[serde(default)]
    pub security_gap: String,
    #[serde(default)]
    pub possible_solution: String,
    #[serde(default)]
    pub automation_opportunity: String,
    #[serde(default)]
    pub automation_solution: String,
    #[serde(default)]
    pub innovative_idea: String,
}

impl IdeaSubmission {
    /// Checks required fields and resolves the enumerated values.
    pub fn validate(&self) -> Result<(Category, BenefitLevel), SubmissionError> {
        let required = [
            ("title", &self.title),
            ("category", &self.category),
            ("service_area", &self.service_area),
            ("benefit_level", &self.benefit_level),
            ("assigned_sdm_id", &self.assigned_sdm_id),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(SubmissionError::MissingField(*field));
        }

        let category = Category::parse(&self.category);
        if category == Category::Unknown {
            return Err(SubmissionError::UnknownCategory(self.category.clone()));
        }

        let benefit_level = BenefitLevel::parse(&self.benefit_level);
        if benefit_level == BenefitLevel::Unknown {
            return Err(SubmissionError::UnknownBenefitLevel(
                self.benefit_level.clone(),
            ));
        }

        Ok((category, benefit_level))
    }

    /// Builds the free-text description shown to reviewers and fed to similarity checks.
    pub fn describe(&self, category: Category) -> String {
        match category {
            Category::Security => labelled_parts(&[
                ("Security Gap", &self.security_gap),
                ("Possible Solution", &self.possible_solution),
            ]),
            Category::Automation => labelled_parts(&[
                ("Automation Opportunity", &self.automation_opportunity),
                ("Automation Solution", &self.automation_solution),
            ]),
            Category::Innovation => self.innovative_idea.trim().to_string(),
            Category::Unknown => String::new(),
        }
    }
}

fn labelled_parts(parts: &[(&str, &String)]) -> String {
    parts
        .iter()
        .filter_map(|(label, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| format!("{label}: {value}"))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Validation failures raised while accepting a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("unknown benefit level '{0}'")]
    UnknownBenefitLevel(String),
}

/// Repository representation of an idea across its review lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredIdea {
    pub record: IdeaRecord,
    pub engineer: EngineerRef,
    pub assigned_sdm_id: String,
    pub service_area: String,
    pub points: Option<u32>,
    pub rejection_reason: Option<String>,
    pub submitted_on: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

impl StoredIdea {
    pub fn id(&self) -> &IdeaId {
        &self.record.id
    }

    pub fn status(&self) -> IdeaStatus {
        self.record.status
    }

    pub fn view(&self) -> IdeaView {
        IdeaView {
            id: self.record.id.clone(),
            title: self.record.title.clone(),
            description: self.record.description.clone(),
            category: self.record.category.label(),
            service_area: self.service_area.clone(),
            benefit_level: self.record.benefit_level.label(),
            implemented: self.record.implemented,
            status: self.record.status.label(),
            points: self.points.unwrap_or(0),
            engineer_name: self.engineer.display_name.clone(),
            assigned_sdm_id: self.assigned_sdm_id.clone(),
            rejection_reason: self.rejection_reason.clone(),
            submission_date: self.submitted_on,
        }
    }
}

/// Flattened idea representation returned by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeaView {
    pub id: IdeaId,
    pub title: String,
    pub description: String,
    pub category: &'static str,
    pub service_area: String,
    pub benefit_level: &'static str,
    pub implemented: bool,
    pub status: &'static str,
    pub points: u32,
    pub engineer_name: String,
    pub assigned_sdm_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub submission_date: NaiveDate,
}
