use crate::infra::{parse_benefit_level, parse_category};
use clap::Args;
use ideaboard::error::AppError;
use ideaboard::ideas::{
    BenefitLevel, Category, EngineerRef, IdeaId, IdeaRecord, IdeaReviewService, IdeaStatus,
    IdeaSubmission, InMemoryIdeaRepository, ScoringConfig, ScoringEngine, SimilarityOptions,
};
use std::sync::Arc;

const DEMO_REVIEWER: &str = "sdm-demo";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Idea category: Innovation, Automation, or Security
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Category,
    /// Benefit level: Marginal, Moderate, High, Very High, or Gamechanger
    #[arg(long, value_parser = parse_benefit_level)]
    pub(crate) benefit: BenefitLevel,
    /// Score the idea as already implemented
    #[arg(long)]
    pub(crate) implemented: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Maximum number of similar ideas to list per query
    #[arg(long)]
    pub(crate) top_k: Option<usize>,
    /// Minimum cosine similarity (0.0-1.0) a match must exceed
    #[arg(long)]
    pub(crate) threshold: Option<f64>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let engine = ScoringEngine::new(ScoringConfig::standard());
    let record = IdeaRecord {
        id: IdeaId("cli".to_string()),
        title: String::new(),
        description: String::new(),
        category: args.category,
        benefit_level: args.benefit,
        implemented: args.implemented,
        status: IdeaStatus::Pending,
    };

    let breakdown = engine.score(&record);
    println!(
        "{} idea | benefit {} | implemented: {}",
        args.category.label(),
        args.benefit.label(),
        if args.implemented { "yes" } else { "no" }
    );
    for component in &breakdown.components {
        println!(
            "  - {:?}: {} ({})",
            component.factor, component.points, component.notes
        );
    }
    println!("Total: {} points", breakdown.total);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let defaults = SimilarityOptions::default();
    let options = SimilarityOptions {
        top_k: args.top_k.unwrap_or(defaults.top_k),
        threshold: args.threshold.unwrap_or(defaults.threshold),
    };

    let service = IdeaReviewService::new(
        Arc::new(InMemoryIdeaRepository::default()),
        ScoringConfig::standard(),
        options,
    );

    println!("Idea board demo");
    let mut submitted = Vec::new();
    for (engineer, submission) in demo_submissions() {
        let idea = service.submit(engineer, submission)?;
        println!(
            "- {} submitted {} [{}]: {}",
            idea.engineer.display_name,
            idea.id(),
            idea.record.category.label(),
            idea.record.title
        );
        submitted.push(idea);
    }

    println!("\nReview decisions by {DEMO_REVIEWER}");
    for idea in submitted.iter().take(3) {
        let outcome = service.approve(idea.id(), DEMO_REVIEWER)?;
        println!(
            "- approved {} -> {} points",
            outcome.idea_id, outcome.points_awarded
        );
    }
    if let Some(idea) = submitted.get(3) {
        service.reject(idea.id(), DEMO_REVIEWER, "duplicate of an approved idea")?;
        println!("- rejected {} (duplicate of an approved idea)", idea.id());
    }

    let pending = service.worklist(DEMO_REVIEWER)?;
    println!("\nStill awaiting review: {}", pending.len());

    if let Some(target) = pending.first() {
        let matches = service.similar(target.id())?;
        println!(
            "\nSimilar ideas to '{}' (top {}, threshold {:.2})",
            target.record.title, options.top_k, options.threshold
        );
        if matches.is_empty() {
            println!("  none above threshold");
        }
        for candidate in &matches {
            println!(
                "  - {:>6.2}% {} [{}] {}",
                candidate.score,
                candidate.idea_id,
                candidate.status.label(),
                candidate.title
            );
        }
        match serde_json::to_string_pretty(&serde_json::json!({ "similar_ideas": matches })) {
            Ok(json) => println!("  Similarity payload:\n{}", json),
            Err(err) => println!("  Similarity payload unavailable: {}", err),
        }
    }

    let board = service.leaderboard()?;
    println!("\nLeaderboard");
    for (rank, entry) in board.leaderboard.iter().enumerate() {
        println!(
            "  {}. {} - {} points across {} ideas",
            rank + 1,
            entry.display_name,
            entry.total_points,
            entry.total_ideas
        );
    }
    println!("Recent activity");
    for activity in &board.recent_activities {
        println!(
            "  - {} earned {} points ({}, submitted {})",
            activity.engineer_name, activity.points, activity.category, activity.submission_date
        );
    }

    Ok(())
}

fn demo_engineer(id: &str, name: &str) -> EngineerRef {
    EngineerRef {
        id: id.to_string(),
        display_name: name.to_string(),
    }
}

fn demo_submission(
    title: &str,
    category: Category,
    benefit_level: BenefitLevel,
    implemented: bool,
) -> IdeaSubmission {
    IdeaSubmission {
        title: title.to_string(),
        category: category.label().to_string(),
        service_area: "Platform".to_string(),
        benefit_level: benefit_level.label().to_string(),
        assigned_sdm_id: DEMO_REVIEWER.to_string(),
        implemented,
        ..IdeaSubmission::default()
    }
}

fn demo_submissions() -> Vec<(EngineerRef, IdeaSubmission)> {
    let priya = demo_engineer("eng-priya", "Priya");
    let marco = demo_engineer("eng-marco", "Marco");
    let jun = demo_engineer("eng-jun", "Jun");

    vec![
        (
            priya.clone(),
            IdeaSubmission {
                automation_opportunity: "manual deploys are slow and error prone".to_string(),
                automation_solution: "pipeline promotes builds after smoke tests".to_string(),
                ..demo_submission(
                    "Automate deployment pipeline",
                    Category::Automation,
                    BenefitLevel::High,
                    true,
                )
            },
        ),
        (
            marco.clone(),
            IdeaSubmission {
                security_gap: "service accounts use long-lived passwords".to_string(),
                possible_solution: "rotate credentials through the vault".to_string(),
                ..demo_submission(
                    "Rotate service account credentials",
                    Category::Security,
                    BenefitLevel::Gamechanger,
                    true,
                )
            },
        ),
        (
            jun.clone(),
            IdeaSubmission {
                innovative_idea: "preview environments for every pull request".to_string(),
                ..demo_submission(
                    "Per-branch preview environments",
                    Category::Innovation,
                    BenefitLevel::Moderate,
                    false,
                )
            },
        ),
        (
            marco,
            IdeaSubmission {
                automation_opportunity: "deploys wait on manual approval".to_string(),
                ..demo_submission(
                    "Automate deployment approvals",
                    Category::Automation,
                    BenefitLevel::Moderate,
                    false,
                )
            },
        ),
        (
            jun,
            IdeaSubmission {
                automation_opportunity: "manual deploys are slow".to_string(),
                automation_solution: "scripted deployment pipeline with smoke tests".to_string(),
                ..demo_submission(
                    "Deployment pipeline automation",
                    Category::Automation,
                    BenefitLevel::High,
                    false,
                )
            },
        ),
        (
            priya,
            IdeaSubmission {
                innovative_idea: "summarize incident timelines automatically".to_string(),
                ..demo_submission(
                    "Incident timeline digests",
                    Category::Innovation,
                    BenefitLevel::Marginal,
                    false,
                )
            },
        ),
    ]
}
