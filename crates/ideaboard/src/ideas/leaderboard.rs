use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{IdeaStatus, StoredIdea};

pub const LEADERBOARD_LIMIT: usize = 50;
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub engineer_id: String,
    pub display_name: String,
    pub total_points: u32,
    pub total_ideas: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    pub category: &'static str,
    pub submission_date: NaiveDate,
    pub points: u32,
    pub engineer_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub recent_activities: Vec<RecentActivity>,
}

impl Leaderboard {
    /// Ranks engineers by points earned from approved ideas.
    ///
    /// Only approved ideas with a positive award count. Ties keep the order in which each
    /// engineer first appears in `ideas`.
    pub fn build(ideas: &[StoredIdea]) -> Self {
        let scored: Vec<(&StoredIdea, u32)> = ideas
            .iter()
            .filter(|idea| idea.status() == IdeaStatus::Approved)
            .filter_map(|idea| idea.points.filter(|points| *points > 0).map(|p| (idea, p)))
            .collect();

        let mut entries: Vec<LeaderboardEntry> = Vec::new();
        for (idea, points) in &scored {
            match entries
                .iter_mut()
                .find(|entry| entry.engineer_id == idea.engineer.id)
            {
                Some(entry) => {
                    entry.total_points += points;
                    entry.total_ideas += 1;
                }
                None => entries.push(LeaderboardEntry {
                    engineer_id: idea.engineer.id.clone(),
                    display_name: idea.engineer.display_name.clone(),
                    total_points: *points,
                    total_ideas: 1,
                }),
            }
        }
        entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        entries.truncate(LEADERBOARD_LIMIT);

        let mut recent = scored;
        recent.sort_by(|(a, _), (b, _)| b.updated_at.cmp(&a.updated_at));
        let recent_activities = recent
            .into_iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(|(idea, points)| RecentActivity {
                category: idea.record.category.label(),
                submission_date: idea.submitted_on,
                points,
                engineer_name: idea.engineer.display_name.clone(),
            })
            .collect();

        Self {
            leaderboard: entries,
            recent_activities,
        }
    }
}
