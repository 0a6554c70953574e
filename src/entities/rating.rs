use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::user::UserSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub ride: Option<String>,
    pub from: UserSummary,
    pub to: UserSummary,
    pub score: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /rating/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRatingRequest {
    pub ride: String,
    pub to: String,
    pub score: u8,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        if score >= 4 {
            ScoreBand::Good
        } else if score >= 3 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Good => "score score-good",
            ScoreBand::Fair => "score score-fair",
            ScoreBand::Poor => "score score-poor",
        }
    }
}

/// Admin-side filter: free text over both names and the comment, plus an exact score.
#[derive(Debug, Clone, Default)]
pub struct RatingFilter {
    pub search: String,
    pub score: Option<u8>,
}

impl RatingFilter {
    pub fn matches(&self, rating: &Rating) -> bool {
        let needle = self.search.to_lowercase();
        let text_hit = needle.is_empty()
            || rating.from.name.to_lowercase().contains(&needle)
            || rating.to.name.to_lowercase().contains(&needle)
            || rating.comment.to_lowercase().contains(&needle);

        text_hit && self.score.is_none_or(|s| rating.score == s)
    }

    pub fn apply<'a>(&self, ratings: &'a [Rating]) -> Vec<&'a Rating> {
        ratings.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub total: usize,
    pub average: f64,
    pub excellent: usize,
    pub poor: usize,
}

impl RatingStats {
    /// Computed over every rating, not the filtered view.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let total = ratings.len();
        let average = if total == 0 {
            0.0
        } else {
            ratings.iter().map(|r| r.score as f64).sum::<f64>() / total as f64
        };

        Self {
            total,
            average,
            excellent: ratings.iter().filter(|r| r.score >= 4).count(),
            poor: ratings.iter().filter(|r| r.score <= 2).count(),
        }
    }

    pub fn average_label(&self) -> String {
        format!("{:.1}", self.average)
    }
}
