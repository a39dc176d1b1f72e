use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// One ranked row, global or scoped to the active case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub detective_name: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub cases_count: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub rank: u32,
}

impl LeaderboardEntry {
    /// Rank from the payload, or the 1-based position when the server left it out.
    pub fn display_rank(&self, position: usize) -> u32 {
        if self.rank > 0 {
            self.rank
        } else {
            position as u32 + 1
        }
    }
}

/// A past submission on the profile page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub case_id: String,
    #[serde(default)]
    pub case_name: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
}

/// Statistics block on the profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    pub points: i64,
    pub rank: Option<usize>,
    pub cases: u32,
    pub accuracy_percent: u32,
}

impl ProfileStats {
    pub fn compute(user: &UserSummary, global: &[LeaderboardEntry]) -> Self {
        let rank = global
            .iter()
            .position(|entry| entry.user_id == user.id)
            .map(|idx| idx + 1);

        Self {
            points: user.total_points(),
            rank,
            cases: user.cases_count,
            accuracy_percent: percent(user.accuracy),
        }
    }

    pub fn points_text(&self) -> String {
        group_thousands(self.points)
    }

    pub fn rank_text(&self) -> String {
        match self.rank {
            Some(rank) => format!("# {}", rank),
            None => "Sin ranking".to_string(),
        }
    }

    pub fn accuracy_text(&self) -> String {
        format!("{}%", self.accuracy_percent)
    }
}

/// Fraction in `[0, 1]` to a rounded whole percentage.
pub fn percent(fraction: f64) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user_id: &str) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stats_find_rank() {
        let user = UserSummary {
            id: "u2".into(),
            points: 1250,
            cases_count: 3,
            accuracy: 0.847,
            ..Default::default()
        };
        let stats = ProfileStats::compute(&user, &[entry("u1"), entry("u2")]);

        assert_eq!(stats.rank, Some(2));
        assert_eq!(stats.rank_text(), "# 2");
        assert_eq!(stats.points_text(), "1,250");
        assert_eq!(stats.accuracy_text(), "85%");
    }

    #[test]
    fn test_stats_without_rank() {
        let user = UserSummary {
            id: "ghost".into(),
            ..Default::default()
        };
        let stats = ProfileStats::compute(&user, &[entry("u1")]);
        assert_eq!(stats.rank_text(), "Sin ranking");
        assert_eq!(stats.points_text(), "0");
    }

    #[test]
    fn test_display_rank_falls_back_to_position() {
        assert_eq!(entry("u1").display_rank(4), 5);
        let ranked = LeaderboardEntry {
            rank: 2,
            ..entry("u1")
        };
        assert_eq!(ranked.display_rank(4), 2);
    }
}
