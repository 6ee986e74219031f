//! Gamification profile, levels and achievements.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::wire;

/// A level band of the points ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserLevel {
    /// Level number, starting at 1
    pub level: u32,
    /// Level name
    pub name: String,
    /// Level description
    pub description: Option<String>,
    /// Lower bound of the band
    pub min_points: i64,
    /// Upper bound of the band
    pub max_points: i64,
    /// Badge glyph
    pub badge: Option<String>,
    /// Badge color
    pub color: Option<String>,
}

impl Default for UserLevel {
    fn default() -> Self {
        Self {
            level: 1,
            name: "Novice".to_string(),
            description: None,
            min_points: 0,
            max_points: 100,
            badge: None,
            color: None,
        }
    }
}

impl UserLevel {
    /// Progress through this band for `points`, clamped to `[0, 100]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self, points: i64) -> f64 {
        let span = self.max_points - self.min_points;
        if span <= 0 {
            return 0.0;
        }
        let raw = (points - self.min_points) as f64 / span as f64 * 100.0;
        raw.clamp(0.0, 100.0)
    }
}

/// A user's gamification summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GamificationProfile {
    /// Owner id
    #[serde(deserialize_with = "wire::opt_id")]
    pub user_id: Option<String>,
    /// Total points
    pub total_points: i64,
    /// Current level number
    pub current_level: u32,
    /// Books marked as read
    pub books_read: u32,
    /// Completed exchanges
    pub exchanges_completed: u32,
    /// Posts written
    pub posts_created: u32,
    /// Comments written
    pub comments_created: u32,
    /// Communities joined
    pub communities_joined: u32,
    /// Communities created
    pub communities_created: u32,
    /// Reading clubs joined
    pub reading_clubs_joined: u32,
    /// Reading clubs created
    pub reading_clubs_created: u32,
    /// Last recorded activity
    #[serde(deserialize_with = "wire::timestamp")]
    pub last_activity: Option<NaiveDateTime>,
    /// Level band details
    pub user_level: Option<UserLevel>,
    /// Points missing to reach the next level
    pub points_to_next_level: i64,
}

/// An achievement definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    /// Achievement id
    #[serde(deserialize_with = "wire::opt_id")]
    pub id: Option<String>,
    /// Name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Icon glyph
    pub icon: Option<String>,
    /// Category
    pub category: Option<String>,
    /// Points granted when earned
    pub points_reward: i64,
}

/// An achievement earned by a user.
///
/// Accepts both `{id, achievementId, dateEarned, achievement: {..}}` and the
/// bare achievement object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    /// Record id
    pub id: Option<String>,
    /// Achievement id
    pub achievement_id: Option<String>,
    /// When it was earned
    pub date_earned: Option<NaiveDateTime>,
    /// The achievement itself
    pub achievement: Achievement,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NestedAchievement {
    #[serde(default, deserialize_with = "wire::opt_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    achievement_id: Option<String>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    date_earned: Option<NaiveDateTime>,
    achievement: Achievement,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AchievementShape {
    Nested(NestedAchievement),
    Bare(Achievement),
}

impl<'de> Deserialize<'de> for UserAchievement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match AchievementShape::deserialize(deserializer)? {
            AchievementShape::Nested(n) => Self {
                id: n.id,
                achievement_id: n.achievement_id.or_else(|| n.achievement.id.clone()),
                date_earned: n.date_earned,
                achievement: n.achievement,
            },
            AchievementShape::Bare(achievement) => Self {
                id: None,
                achievement_id: achievement.id.clone(),
                date_earned: None,
                achievement,
            },
        })
    }
}
