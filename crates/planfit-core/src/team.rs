//! Team profiles and capacity arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sizing::SizeMapping;

/// Points a team can deliver, derived from composition.
///
/// The product of engineer count, average points per engineer per sprint,
/// and sprints in the planning increment. Any negative or missing input is
/// treated as 0, so the result is always non-negative and the function is
/// total.
pub fn capacity(engineer_count: i64, avg_points_per_engineer: i64, sprints_in_increment: i64) -> i64 {
    engineer_count.max(0) * avg_points_per_engineer.max(0) * sprints_in_increment.max(0)
}

/// A team's composition and sizing calibration.
///
/// Owns its size mappings and (in storage) its epics; both are
/// cascade-deleted with the team. Created once via signup or demo seed and
/// mutated through the settings form or a saved scenario, never deleted in
/// the normal flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub engineer_count: i64,
    /// Average points one engineer delivers per sprint.
    pub avg_points_per_engineer: i64,
    pub sprint_length_weeks: i64,
    /// Sprints in one planning increment (e.g. 6 two-week sprints for a
    /// quarter).
    pub sprints_in_increment: i64,
    pub size_mappings: Vec<SizeMapping>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamProfile {
    /// Points the whole team delivers in one sprint.
    pub fn sprint_capacity(&self) -> i64 {
        self.engineer_count.max(0) * self.avg_points_per_engineer.max(0)
    }

    /// Points available across the full planning increment.
    pub fn increment_capacity(&self) -> i64 {
        capacity(
            self.engineer_count,
            self.avg_points_per_engineer,
            self.sprints_in_increment,
        )
    }

    /// Sprints that fit in a calendar quarter (~13 weeks). The sprint
    /// length acts as a divisor here, so it clamps to a minimum of 1.
    pub fn sprints_per_quarter(&self) -> f64 {
        13.0 / self.sprint_length_weeks.max(1) as f64
    }
}

/// Partial update for a stored team, `None` fields left untouched.
///
/// Also the shape a saved scenario emits: persisting a what-if is just an
/// update carrying the override values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub engineer_count: Option<i64>,
    pub avg_points_per_engineer: Option<i64>,
    pub sprint_length_weeks: Option<i64>,
    pub sprints_in_increment: Option<i64>,
}

impl TeamUpdate {
    /// True when no field is set; storage can skip the write.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.avatar.is_none()
            && self.engineer_count.is_none()
            && self.avg_points_per_engineer.is_none()
            && self.sprint_length_weeks.is_none()
            && self.sprints_in_increment.is_none()
    }
}
