//! What-if capacity scenarios.
//!
//! A scenario lets a user override the team-composition inputs and watch
//! the derived capacity move, without touching the stored profile. It
//! either gets discarded ([`Scenario::reset`]) or persisted by applying
//! the [`TeamUpdate`] it emits; only then do the stored values change.

use serde::{Deserialize, Serialize};

use crate::team::{capacity, TeamProfile, TeamUpdate};

/// The three inputs capacity derives from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityInputs {
    pub engineers: i64,
    pub points_per_engineer: i64,
    pub sprints_in_increment: i64,
}

impl CapacityInputs {
    pub fn from_team(team: &TeamProfile) -> Self {
        Self {
            engineers: team.engineer_count,
            points_per_engineer: team.avg_points_per_engineer,
            sprints_in_increment: team.sprints_in_increment,
        }
    }

    pub fn capacity(&self) -> i64 {
        capacity(self.engineers, self.points_per_engineer, self.sprints_in_increment)
    }
}

/// A non-persisted override of a team's capacity inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    base: CapacityInputs,
    current: CapacityInputs,
}

impl Scenario {
    /// Start a scenario from the stored profile; overrides begin equal to
    /// the stored values.
    pub fn from_team(team: &TeamProfile) -> Self {
        let base = CapacityInputs::from_team(team);
        Self { base, current: base }
    }

    /// Override the engineer count. Negative input clamps to 0.
    pub fn set_engineers(&mut self, engineers: i64) {
        self.current.engineers = engineers.max(0);
    }

    /// Override points per engineer per sprint. Negative input clamps to 0.
    pub fn set_points_per_engineer(&mut self, points: i64) {
        self.current.points_per_engineer = points.max(0);
    }

    /// Override sprints per increment. Negative input clamps to 0.
    pub fn set_sprints_in_increment(&mut self, sprints: i64) {
        self.current.sprints_in_increment = sprints.max(0);
    }

    /// The inputs as currently overridden.
    pub fn inputs(&self) -> CapacityInputs {
        self.current
    }

    /// Capacity under the current overrides.
    pub fn capacity(&self) -> i64 {
        self.current.capacity()
    }

    /// Capacity of the stored profile the scenario started from.
    pub fn base_capacity(&self) -> i64 {
        self.base.capacity()
    }

    /// Capacity gained (or lost, negative) versus the stored profile.
    pub fn delta(&self) -> i64 {
        self.capacity() - self.base_capacity()
    }

    /// Whether any override differs from the stored value.
    pub fn has_changes(&self) -> bool {
        self.current != self.base
    }

    /// Discard the overrides, reassigning them to the stored values.
    pub fn reset(&mut self) {
        self.current = self.base;
    }

    /// The update request that persists this scenario. Applying it through
    /// storage is what makes the overrides the new stored values.
    pub fn to_update(&self) -> TeamUpdate {
        TeamUpdate {
            engineer_count: Some(self.current.engineers),
            avg_points_per_engineer: Some(self.current.points_per_engineer),
            sprints_in_increment: Some(self.current.sprints_in_increment),
            ..Default::default()
        }
    }
}
