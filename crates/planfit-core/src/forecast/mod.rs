//! Forecast allocation: the capacity cut line and multi-window planning.
//!
//! This module is the computational core of Planfit. Given a backlog in
//! priority order, a resolved size-to-points mapping, and the capacity
//! derived from team composition, it:
//! - walks the backlog keeping a running point total and classifies each
//!   epic as above or below the capacity line ([`allocate`])
//! - distributes the same ordered backlog across fixed-size planning
//!   windows, splitting an epic whose cost crosses a window boundary and
//!   carrying the remainder into the next window as rollover
//!   ([`allocate_windows`])
//!
//! Both allocators are pure, synchronous folds over in-memory lists: no
//! state, no I/O, cheap to discard and recompute whenever inputs change.
//! They never sort; callers must supply epics already ordered by priority.

mod reorder;

pub use reorder::reorder;

use serde::{Deserialize, Serialize};

use crate::epic::Epic;
use crate::sizing::PointMap;
use crate::team::{capacity, TeamProfile};

/// Inputs the allocators derive capacity and window layout from.
///
/// An explicit, passed-in configuration rather than ambient state: the
/// scenario simulator builds one of these with overrides and the settings
/// screen builds one from the stored team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    pub engineers: i64,
    pub points_per_engineer: i64,
    pub sprints_in_increment: i64,
    /// Number of planning windows to lay the backlog across.
    pub window_count: usize,
    /// Label of the first window, e.g. "Q3 2026". Successive windows
    /// advance the quarter when the label parses as one.
    pub start_label: String,
}

impl PlanConfig {
    /// Build a config from a stored team, with one window and no label.
    pub fn from_team(team: &TeamProfile) -> Self {
        Self {
            engineers: team.engineer_count,
            points_per_engineer: team.avg_points_per_engineer,
            sprints_in_increment: team.sprints_in_increment,
            window_count: 1,
            start_label: String::new(),
        }
    }

    /// Capacity of one planning window.
    pub fn capacity(&self) -> i64 {
        capacity(
            self.engineers,
            self.points_per_engineer,
            self.sprints_in_increment,
        )
    }

    /// Points the team delivers in a single sprint, for display.
    pub fn sprint_capacity(&self) -> i64 {
        capacity(self.engineers, self.points_per_engineer, 1)
    }
}

/// Per-epic result of the single-window allocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpicAllocation {
    pub epic_id: String,
    pub points: i64,
    /// Running total including this epic.
    pub cumulative_points: i64,
    pub is_above_line: bool,
}

/// Result of walking the backlog against one capacity value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub epics: Vec<EpicAllocation>,
    pub capacity: i64,
    pub total_points: i64,
    /// Index of the first epic below the line; `None` when everything
    /// fits. The cut line renders just before this index.
    pub cut_line_index: Option<usize>,
}

impl Allocation {
    /// Share of capacity consumed, as a percentage. `None` when capacity
    /// is zero or negative (the ratio is undefined, not infinite-by-NaN).
    pub fn percent_used(&self) -> Option<f64> {
        if self.capacity > 0 {
            Some(self.total_points as f64 / self.capacity as f64 * 100.0)
        } else {
            None
        }
    }

    /// Points past capacity, 0 when the backlog fits.
    pub fn overflow_points(&self) -> i64 {
        (self.total_points - self.capacity.max(0)).max(0)
    }
}

/// Walk `epics` in the given (priority) order and classify each against
/// the capacity line.
///
/// The boundary is inclusive: an epic whose cumulative total lands exactly
/// on `capacity` is above the line, and a zero-point epic at cumulative 0
/// stays above the line even when capacity is 0. Because points are
/// non-negative, `is_above_line` flips at most once from true to false.
pub fn allocate(epics: &[Epic], points: &PointMap, capacity: i64) -> Allocation {
    let mut cumulative = 0i64;
    let allocations: Vec<EpicAllocation> = epics
        .iter()
        .map(|epic| {
            let pts = epic.points(points);
            cumulative += pts;
            EpicAllocation {
                epic_id: epic.id.clone(),
                points: pts,
                cumulative_points: cumulative,
                is_above_line: cumulative <= capacity,
            }
        })
        .collect();

    let cut_line_index = allocations.iter().position(|a| !a.is_above_line);

    Allocation {
        epics: allocations,
        capacity,
        total_points: cumulative,
        cut_line_index,
    }
}

/// Per-epic result of the multi-window allocation.
///
/// A straddling epic is recorded once, in the window it starts in,
/// annotated with how much of it fits there and how much rolls into the
/// next window; it is never duplicated into the next window's list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowEpic {
    pub epic_id: String,
    pub points: i64,
    /// Cumulative total before this epic.
    pub starts_at: i64,
    /// Cumulative total after this epic.
    pub ends_at: i64,
    pub window_index: usize,
    pub points_in_window: i64,
    pub rollover_points: i64,
    pub straddles: bool,
}

/// Aggregate view of one planning window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowSummary {
    pub label: String,
    pub capacity: i64,
    /// Points assigned to this window plus rollover credited from the
    /// previous window's straddling epic.
    pub used_points: i64,
}

/// Result of distributing the backlog across fixed-size windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowAllocation {
    pub epics: Vec<WindowEpic>,
    pub windows: Vec<WindowSummary>,
}

/// Distribute `epics` in order across `config.window_count` windows of
/// equal capacity.
///
/// An epic starts in window `floor(starts_at / capacity)`, clamped to the
/// last window: capacity overflow accumulates in the final window rather
/// than being dropped. It straddles when the window's end point falls
/// strictly inside its `[starts_at, ends_at)` span and a next window
/// exists; landing exactly on the boundary does not straddle. With zero or
/// negative capacity the window math is undefined, so everything goes to
/// window 0 with no straddling.
pub fn allocate_windows(epics: &[Epic], points: &PointMap, config: &PlanConfig) -> WindowAllocation {
    let window_capacity = config.capacity();
    let window_count = config.window_count.max(1);

    let mut used = vec![0i64; window_count];
    let mut cumulative = 0i64;

    let allocations: Vec<WindowEpic> = epics
        .iter()
        .map(|epic| {
            let pts = epic.points(points);
            let starts_at = cumulative;
            let ends_at = starts_at + pts;
            cumulative = ends_at;

            let window_index = if window_capacity <= 0 {
                0
            } else {
                ((starts_at / window_capacity) as usize).min(window_count - 1)
            };

            let window_end = (window_index as i64 + 1) * window_capacity;
            let straddles = window_capacity > 0
                && window_index + 1 < window_count
                && starts_at < window_end
                && ends_at > window_end;

            let (points_in_window, rollover_points) = if straddles {
                (window_end - starts_at, ends_at - window_end)
            } else {
                (pts, 0)
            };

            used[window_index] += points_in_window;
            if straddles {
                used[window_index + 1] += rollover_points;
            }

            WindowEpic {
                epic_id: epic.id.clone(),
                points: pts,
                starts_at,
                ends_at,
                window_index,
                points_in_window,
                rollover_points,
                straddles,
            }
        })
        .collect();

    let windows = used
        .into_iter()
        .enumerate()
        .map(|(i, used_points)| WindowSummary {
            label: window_label(&config.start_label, i),
            capacity: window_capacity,
            used_points,
        })
        .collect();

    WindowAllocation {
        epics: allocations,
        windows,
    }
}

/// Label for window `index`, counted from the configured start label.
///
/// Quarter labels like "Q3 2026" advance through quarters and roll the
/// year. Any other non-empty label names the first window only; remaining
/// windows (and everything, when no label is set) fall back to "Window N".
fn window_label(start_label: &str, index: usize) -> String {
    if let Some((quarter, year)) = parse_quarter_label(start_label) {
        let total = quarter - 1 + index as i64;
        return format!("Q{} {}", total % 4 + 1, year + total / 4);
    }
    if index == 0 && !start_label.is_empty() {
        return start_label.to_string();
    }
    format!("Window {}", index + 1)
}

fn parse_quarter_label(label: &str) -> Option<(i64, i64)> {
    let rest = label.trim().strip_prefix(['Q', 'q'])?;
    let (quarter, year) = rest.split_once(' ')?;
    let quarter: i64 = quarter.trim().parse().ok()?;
    let year: i64 = year.trim().parse().ok()?;
    if (1..=4).contains(&quarter) {
        Some((quarter, year))
    } else {
        None
    }
}
