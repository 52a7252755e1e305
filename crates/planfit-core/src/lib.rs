//! # Planfit Core Library
//!
//! This library provides the core business logic for Planfit, a
//! capacity-planning forecaster. It implements a CLI-first philosophy where
//! all operations are available via a standalone CLI binary; any richer
//! frontend is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Sizing**: T-shirt size labels and their story-point mappings
//! - **Forecast**: the allocation engine that walks a priority-ordered
//!   backlog against a team's computed capacity, renders the cut line, and
//!   distributes epics across planning windows with rollover
//! - **Scenario**: non-persisted what-if overrides of capacity inputs
//! - **Storage**: SQLite-based team/epic/mapping persistence and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`forecast::allocate`]: single-window cut-line allocation
//! - [`forecast::allocate_windows`]: multi-window allocation with straddling
//! - [`Scenario`]: capacity what-if simulation
//! - [`PlanDb`]: team, size-mapping, epic, and snapshot persistence

pub mod epic;
pub mod error;
pub mod forecast;
pub mod import;
pub mod scenario;
pub mod sizing;
pub mod storage;
pub mod team;

pub use epic::{Epic, EpicDraft, EpicSource, EpicStatus, EpicUpdate};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use forecast::{
    allocate, allocate_windows, Allocation, EpicAllocation, PlanConfig, WindowAllocation,
    WindowEpic, WindowSummary,
};
pub use scenario::{CapacityInputs, Scenario};
pub use sizing::{PointMap, SizeMapping, TShirtSize};
pub use storage::{Config, PlanDb, PlanningSnapshot};
pub use team::{TeamProfile, TeamUpdate};
