//! T-shirt size labels and their story-point mappings.
//!
//! Estimates enter the system as one of eight ordered size labels. Each
//! team maps every label to a concrete story-point value with a confidence
//! percentage and a human anchor ("Full team @ 1 sprint"). The forecast
//! allocator only ever consumes the resolved [`PointMap`], never raw
//! transport payloads.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// T-shirt size labels, smallest to largest.
///
/// The derived `Ord` follows declaration order, so `TShirtSize::S <
/// TShirtSize::M` holds and sorting a mapping table by size yields the
/// canonical display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TShirtSize {
    #[serde(rename = "2-XS")]
    TwoXs,
    #[serde(rename = "XS")]
    Xs,
    S,
    M,
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "2-XL")]
    TwoXl,
    #[serde(rename = "3-XL")]
    ThreeXl,
}

impl TShirtSize {
    /// All sizes in ascending order.
    pub const ALL: [TShirtSize; 8] = [
        TShirtSize::TwoXs,
        TShirtSize::Xs,
        TShirtSize::S,
        TShirtSize::M,
        TShirtSize::L,
        TShirtSize::Xl,
        TShirtSize::TwoXl,
        TShirtSize::ThreeXl,
    ];

    /// Canonical label as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            TShirtSize::TwoXs => "2-XS",
            TShirtSize::Xs => "XS",
            TShirtSize::S => "S",
            TShirtSize::M => "M",
            TShirtSize::L => "L",
            TShirtSize::Xl => "XL",
            TShirtSize::TwoXl => "2-XL",
            TShirtSize::ThreeXl => "3-XL",
        }
    }

    /// Parse a canonical label. Returns `None` for anything else; use
    /// [`TShirtSize::normalize`] for loose user or CSV input.
    pub fn parse(label: &str) -> Option<TShirtSize> {
        TShirtSize::ALL.iter().copied().find(|s| s.as_str() == label)
    }

    /// Normalize loose input to a size label.
    ///
    /// Accepts canonical labels in any case, common alternate spellings
    /// (`2XS`, `XXS`, `XXL`, `3XL`, ...), and bare story-point numbers,
    /// which bucket into the size whose default mapping they fall under.
    /// Unrecognized input defaults to `M`.
    pub fn normalize(value: &str) -> TShirtSize {
        let upper: String = value
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if let Some(size) = TShirtSize::parse(&upper) {
            return size;
        }

        match upper.as_str() {
            "2XS" | "XXS" => return TShirtSize::TwoXs,
            "2XL" | "XXL" => return TShirtSize::TwoXl,
            "3XL" | "XXXL" => return TShirtSize::ThreeXl,
            _ => {}
        }

        let digits: String = upper.chars().filter(|c| c.is_ascii_digit()).collect();
        if let Ok(num) = digits.parse::<u32>() {
            return TShirtSize::from_points(num);
        }

        TShirtSize::M
    }

    /// Bucket a raw story-point estimate into a size label, using the
    /// default mapping table's thresholds.
    pub fn from_points(points: u32) -> TShirtSize {
        match points {
            0..=3 => TShirtSize::TwoXs,
            4..=8 => TShirtSize::Xs,
            9..=20 => TShirtSize::S,
            21..=40 => TShirtSize::M,
            41..=100 => TShirtSize::L,
            101..=250 => TShirtSize::Xl,
            251..=500 => TShirtSize::TwoXl,
            _ => TShirtSize::ThreeXl,
        }
    }
}

impl fmt::Display for TShirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A team's mapping from one size label to a story-point value.
///
/// Invariant: at most one mapping per size label per team. Points are
/// expected to be non-decreasing as sizes grow, but that is a convention
/// the settings UI encourages rather than something storage enforces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeMapping {
    pub size: TShirtSize,
    pub points: u32,
    /// Estimation confidence, 0-100.
    pub confidence: u32,
    /// Human reference point, e.g. "Full team @ 1 sprint".
    pub anchor_description: String,
}

/// The default mapping table seeded for new and demo teams.
pub fn default_mappings() -> Vec<SizeMapping> {
    let table: [(TShirtSize, u32, u32, &str); 8] = [
        (TShirtSize::TwoXs, 3, 95, "1 FTE @ 1 week"),
        (TShirtSize::Xs, 8, 90, "1 FTE @ 2 weeks"),
        (TShirtSize::S, 20, 85, "2 FTEs @ 1 sprint"),
        (TShirtSize::M, 40, 80, "Full team @ 1 sprint"),
        (TShirtSize::L, 100, 70, "Multi-sprint feature"),
        (TShirtSize::Xl, 250, 60, "Quarterly initiative"),
        (TShirtSize::TwoXl, 500, 40, "Multi-quarter initiative"),
        (TShirtSize::ThreeXl, 1000, 20, "Yearly initiative"),
    ];
    table
        .into_iter()
        .map(|(size, points, confidence, anchor)| SizeMapping {
            size,
            points,
            confidence,
            anchor_description: anchor.to_string(),
        })
        .collect()
}

/// Resolved size-to-points lookup used by the allocator.
///
/// A missing mapping resolves to 0 points: that signals a data-consistency
/// problem upstream, but the forecast must stay renderable with partial
/// data, so the lookup never fails.
#[derive(Debug, Clone, Default)]
pub struct PointMap {
    points: HashMap<TShirtSize, u32>,
}

impl PointMap {
    /// Build the lookup from a team's mapping table. If a size appears
    /// more than once the last entry wins.
    pub fn from_mappings(mappings: &[SizeMapping]) -> Self {
        Self {
            points: mappings.iter().map(|m| (m.size, m.points)).collect(),
        }
    }

    /// Points for a size label, or 0 when unmapped.
    pub fn points_for(&self, size: TShirtSize) -> u32 {
        self.points.get(&size).copied().unwrap_or(0)
    }
}
