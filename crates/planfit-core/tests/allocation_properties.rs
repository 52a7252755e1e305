//! Property tests for the forecast allocators.

use chrono::Utc;
use proptest::prelude::*;

use planfit_core::epic::{Epic, EpicSource, EpicStatus};
use planfit_core::forecast::{allocate, allocate_windows, PlanConfig};
use planfit_core::sizing::{default_mappings, PointMap, TShirtSize};

fn epic(index: usize, size: TShirtSize) -> Epic {
    let now = Utc::now();
    Epic {
        id: format!("epic-{index}"),
        team_id: "team-1".to_string(),
        external_id: None,
        title: format!("Epic {index}"),
        description: String::new(),
        original_size: size,
        current_size: size,
        status: EpicStatus::Backlog,
        source: EpicSource::Template,
        is_template: false,
        priority: index as i64,
        created_at: now,
        updated_at: now,
    }
}

fn arb_size() -> impl Strategy<Value = TShirtSize> {
    prop::sample::select(TShirtSize::ALL.to_vec())
}

fn arb_backlog() -> impl Strategy<Value = Vec<Epic>> {
    prop::collection::vec(arb_size(), 0..30)
        .prop_map(|sizes| sizes.into_iter().enumerate().map(|(i, s)| epic(i, s)).collect())
}

proptest! {
    #[test]
    fn cumulative_is_non_decreasing_and_line_flips_once(
        backlog in arb_backlog(),
        capacity in 0i64..3000,
    ) {
        let points = PointMap::from_mappings(&default_mappings());
        let result = allocate(&backlog, &points, capacity);

        let mut previous = 0i64;
        let mut seen_below = false;
        for alloc in &result.epics {
            prop_assert!(alloc.cumulative_points >= previous);
            previous = alloc.cumulative_points;

            // Once below the line, never above again.
            if seen_below {
                prop_assert!(!alloc.is_above_line);
            }
            seen_below = !alloc.is_above_line;

            prop_assert_eq!(alloc.is_above_line, alloc.cumulative_points <= capacity);
        }
    }

    #[test]
    fn straddling_conserves_points(
        backlog in arb_backlog(),
        engineers in 0i64..20,
        window_count in 1usize..6,
    ) {
        let points = PointMap::from_mappings(&default_mappings());
        let config = PlanConfig {
            engineers,
            points_per_engineer: 8,
            sprints_in_increment: 3,
            window_count,
            start_label: String::new(),
        };
        let result = allocate_windows(&backlog, &points, &config);

        let mut expected_cursor = 0i64;
        let mut previous_window = 0usize;
        for alloc in &result.epics {
            // Spans tile the cumulative axis with no gaps.
            prop_assert_eq!(alloc.starts_at, expected_cursor);
            prop_assert_eq!(alloc.ends_at, alloc.starts_at + alloc.points);
            expected_cursor = alloc.ends_at;

            // Window assignment never goes backward in a priority walk.
            prop_assert!(alloc.window_index >= previous_window);
            prop_assert!(alloc.window_index < window_count);
            previous_window = alloc.window_index;

            // A split always accounts for the whole epic.
            prop_assert_eq!(alloc.points_in_window + alloc.rollover_points, alloc.points);
            if !alloc.straddles {
                prop_assert_eq!(alloc.rollover_points, 0);
                prop_assert_eq!(alloc.points_in_window, alloc.points);
            }
        }

        // Every point is credited to exactly one window.
        let credited: i64 = result.windows.iter().map(|w| w.used_points).sum();
        prop_assert_eq!(credited, expected_cursor);
        prop_assert_eq!(result.windows.len(), window_count);
    }

    #[test]
    fn allocators_are_pure(
        backlog in arb_backlog(),
        capacity in 0i64..3000,
        window_count in 1usize..6,
    ) {
        let points = PointMap::from_mappings(&default_mappings());

        let single_a = allocate(&backlog, &points, capacity);
        let single_b = allocate(&backlog, &points, capacity);
        prop_assert_eq!(single_a.epics, single_b.epics);
        prop_assert_eq!(single_a.cut_line_index, single_b.cut_line_index);

        let config = PlanConfig {
            engineers: 5,
            points_per_engineer: 8,
            sprints_in_increment: 1,
            window_count,
            start_label: "Q1 2027".to_string(),
        };
        let windows_a = allocate_windows(&backlog, &points, &config);
        let windows_b = allocate_windows(&backlog, &points, &config);
        prop_assert_eq!(windows_a.epics, windows_b.epics);
        prop_assert_eq!(windows_a.windows, windows_b.windows);
    }

    #[test]
    fn capacity_is_the_clamped_product(
        engineers in -10i64..100,
        points in -10i64..100,
        sprints in -10i64..20,
    ) {
        let capacity = planfit_core::team::capacity(engineers, points, sprints);
        prop_assert_eq!(capacity, engineers.max(0) * points.max(0) * sprints.max(0));
        prop_assert!(capacity >= 0);
        prop_assert_eq!(planfit_core::team::capacity(0, points, sprints), 0);
    }
}
