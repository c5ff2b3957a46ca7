//! Property-based tests for layout, fillet and naming invariants.

use proptest::prelude::*;

use dsub_core::layout::{LayoutParams, distribute, generate_pin_positions, pin_bounds};
use dsub_core::opening::{OpeningParams, build_opening};
use dsub_core::path::{MAX_EDGE_SHARE, corner_fillets};
use dsub_core::shell::shell_geometry;
use dsub_core::{Gender, Point, ShellSize, View, sanitize_stem};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Supported row count with a pin count that fills every row.
fn arb_insert() -> impl Strategy<Value = (usize, usize)> {
    (2usize..=4).prop_flat_map(|rows| (rows * 2..=100usize, Just(rows)))
}

fn arb_pitch() -> impl Strategy<Value = f64> {
    1.0f64..4.0
}

fn arb_shell() -> impl Strategy<Value = ShellSize> {
    prop_oneof![
        Just(ShellSize::E),
        Just(ShellSize::A),
        Just(ShellSize::B),
        Just(ShellSize::C),
        Just(ShellSize::D),
    ]
}

fn arb_polygon() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 3..8)
}

fn params(pin_count: usize, rows: usize, h: f64, v: f64) -> LayoutParams<'static> {
    LayoutParams {
        pin_count,
        rows,
        h_pitch: h,
        v_pitch: v,
        row_counts: None,
        row_offsets: None,
        row_offset_mm: None,
    }
}

const TOL: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Row distribution
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn distribute_sums_and_is_even(n in 0usize..500, rows in 2usize..=4) {
        let counts = distribute(n, rows).unwrap();
        prop_assert_eq!(counts.len(), rows);
        prop_assert_eq!(counts.iter().sum::<usize>(), n);
        let max = *counts.iter().max().unwrap();
        let min = *counts.iter().min().unwrap();
        prop_assert!(max - min <= 1, "uneven distribution {:?}", counts);
    }
}

// ---------------------------------------------------------------------------
// Pin sets are centered and mirror laws hold
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn pin_set_is_centered(
        (n, rows) in arb_insert(),
        h in arb_pitch(),
        v in arb_pitch(),
        female in any::<bool>(),
        solder in any::<bool>(),
    ) {
        let gender = if female { Gender::Female } else { Gender::Male };
        let view = if solder { View::Solder } else { View::Outside };
        let pins = generate_pin_positions(&params(n, rows, h, v), gender, view).unwrap();
        prop_assert_eq!(pins.len(), n);
        let b = pin_bounds(&pins).unwrap();
        let (cx, cy) = b.center();
        prop_assert!(cx.abs() < TOL && cy.abs() < TOL, "center=({}, {})", cx, cy);
    }

    #[test]
    fn female_mirrors_male(
        (n, rows) in arb_insert(),
        h in arb_pitch(),
        v in arb_pitch(),
        solder in any::<bool>(),
    ) {
        let view = if solder { View::Solder } else { View::Outside };
        let p = params(n, rows, h, v);
        let male = generate_pin_positions(&p, Gender::Male, view).unwrap();
        let female = generate_pin_positions(&p, Gender::Female, view).unwrap();
        for (m, f) in male.iter().zip(&female) {
            prop_assert_eq!(m.number, f.number);
            prop_assert!((m.x + f.x).abs() < TOL);
            prop_assert!((m.y - f.y).abs() < TOL);
        }
    }

    #[test]
    fn solder_mirrors_outside(
        (n, rows) in arb_insert(),
        h in arb_pitch(),
        v in arb_pitch(),
        female in any::<bool>(),
    ) {
        let gender = if female { Gender::Female } else { Gender::Male };
        let p = params(n, rows, h, v);
        let outside = generate_pin_positions(&p, gender, View::Outside).unwrap();
        let solder = generate_pin_positions(&p, gender, View::Solder).unwrap();
        for (o, s) in outside.iter().zip(&solder) {
            prop_assert!((o.x + s.x).abs() < TOL);
            prop_assert!((o.y - s.y).abs() < TOL);
        }
    }
}

// ---------------------------------------------------------------------------
// Fillet tangent lengths never exceed the edge share
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn tangent_length_is_clamped(pts in arb_polygon(), radius in 0.01f64..50.0) {
        let pts: Vec<Point> = pts.into_iter().map(Point::from).collect();
        for f in corner_fillets(&pts, radius).unwrap() {
            let limit = MAX_EDGE_SHARE * f.edge_prev.min(f.edge_next);
            prop_assert!(f.tangent_len <= limit + TOL,
                "tangent {} exceeds {} at {:?}", f.tangent_len, limit, f.vertex);
        }
    }

    #[test]
    fn opening_clears_the_pin_field(
        (n, rows) in arb_insert(),
        h in arb_pitch(),
        v in arb_pitch(),
        shell in arb_shell(),
        female in any::<bool>(),
    ) {
        let gender = if female { Gender::Female } else { Gender::Male };
        let pins = generate_pin_positions(&params(n, rows, h, v), gender, View::Outside).unwrap();
        let b = pin_bounds(&pins).unwrap();
        let op = OpeningParams::default();
        let o = build_opening(
            Point::new(0.0, 0.0),
            &shell_geometry(shell, gender),
            1000.0,
            b.width(),
            b.height(),
            &op,
        ).unwrap();
        prop_assert!(o.height >= b.height() + 2.0 * op.clearance_y_mm - TOL);
        prop_assert!(o.top_width >= b.width() + 2.0 * op.clearance_x_mm - TOL);
        prop_assert!(o.bottom_width >= b.width() + op.clearance_x_mm - TOL);
        prop_assert!(o.top_y() <= b.min_y - op.clearance_y_mm + TOL);
        prop_assert!(o.bottom_y() >= b.max_y + op.clearance_y_mm - TOL);
    }
}

#[test]
fn near_straight_vertex_stays_clamped() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(5.0, 1e-7),
        Point::new(10.0, 0.0),
        Point::new(5.0, 5.0),
    ];
    let fillets = corner_fillets(&pts, 2.0).unwrap();
    let near = fillets
        .iter()
        .find(|f| f.vertex == Point::new(5.0, 1e-7))
        .unwrap();
    assert!(near.tangent_len <= MAX_EDGE_SHARE * near.edge_prev.min(near.edge_next));
}

// ---------------------------------------------------------------------------
// File-name sanitization
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn sanitize_is_idempotent(s in "\\PC{0,40}") {
        let once = sanitize_stem(&s);
        prop_assert_eq!(sanitize_stem(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!once.starts_with('_') && !once.ends_with('_'));
    }
}
