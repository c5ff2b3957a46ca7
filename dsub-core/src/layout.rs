//! Pin placement: row distribution, stagger centering and gender/view mirroring.

use tracing::trace;

use crate::error::GeometryError;
use crate::model::{ConnectorSpec, Gender, PinRecord, View};

/// Split `pin_count` as evenly as possible across `rows`.
pub fn distribute(pin_count: usize, rows: usize) -> Result<Vec<usize>, GeometryError> {
    match rows {
        2 => Ok(vec![pin_count.div_ceil(2), pin_count / 2]),
        3 => {
            let base = pin_count / 3;
            let mut counts = vec![base; 3];
            match pin_count % 3 {
                1 => counts[1] += 1,
                2 => {
                    counts[0] += 1;
                    counts[2] += 1;
                }
                _ => {}
            }
            Ok(counts)
        }
        4 => {
            let base = pin_count / 4;
            let mut counts = vec![base; 4];
            for c in counts.iter_mut().take(pin_count % 4) {
                *c += 1;
            }
            Ok(counts)
        }
        _ => Err(GeometryError::UnsupportedRowCount { rows }),
    }
}

/// Default stagger: odd rows shift by `row_offset_mm`, or half a pitch when
/// no magnitude is configured.
pub fn stagger_pattern(rows: usize, h_pitch: f64, row_offset_mm: Option<f64>) -> Vec<f64> {
    let magnitude = row_offset_mm.unwrap_or(h_pitch / 2.0);
    (0..rows)
        .map(|r| if r % 2 == 1 { magnitude } else { 0.0 })
        .collect()
}

/// Per-row horizontal offsets.
///
/// Rows with zero stagger and rows with a stagger form two groups; each row is
/// centered on the longest row of its own group. The non-staggered group is
/// centered in whole pitches only, so shorter rows keep their pins on the same
/// columns as the longest row (a 21-21-20 insert would otherwise drift by
/// half a pitch). Staggered rows sit between those columns and are centered
/// exactly.
pub fn compute_row_offsets(counts: &[usize], h_pitch: f64, stagger: &[f64]) -> Vec<f64> {
    let group_max = |staggered: bool| {
        counts
            .iter()
            .zip(stagger)
            .filter(|&(_, s)| (*s != 0.0) == staggered)
            .map(|(&c, _)| c)
            .max()
            .unwrap_or(0)
    };
    let flat_max = group_max(false);
    let staggered_max = group_max(true);

    counts
        .iter()
        .zip(stagger)
        .map(|(&count, &s)| {
            let center = if s == 0.0 {
                (flat_max.saturating_sub(count) / 2) as f64 * h_pitch
            } else {
                staggered_max.saturating_sub(count) as f64 * h_pitch / 2.0
            };
            s + center
        })
        .collect()
}

/// Raw layout inputs, for callers that do not hold a validated [`ConnectorSpec`].
#[derive(Clone, Copy, Debug)]
pub struct LayoutParams<'a> {
    pub pin_count: usize,
    pub rows: usize,
    pub h_pitch: f64,
    pub v_pitch: f64,
    pub row_counts: Option<&'a [usize]>,
    pub row_offsets: Option<&'a [f64]>,
    pub row_offset_mm: Option<f64>,
}

impl<'a> LayoutParams<'a> {
    pub fn from_spec(spec: &'a ConnectorSpec) -> Self {
        LayoutParams {
            pin_count: spec.pin_count(),
            rows: spec.rows(),
            h_pitch: spec.h_pitch_mm(),
            v_pitch: spec.v_pitch_mm(),
            row_counts: spec.row_counts(),
            row_offsets: spec.row_offsets(),
            row_offset_mm: spec.row_offset_mm(),
        }
    }

    /// Explicit row counts, or the even distribution when none are given.
    pub fn resolved_row_counts(&self) -> Result<Vec<usize>, GeometryError> {
        let counts = match self.row_counts {
            Some(c) => c.to_vec(),
            None => distribute(self.pin_count, self.rows)?,
        };
        let sum: usize = counts.iter().sum();
        if sum != self.pin_count {
            return Err(GeometryError::RowCountSum {
                sum,
                pin_count: self.pin_count,
            });
        }
        if counts.len() != self.rows {
            return Err(GeometryError::RowCountLength {
                len: counts.len(),
                rows: self.rows,
            });
        }
        Ok(counts)
    }
}

pub fn generate_pin_positions(
    params: &LayoutParams<'_>,
    gender: Gender,
    view: View,
) -> Result<Vec<PinRecord>, GeometryError> {
    let counts = params.resolved_row_counts()?;
    let offsets = match params.row_offsets {
        Some(o) if o.len() != params.rows => {
            return Err(GeometryError::RowOffsetLength {
                len: o.len(),
                rows: params.rows,
            });
        }
        Some(o) => o.to_vec(),
        None => {
            let stagger = stagger_pattern(params.rows, params.h_pitch, params.row_offset_mm);
            compute_row_offsets(&counts, params.h_pitch, &stagger)
        }
    };

    let mut pins = Vec::with_capacity(params.pin_count);
    let mut number = 1;
    for (row, (&count, &offset)) in counts.iter().zip(&offsets).enumerate() {
        for i in 0..count {
            pins.push(PinRecord {
                number,
                row,
                x: i as f64 * params.h_pitch + offset,
                y: row as f64 * params.v_pitch,
            });
            number += 1;
        }
    }

    let bounds = pin_bounds(&pins).ok_or(GeometryError::EmptyPinSet)?;
    let (cx, cy) = bounds.center();
    // Male keeps the mating-face orientation; female and the rear view each
    // mirror left/right.
    let mut sign = 1.0;
    if gender == Gender::Female {
        sign = -sign;
    }
    if view == View::Solder {
        sign = -sign;
    }
    for p in &mut pins {
        p.x = (p.x - cx) * sign;
        p.y -= cy;
    }
    trace!(
        pins = pins.len(),
        rows = params.rows,
        %gender,
        %view,
        "placed pins"
    );
    Ok(pins)
}

impl ConnectorSpec {
    /// Pin coordinates for this connector as drawn for `gender` from `view`.
    pub fn pin_positions(&self, gender: Gender, view: View) -> Result<Vec<PinRecord>, GeometryError> {
        generate_pin_positions(&LayoutParams::from_spec(self), gender, view)
    }

    pub fn resolved_row_counts(&self) -> Result<Vec<usize>, GeometryError> {
        LayoutParams::from_spec(self).resolved_row_counts()
    }
}

/// Axis-aligned bounding box of a pin set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

pub fn pin_bounds(pins: &[PinRecord]) -> Option<Bounds> {
    if pins.is_empty() {
        return None;
    }
    let (mut minx, mut miny, mut maxx, mut maxy) = (
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    );
    for p in pins {
        minx = minx.min(p.x);
        miny = miny.min(p.y);
        maxx = maxx.max(p.x);
        maxy = maxy.max(p.y);
    }
    Some(Bounds {
        min_x: minx,
        min_y: miny,
        max_x: maxx,
        max_y: maxy,
    })
}

/// Pins of one row, ordered left to right as drawn.
pub fn sorted_row(pins: &[PinRecord], row: usize) -> Vec<PinRecord> {
    let mut out: Vec<PinRecord> = pins.iter().filter(|p| p.row == row).copied().collect();
    out.sort_by(|a, b| a.x.total_cmp(&b.x));
    out
}

/// Leftmost and rightmost pin of a row.
pub fn row_extremes(pins: &[PinRecord], row: usize) -> Option<(PinRecord, PinRecord)> {
    let sorted = sorted_row(pins, row);
    Some((*sorted.first()?, *sorted.last()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

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

    #[test]
    fn distribute_two_rows_front_loads() {
        assert_eq!(distribute(9, 2).unwrap(), vec![5, 4]);
        assert_eq!(distribute(25, 2).unwrap(), vec![13, 12]);
        assert_eq!(distribute(10, 2).unwrap(), vec![5, 5]);
    }

    #[test]
    fn distribute_three_rows() {
        assert_eq!(distribute(15, 3).unwrap(), vec![5, 5, 5]);
        assert_eq!(distribute(16, 3).unwrap(), vec![5, 6, 5]);
        assert_eq!(distribute(50, 3).unwrap(), vec![17, 16, 17]);
    }

    #[test]
    fn distribute_four_rows() {
        assert_eq!(distribute(78, 4).unwrap(), vec![20, 20, 19, 19]);
        assert_eq!(distribute(9, 4).unwrap(), vec![3, 2, 2, 2]);
    }

    #[test]
    fn distribute_rejects_other_row_counts() {
        assert_eq!(
            distribute(10, 5),
            Err(GeometryError::UnsupportedRowCount { rows: 5 })
        );
        assert!(distribute(10, 1).is_err());
    }

    #[test]
    fn flat_rows_are_quantized_to_the_pitch_grid() {
        // 21-21-20 with the middle row staggered: row 2 is one pin short of
        // row 0 and must not shift by half a pitch.
        let h = 2.29;
        let offsets = compute_row_offsets(&[21, 21, 20], h, &[0.0, h / 2.0, 0.0]);
        assert_abs_diff_eq!(offsets[0], 0.0);
        assert_abs_diff_eq!(offsets[1], h / 2.0);
        assert_abs_diff_eq!(offsets[2], 0.0);

        // Two pins short: a whole pitch.
        let offsets = compute_row_offsets(&[9, 7], h, &[0.0, 0.0]);
        assert_abs_diff_eq!(offsets[1], h);
    }

    #[test]
    fn staggered_rows_center_exactly() {
        let h = 2.0;
        let offsets = compute_row_offsets(&[20, 19, 20, 18], h, &[0.0, 1.0, 0.0, 1.0]);
        assert_abs_diff_eq!(offsets[1], 1.0);
        assert_abs_diff_eq!(offsets[3], 1.0 + 1.0 * h / 2.0);
    }

    #[test]
    fn two_row_de9_layout() {
        let pins = generate_pin_positions(&params(9, 2, 2.77, 2.84), Gender::Male, View::Outside)
            .unwrap();
        assert_eq!(pins.len(), 9);
        // Pin 1 is top-left on a male mating face.
        let first = pins[0];
        assert_eq!(first.number, 1);
        assert!(first.x < 0.0 && first.y < 0.0);
        assert_abs_diff_eq!(first.x, -2.0 * 2.77, epsilon = 1e-9);
        // Pin 6 starts the second row, half a pitch in.
        assert_eq!(pins[5].row, 1);
        assert_abs_diff_eq!(pins[5].x, -1.5 * 2.77, epsilon = 1e-9);
        assert_abs_diff_eq!(pins[5].y, 1.42, epsilon = 1e-9);
    }

    #[test]
    fn female_pin_one_is_top_right() {
        let pins = generate_pin_positions(&params(9, 2, 2.77, 2.84), Gender::Female, View::Outside)
            .unwrap();
        assert!(pins[0].x > 0.0 && pins[0].y < 0.0);
    }

    #[test]
    fn explicit_offsets_are_used_verbatim() {
        let offsets = [0.0, 0.5];
        let mut p = params(4, 2, 1.0, 1.0);
        p.row_offsets = Some(&offsets);
        let pins = generate_pin_positions(&p, Gender::Male, View::Outside).unwrap();
        // Rows span [0, 1] and [0.5, 1.5]; centroid x is 0.75.
        assert_abs_diff_eq!(pins[0].x, -0.75);
        assert_abs_diff_eq!(pins[2].x, -0.25);
    }

    #[test]
    fn explicit_offsets_must_match_rows() {
        let offsets = [0.0];
        let mut p = params(4, 2, 1.0, 1.0);
        p.row_offsets = Some(&offsets);
        assert_eq!(
            generate_pin_positions(&p, Gender::Male, View::Outside),
            Err(GeometryError::RowOffsetLength { len: 1, rows: 2 })
        );
    }

    #[test]
    fn explicit_counts_are_checked() {
        let counts = [5, 5];
        let mut p = params(9, 2, 1.0, 1.0);
        p.row_counts = Some(&counts);
        assert_eq!(
            generate_pin_positions(&p, Gender::Male, View::Outside),
            Err(GeometryError::RowCountSum {
                sum: 10,
                pin_count: 9
            })
        );

        let counts = [9];
        p.row_counts = Some(&counts);
        assert_eq!(
            generate_pin_positions(&p, Gender::Male, View::Outside),
            Err(GeometryError::RowCountLength { len: 1, rows: 2 })
        );
    }

    #[test]
    fn unsupported_rows_without_counts_fail() {
        assert_eq!(
            generate_pin_positions(&params(10, 5, 1.0, 1.0), Gender::Male, View::Outside),
            Err(GeometryError::UnsupportedRowCount { rows: 5 })
        );
    }

    #[test]
    fn row_extremes_follow_drawn_order() {
        let pins = generate_pin_positions(&params(9, 2, 2.77, 2.84), Gender::Female, View::Outside)
            .unwrap();
        let (left, right) = row_extremes(&pins, 0).unwrap();
        assert_eq!(left.number, 5);
        assert_eq!(right.number, 1);
        assert!(row_extremes(&pins, 7).is_none());
    }
}
