//! Pyramid/funnel partitioning of a triangular silhouette into equal-density bands.
//!
//! Apex-up silhouette: apex at `y = 0` (width 0), base at `y = H` (width `W`), so the width at
//! depth `y` is `W·y/H`. A band starting at `cy` with height `h` has area
//! `A·h² + B·h` where `A = W/2H` and `B = W·cy/H`; each band's height is the positive root of
//! `A·h² + B·h − target = 0`.

use super::{PartitionSegment, SegmentGeometry, Trapezoid};
use crate::error::{Result, positive_dimension};
use crate::model::{WeightedItem, validated_in_order};
use serde::{Deserialize, Serialize};

/// `A` at or below this is treated as zero and the band equation degenerates to linear.
pub const DEGENERATE_SLOPE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Pyramid: apex at the top, first item at the apex.
    #[default]
    ApexUp,
    /// Funnel: wide edge at the top, first item on the wide edge.
    ApexDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolveMethod {
    Quadratic,
    /// `h = target / B` for a degenerate (near-zero `A`) silhouette.
    Linear,
    /// `h = H · weight / total`, used when the closed form is unusable.
    Proportional,
    ZeroWeight,
}

impl SolveMethod {
    pub fn is_fallback(self) -> bool {
        matches!(self, SolveMethod::Linear | SolveMethod::Proportional)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSolve {
    pub height: f64,
    pub method: SolveMethod,
}

/// Solves `a·h² + b·h − target = 0` for the band height `h ≥ 0`.
///
/// `proportional` is the height to use when neither the quadratic nor the linear form applies
/// (degenerate slope with `b = 0`, negative discriminant, or a non-finite result).
pub fn solve_band_height(a: f64, b: f64, target: f64, proportional: f64) -> BandSolve {
    let fallback = BandSolve {
        height: proportional,
        method: SolveMethod::Proportional,
    };

    if !(a > DEGENERATE_SLOPE) {
        let height = target / b;
        if b > 0.0 && height.is_finite() && height >= 0.0 {
            return BandSolve {
                height,
                method: SolveMethod::Linear,
            };
        }
        return fallback;
    }

    let discriminant = b * b + 4.0 * a * target;
    if !(discriminant.is_finite() && discriminant >= 0.0) {
        return fallback;
    }

    // (−b + √d) / 2a, rationalized to avoid cancellation when b ≫ a·target.
    let denom = b + discriminant.sqrt();
    let height = if denom > 0.0 {
        2.0 * target / denom
    } else {
        0.0
    };
    if !(height.is_finite() && height >= 0.0) {
        return fallback;
    }
    BandSolve {
        height,
        method: SolveMethod::Quadratic,
    }
}

/// Partitions a `width × height` triangle into one band per item, in item order, with band
/// area proportional to weight.
///
/// Zero-weight items produce zero-height bands. The last nonzero band ends exactly at the base
/// so the bands always tile the whole silhouette. All-zero weights produce all-zero bands.
pub fn partition_triangle(
    items: &[WeightedItem],
    width: f64,
    height: f64,
    orientation: Orientation,
) -> Result<Vec<PartitionSegment>> {
    let width = positive_dimension("width", width)?;
    let height = positive_dimension("height", height)?;
    let ordered = validated_in_order(items)?;

    Ok(match orientation {
        Orientation::ApexUp => apex_up(&ordered, width, height),
        Orientation::ApexDown => {
            let reversed: Vec<&WeightedItem> = ordered.iter().rev().copied().collect();
            let mut segments = apex_up(&reversed, width, height);
            segments.reverse();
            for segment in &mut segments {
                if let SegmentGeometry::Trapezoid(t) = &mut segment.geometry {
                    *t = mirror(*t, height);
                }
            }
            segments
        }
    })
}

fn mirror(t: Trapezoid, height: f64) -> Trapezoid {
    Trapezoid {
        y_top: height - t.y_bottom,
        y_bottom: height - t.y_top,
        width_top: t.width_bottom,
        width_bottom: t.width_top,
        solve: t.solve,
    }
}

fn apex_up(ordered: &[&WeightedItem], width: f64, height: f64) -> Vec<PartitionSegment> {
    let band = |item: &WeightedItem, y_top: f64, y_bottom: f64, solve: SolveMethod| {
        PartitionSegment::new(
            item,
            SegmentGeometry::Trapezoid(Trapezoid {
                y_top,
                y_bottom,
                width_top: width * y_top / height,
                width_bottom: width * y_bottom / height,
                solve,
            }),
            solve == SolveMethod::ZeroWeight,
        )
    };

    // Weights are summed relative to the largest so that finite inputs near `f64::MAX` cannot
    // overflow the total.
    let max_weight = ordered
        .iter()
        .map(|item| item.weight)
        .fold(0.0f64, f64::max);
    let relative = |item: &WeightedItem| {
        if max_weight > 0.0 {
            item.weight / max_weight
        } else {
            0.0
        }
    };
    let total: f64 = ordered.iter().map(|&item| relative(item)).sum();
    if !(total > 0.0) {
        return ordered
            .iter()
            .map(|&item| band(item, 0.0, 0.0, SolveMethod::ZeroWeight))
            .collect();
    }

    let silhouette_area = width * height / 2.0;
    let a = width / (2.0 * height);
    let last_nonzero = ordered.iter().rposition(|item| item.weight > 0.0);

    let mut out: Vec<PartitionSegment> = Vec::with_capacity(ordered.len());
    let mut cy = 0.0f64;
    for (idx, &item) in ordered.iter().enumerate() {
        if item.weight == 0.0 {
            out.push(band(item, cy, cy, SolveMethod::ZeroWeight));
            continue;
        }

        let share = relative(item) / total;
        let solved = solve_band_height(
            a,
            width * cy / height,
            share * silhouette_area,
            height * share,
        );
        if solved.method.is_fallback() {
            tracing::debug!(
                item = %item.id,
                method = ?solved.method,
                y_top = cy,
                "band height recovered by fallback"
            );
        }

        let bottom = if Some(idx) == last_nonzero {
            height
        } else {
            (cy + solved.height).min(height)
        };
        out.push(band(item, cy, bottom, solved.method));
        cy = bottom;
    }
    out
}
