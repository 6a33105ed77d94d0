//! Proportional circle/square/hexagon sizing.
//!
//! Area grows with the square of the extent, so `extent = max_extent · sqrt(weight / max_weight)`.

use super::{PartitionSegment, SegmentGeometry};
use crate::error::{Result, non_negative_dimension, positive_dimension};
use crate::model::{WeightedItem, validated_in_order};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Circle,
    /// Extent is the side length.
    Square,
    /// Extent is the circumradius (pointy-top).
    Hexagon,
}

impl Shape {
    pub fn area(self, extent: f64) -> f64 {
        match self {
            Shape::Circle => std::f64::consts::PI * extent * extent,
            Shape::Square => extent * extent,
            Shape::Hexagon => 1.5 * 3f64.sqrt() * extent * extent,
        }
    }
}

/// Sizes one shape per item so that area is proportional to weight, the heaviest item getting
/// `max_extent`.
///
/// A zero weight yields no shape (`zero_area`, extent 0). A nonzero weight whose extent would be
/// below `min_visible_extent` is raised to it (never above `max_extent`) and marked `clamped`.
pub fn size_proportional(
    items: &[WeightedItem],
    shape: Shape,
    max_extent: f64,
    min_visible_extent: f64,
) -> Result<Vec<PartitionSegment>> {
    let max_extent = positive_dimension("max_extent", max_extent)?;
    let min_visible = non_negative_dimension("min_visible_extent", min_visible_extent)?
        .min(max_extent);
    let ordered = validated_in_order(items)?;

    let max_weight = ordered
        .iter()
        .map(|item| item.weight)
        .fold(0.0f64, f64::max);

    Ok(ordered
        .into_iter()
        .map(|item| {
            let (radius, clamped) = if item.weight == 0.0 || !(max_weight > 0.0) {
                (0.0, false)
            } else {
                let extent = max_extent * (item.weight / max_weight).sqrt();
                if extent < min_visible {
                    (min_visible, true)
                } else {
                    (extent, false)
                }
            };
            PartitionSegment::new(
                item,
                SegmentGeometry::Radial {
                    shape,
                    radius,
                    clamped,
                },
                radius == 0.0,
            )
        })
        .collect())
}
