//! Partition output shared by the triangle, radial and grid partitioners.

pub mod radial;
pub mod triangle;

use crate::model::{Point, Rect, WeightedItem};
use radial::Shape;
use serde::{Deserialize, Serialize};
use triangle::SolveMethod;

/// One horizontal band of a triangular silhouette, in silhouette-local coordinates
/// (`y = 0` at the top edge of the silhouette's bounding box).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trapezoid {
    pub y_top: f64,
    pub y_bottom: f64,
    pub width_top: f64,
    pub width_bottom: f64,
    pub solve: SolveMethod,
}

impl Trapezoid {
    pub fn height(&self) -> f64 {
        self.y_bottom - self.y_top
    }

    pub fn area(&self) -> f64 {
        (self.width_top + self.width_bottom) / 2.0 * self.height()
    }

    /// Corners clockwise from top-left for a silhouette whose vertical axis is at `center_x` and
    /// whose bounding box starts at `origin_y`.
    pub fn corners(&self, center_x: f64, origin_y: f64) -> [Point; 4] {
        let top = origin_y + self.y_top;
        let bottom = origin_y + self.y_bottom;
        [
            Point::new(center_x - self.width_top / 2.0, top),
            Point::new(center_x + self.width_top / 2.0, top),
            Point::new(center_x + self.width_bottom / 2.0, bottom),
            Point::new(center_x - self.width_bottom / 2.0, bottom),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SegmentGeometry {
    Trapezoid(Trapezoid),
    /// `radius` is the circle radius, the square's side, or the hexagon's circumradius.
    /// `clamped` marks a nonzero weight raised to the minimum visible extent.
    Radial {
        shape: Shape,
        radius: f64,
        clamped: bool,
    },
    Cell(Rect),
}

impl SegmentGeometry {
    pub fn area(&self) -> f64 {
        match self {
            SegmentGeometry::Trapezoid(t) => t.area(),
            SegmentGeometry::Radial { shape, radius, .. } => shape.area(*radius),
            SegmentGeometry::Cell(rect) => rect.area(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionSegment {
    pub item_id: String,
    pub order: usize,
    pub weight: f64,
    pub geometry: SegmentGeometry,
    /// Zero weight: nothing is drawn for this segment.
    pub zero_area: bool,
    /// The closed-form solve was replaced by a fallback for this segment.
    pub used_fallback: bool,
}

impl PartitionSegment {
    pub(crate) fn new(item: &WeightedItem, geometry: SegmentGeometry, zero_area: bool) -> Self {
        let used_fallback = match &geometry {
            SegmentGeometry::Trapezoid(t) => t.solve.is_fallback(),
            _ => false,
        };
        Self {
            item_id: item.id.clone(),
            order: item.order,
            weight: item.weight,
            geometry,
            zero_area,
            used_fallback,
        }
    }

    /// Drawn area; zero for zero-weight segments even when they keep a grid cell.
    pub fn area(&self) -> f64 {
        if self.zero_area {
            0.0
        } else {
            self.geometry.area()
        }
    }

    pub fn is_rendered(&self) -> bool {
        !self.zero_area
    }

    pub fn trapezoid(&self) -> Option<&Trapezoid> {
        match &self.geometry {
            SegmentGeometry::Trapezoid(t) => Some(t),
            _ => None,
        }
    }

    pub fn radius(&self) -> Option<f64> {
        match self.geometry {
            SegmentGeometry::Radial { radius, .. } => Some(radius),
            _ => None,
        }
    }

    pub fn cell(&self) -> Option<Rect> {
        match self.geometry {
            SegmentGeometry::Cell(rect) => Some(rect),
            _ => None,
        }
    }
}
