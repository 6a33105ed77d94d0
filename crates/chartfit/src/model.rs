use crate::margins::{LayoutMargins, Side};
use crate::style::ResolvedStyle;
use chartfit_geom::{Orientation, PartitionSegment, Point, Rect, SegmentGeometry, Shape};
use chartfit_text::FitResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub category: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionMode {
    #[default]
    Triangle,
    Circle,
    Square,
    Hexagon,
    Grid,
}

impl PartitionMode {
    /// The proportional shape drawn per item, for the small-multiples modes.
    pub fn shape(self) -> Option<Shape> {
        match self {
            PartitionMode::Circle => Some(Shape::Circle),
            PartitionMode::Square => Some(Shape::Square),
            PartitionMode::Hexagon => Some(Shape::Hexagon),
            PartitionMode::Triangle | PartitionMode::Grid => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    AsGiven,
    Ascending,
    Descending,
}

/// Side of the plot that holds the category labels of a triangular chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelSide {
    Left,
    #[default]
    Right,
}

impl From<LabelSide> for Side {
    fn from(value: LabelSide) -> Self {
        match value {
            LabelSide::Left => Side::Left,
            LabelSide::Right => Side::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartInput {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub base_padding: f64,
    pub mode: PartitionMode,
    pub orientation: Orientation,
    pub sort: SortOrder,
    pub data: Vec<DataPoint>,
    pub style: ResolvedStyle,
    pub label_side: LabelSide,
    pub title: Option<String>,
    /// Draw the formatted value inside each rendered segment.
    pub show_values: bool,
}

impl Default for ChartInput {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 400.0,
            base_padding: 10.0,
            mode: PartitionMode::default(),
            orientation: Orientation::default(),
            sort: SortOrder::default(),
            data: Vec::new(),
            style: ResolvedStyle::default(),
            label_side: LabelSide::default(),
            title: None,
            show_values: false,
        }
    }
}

impl ChartInput {
    pub fn new(canvas_width: f64, canvas_height: f64, mode: PartitionMode) -> Self {
        Self {
            canvas_width,
            canvas_height,
            mode,
            ..Self::default()
        }
    }

    pub fn with_data<I, S>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.data = data
            .into_iter()
            .map(|(category, value)| DataPoint::new(category, value))
            .collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelRole {
    Category,
    Value,
    Title,
}

/// A fitted label anchored at `(x, y)`.
///
/// `x` follows `anchor`; `y` is the top of the first line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedLabel {
    pub item_id: Option<String>,
    pub role: LabelRole,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub fit: FitResult,
}

/// A partition segment translated into canvas coordinates.
///
/// For trapezoids `origin` is the silhouette's top-centre; for radial shapes it is the shape
/// centre; cells are already absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSegment {
    pub segment: PartitionSegment,
    pub origin: Point,
}

impl PlacedSegment {
    /// Polygon outline in canvas coordinates. Circles and zero-area segments have none.
    pub fn outline(&self) -> Vec<Point> {
        if self.segment.zero_area {
            return Vec::new();
        }
        let Point { x: cx, y: cy } = self.origin;
        match self.segment.geometry {
            SegmentGeometry::Trapezoid(t) => t.corners(cx, cy).to_vec(),
            SegmentGeometry::Radial {
                shape: Shape::Circle,
                ..
            } => Vec::new(),
            SegmentGeometry::Radial {
                shape: Shape::Square,
                radius,
                ..
            } => {
                let h = radius / 2.0;
                vec![
                    Point::new(cx - h, cy - h),
                    Point::new(cx + h, cy - h),
                    Point::new(cx + h, cy + h),
                    Point::new(cx - h, cy + h),
                ]
            }
            SegmentGeometry::Radial {
                shape: Shape::Hexagon,
                radius,
                ..
            } => (0..6)
                .map(|i| {
                    // Pointy-top: first vertex straight up.
                    let angle = std::f64::consts::FRAC_PI_3 * i as f64 - std::f64::consts::FRAC_PI_2;
                    Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
                })
                .collect(),
            SegmentGeometry::Cell(rect) => vec![
                Point::new(rect.x, rect.y),
                Point::new(rect.right(), rect.y),
                Point::new(rect.right(), rect.bottom()),
                Point::new(rect.x, rect.bottom()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub margins: LayoutMargins,
    pub plot: Rect,
    pub segments: Vec<PlacedSegment>,
    pub labels: Vec<PositionedLabel>,
}

impl ChartLayout {
    pub fn labels_for<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = &'a PositionedLabel> {
        self.labels
            .iter()
            .filter(move |label| label.item_id.as_deref() == Some(item_id))
    }

    pub fn title(&self) -> Option<&PositionedLabel> {
        self.labels
            .iter()
            .find(|label| label.role == LabelRole::Title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartfit_geom::{WeightedItem, size_proportional};

    fn placed(shape: Shape, weight: f64) -> PlacedSegment {
        let items = vec![WeightedItem::new("a", weight, 0), WeightedItem::new("b", 4.0, 1)];
        let segment = size_proportional(&items, shape, 10.0, 0.0)
            .unwrap()
            .remove(0);
        PlacedSegment {
            segment,
            origin: Point::new(50.0, 50.0),
        }
    }

    #[test]
    fn square_outline_is_centred() {
        let outline = placed(Shape::Square, 4.0).outline();
        assert_eq!(outline[0], Point::new(45.0, 45.0));
        assert_eq!(outline[2], Point::new(55.0, 55.0));
    }

    #[test]
    fn hexagon_outline_is_pointy_top() {
        let outline = placed(Shape::Hexagon, 4.0).outline();
        assert_eq!(outline.len(), 6);
        assert!((outline[0].x - 50.0).abs() < 1e-9);
        assert!((outline[0].y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn circles_and_zero_area_have_no_polygon() {
        assert!(placed(Shape::Circle, 4.0).outline().is_empty());
        assert!(placed(Shape::Square, 0.0).outline().is_empty());
    }

    #[test]
    fn partition_mode_uses_lowercase_names() {
        let mode: PartitionMode = serde_json::from_str("\"hexagon\"").unwrap();
        assert_eq!(mode, PartitionMode::Hexagon);
        assert_eq!(mode.shape(), Some(Shape::Hexagon));
        assert_eq!(PartitionMode::Grid.shape(), None);
    }
}
