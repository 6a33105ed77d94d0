//! Plot-area margins derived from measured label extents.
//!
//! Each side is solved on its own: worst-case label extent + base padding, plus the marker
//! allowance on the left/right sides where legend markers sit next to category labels.
//! Opposite sides are then capped together so that, e.g., `left + right` never exceeds
//! `margin_cap_ratio` of the canvas width. Labels that no longer fit after capping are shrunk
//! or truncated by the label fitter when they are placed.

use crate::Result;
use crate::config::LayoutConfig;
use chartfit_geom::Rect;
use chartfit_geom::error::{non_negative_dimension, positive_dimension};
use chartfit_text::{FitOptions, LabelSpec, TextMeasurer, fit_label};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Left/right sides hold vertically stacked labels, so their width is what counts.
    pub fn stacks_vertically(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideLabels {
    pub top: Vec<LabelSpec>,
    pub right: Vec<LabelSpec>,
    pub bottom: Vec<LabelSpec>,
    pub left: Vec<LabelSpec>,
}

impl SideLabels {
    pub fn get(&self, side: Side) -> &[LabelSpec] {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Vec<LabelSpec> {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    /// `left + right` hit the cap and was scaled down.
    pub clamped_horizontal: bool,
    /// `top + bottom` hit the cap and was scaled down.
    pub clamped_vertical: bool,
}

impl LayoutMargins {
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub fn inner_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.inner_width, self.inner_height)
    }
}

/// Scales `(a, b)` down proportionally so that `a + b <= limit`.
fn cap_pair(a: f64, b: f64, limit: f64) -> (f64, f64, bool) {
    let sum = a + b;
    if sum <= limit || sum <= 0.0 {
        return (a, b, false);
    }
    let scale = limit / sum;
    (a * scale, b * scale, true)
}

pub struct MarginSolver<'a> {
    measurer: &'a dyn TextMeasurer,
    fit: FitOptions,
    marker_allowance: f64,
    cap_ratio: f64,
}

impl<'a> MarginSolver<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer, config: &LayoutConfig) -> Self {
        Self {
            measurer,
            fit: config.fit_options(),
            marker_allowance: config.marker_allowance,
            cap_ratio: config.margin_cap_ratio,
        }
    }

    /// The extent a label needs on `side`: its width on left/right, its height on top/bottom.
    ///
    /// Boxed labels are fitted first, so the extent is that of the fitted block.
    pub fn label_extent(&self, label: &LabelSpec, side: Side) -> f64 {
        let (width, height) = match label.constraint {
            Some(bx) => {
                let fit = fit_label(self.measurer, &label.text, &label.style, bx, &self.fit);
                (fit.width, fit.height)
            }
            None if label.text.is_empty() => (0.0, 0.0),
            None => {
                let m = self.measurer.measure(&label.text, &label.style);
                (m.width, m.height)
            }
        };
        if side.stacks_vertically() {
            width
        } else {
            height
        }
    }

    /// Margin for one side: `base_padding` alone when there are no labels, otherwise
    /// `base_padding + worst-case label extent`, plus `marker_allowance` on left/right.
    pub fn compute_margin(&self, labels: &[LabelSpec], side: Side, base_padding: f64) -> f64 {
        if labels.is_empty() {
            return base_padding;
        }
        let worst = labels
            .iter()
            .map(|label| self.label_extent(label, side))
            .fold(0.0f64, f64::max);
        base_padding + self.allowance(side) + worst
    }

    /// Space reserved for a legend marker beside the labels on `side`.
    pub fn allowance(&self, side: Side) -> f64 {
        if side.stacks_vertically() {
            self.marker_allowance
        } else {
            0.0
        }
    }

    /// Solves all four sides independently, then caps opposite pairs to the configured share of
    /// the canvas.
    pub fn solve_margins(
        &self,
        canvas_width: f64,
        canvas_height: f64,
        labels: &SideLabels,
        base_padding: f64,
    ) -> Result<LayoutMargins> {
        let canvas_width = positive_dimension("canvas_width", canvas_width)?;
        let canvas_height = positive_dimension("canvas_height", canvas_height)?;
        let base_padding = non_negative_dimension("base_padding", base_padding)?;

        let [top, right, bottom, left] =
            Side::ALL.map(|side| self.compute_margin(labels.get(side), side, base_padding));

        let (left, right, clamped_horizontal) =
            cap_pair(left, right, canvas_width * self.cap_ratio);
        let (top, bottom, clamped_vertical) =
            cap_pair(top, bottom, canvas_height * self.cap_ratio);
        if clamped_horizontal || clamped_vertical {
            tracing::debug!(
                clamped_horizontal,
                clamped_vertical,
                left,
                right,
                top,
                bottom,
                "margins capped; labels will be fitted into the remaining space"
            );
        }

        Ok(LayoutMargins {
            top,
            right,
            bottom,
            left,
            inner_width: (canvas_width - left - right).max(0.0),
            inner_height: (canvas_height - top - bottom).max(0.0),
            clamped_horizontal,
            clamped_vertical,
        })
    }
}
