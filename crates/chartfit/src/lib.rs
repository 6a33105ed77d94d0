#![forbid(unsafe_code)]

//! Headless adaptive chart layout.
//!
//! [`layout_chart`] turns categories and values into plot margins sized from the measured
//! labels, one area-proportional segment per value, and labels fitted to the space they get.
//! Text measurement is injected through [`LayoutOptions`], so the same layout runs against a
//! real font database or the deterministic heuristic.

pub mod chart;
pub mod config;
pub mod margins;
pub mod model;
pub mod style;

pub use chart::{layout_chart, layout_chart_json, weighted_items};
pub use chartfit_geom as geom;
pub use chartfit_text as text;
pub use config::LayoutConfig;
pub use margins::{LayoutMargins, MarginSolver, Side, SideLabels};
pub use model::{
    ChartInput, ChartLayout, DataPoint, LabelRole, LabelSide, PartitionMode, PlacedSegment,
    PositionedLabel, SortOrder, TextAnchor,
};
pub use style::{DEFAULT_FONT_FAMILY, ResolvedStyle};

use chartfit_text::{TextMeasurer, TieredTextMeasurer};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] chartfit_geom::Error),
    #[error("invalid layout config: {message}")]
    InvalidConfig { message: String },
    #[error("chart input JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub config: LayoutConfig,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(TieredTextMeasurer::heuristic_only()),
            config: LayoutConfig::default(),
        }
    }
}

impl LayoutOptions {
    pub fn with_measurer(text_measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        Self {
            text_measurer,
            ..Self::default()
        }
    }

    /// Replaces the config with the `layout` section of an effective config value.
    pub fn with_effective_config(mut self, effective_config: &Value) -> Self {
        self.config = LayoutConfig::from_effective_config(effective_config);
        self
    }

    /// Measures with the system fonts, falling back to the heuristic for unknown glyphs.
    #[cfg(feature = "fontdb")]
    pub fn with_system_fonts() -> Self {
        let native = chartfit_text::FontDbTextMeasurer::with_system_fonts();
        Self::with_measurer(Arc::new(TieredTextMeasurer::new(native)))
    }
}
