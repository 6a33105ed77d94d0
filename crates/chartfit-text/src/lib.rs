#![forbid(unsafe_code)]

//! Headless text measurement and label fitting.
//!
//! Measurement goes through the [`TextMeasurer`] trait so the same layout code runs against a
//! real font database (`fontdb` feature) or the deterministic [`HeuristicTextMeasurer`].
//! [`fit_label`] shrinks, wraps and truncates a label until it fits a box.

pub mod cache;
pub mod fit;
#[cfg(feature = "fontdb")]
pub mod fontdb;
pub mod measure;
pub mod wrap;

pub use cache::CachedTextMeasurer;
pub use fit::{FitOptions, FitResult, LabelBox, LabelSpec, fit_label};
#[cfg(feature = "fontdb")]
pub use fontdb::FontDbTextMeasurer;
pub use measure::{
    HeuristicTextMeasurer, MetricsSource, NativeTextMeasurer, NoNativeBackend, TextMeasurer,
    TextMetrics, TextStyle, TieredTextMeasurer,
};
