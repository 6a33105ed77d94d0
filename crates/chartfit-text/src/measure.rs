use serde::{Deserialize, Serialize};

/// Fallback advance per character, in ems.
pub const HEURISTIC_CHAR_WIDTH_EM: f64 = 0.6;
/// Fallback line height, in ems.
pub const HEURISTIC_LINE_HEIGHT_EM: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn with_font_size(&self, font_size: f64) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }

    /// Numeric CSS weight (`400` for unset or unrecognized values).
    pub fn weight_number(&self) -> u16 {
        match self.font_weight.as_deref().map(str::trim) {
            None | Some("") | Some("normal") => 400,
            Some("bold") | Some("bolder") => 700,
            Some("lighter") => 300,
            Some(other) => other
                .parse::<u16>()
                .ok()
                .filter(|w| (1..=1000).contains(w))
                .unwrap_or(400),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

impl TextMetrics {
    pub const ZERO: TextMetrics = TextMetrics {
        width: 0.0,
        height: 0.0,
        line_count: 0,
    };
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// A backend that can measure from real font data, or decline.
///
/// Returning `None` (font not resolvable, missing glyph, unreadable face) hands the request to
/// the heuristic tier of [`TieredTextMeasurer`].
pub trait NativeTextMeasurer {
    fn try_measure(&self, text: &str, style: &TextStyle) -> Option<TextMetrics>;
}

/// The native tier used when no font backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNativeBackend;

impl NativeTextMeasurer for NoNativeBackend {
    fn try_measure(&self, _text: &str, _style: &TextStyle) -> Option<TextMetrics> {
        None
    }
}

/// Which tier produced a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricsSource {
    Native,
    Heuristic,
}

/// Fixed-advance measurer: `width = chars * font_size * 0.6`.
///
/// `font_size` is floored at 1px before the formula is applied, so sub-pixel and non-positive
/// sizes measure as 1px text rather than collapsing to zero width.
///
/// Deterministic and backend-free; it doubles as the fixed-width test measurer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: HEURISTIC_CHAR_WIDTH_EM,
            line_height_factor: HEURISTIC_LINE_HEIGHT_EM,
        }
    }
}

impl HeuristicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        text.split('\n').map(|l| l.trim_end_matches('\r')).collect()
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_chars = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        TextMetrics {
            width: max_chars as f64 * font_size * self.char_width_factor,
            height: lines.len() as f64 * font_size * self.line_height_factor,
            line_count: lines.len(),
        }
    }
}

/// Native measurement first, heuristic second.
///
/// The tier that answered is reported by [`TieredTextMeasurer::measure_with_source`].
#[derive(Debug, Clone, Default)]
pub struct TieredTextMeasurer<N = NoNativeBackend> {
    native: Option<N>,
    heuristic: HeuristicTextMeasurer,
}

impl TieredTextMeasurer<NoNativeBackend> {
    pub fn heuristic_only() -> Self {
        Self {
            native: None,
            heuristic: HeuristicTextMeasurer::default(),
        }
    }
}

impl<N: NativeTextMeasurer> TieredTextMeasurer<N> {
    pub fn new(native: N) -> Self {
        Self {
            native: Some(native),
            heuristic: HeuristicTextMeasurer::default(),
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicTextMeasurer) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn native(&self) -> Option<&N> {
        self.native.as_ref()
    }

    pub fn measure_with_source(&self, text: &str, style: &TextStyle) -> (TextMetrics, MetricsSource) {
        if let Some(metrics) = self
            .native
            .as_ref()
            .and_then(|native| native.try_measure(text, style))
        {
            return (metrics, MetricsSource::Native);
        }
        if self.native.is_some() {
            tracing::trace!(
                text,
                font_family = style.font_family.as_deref(),
                "native measurement unavailable; using heuristic advance"
            );
        }
        (self.heuristic.measure(text, style), MetricsSource::Heuristic)
    }
}

impl<N: NativeTextMeasurer> TextMeasurer for TieredTextMeasurer<N> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.measure_with_source(text, style).0
    }
}
