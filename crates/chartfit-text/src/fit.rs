//! Label fitting: shrink, wrap and truncate a label into a box.
//!
//! The steps run in a fixed order and stop at the first one that satisfies the box:
//!
//! 1. measure at the requested size (no-op when it already fits),
//! 2. greedy word wrap (when allowed),
//! 3. shrink in fixed decrements down to the minimum font size,
//! 4. truncate with an ellipsis at the minimum size (when allowed),
//! 5. give up and report the label as hidden.

use crate::measure::{HeuristicTextMeasurer, TextMeasurer, TextStyle};
use crate::wrap::wrap_words;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Slack for fit comparisons, so a box derived from a measured width still holds that text.
pub(crate) const FIT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBox {
    pub width: f64,
    #[serde(default)]
    pub height: Option<f64>,
}

impl LabelBox {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            height: None,
        }
    }

    pub fn with_height(width: f64, height: f64) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }

    pub fn fits_width(&self, width: f64) -> bool {
        width <= self.width + FIT_EPSILON
    }

    pub fn fits_height(&self, height: f64) -> bool {
        self.height.is_none_or(|h| height <= h + FIT_EPSILON)
    }

    /// `true` when no label can ever fit (non-positive or NaN dimension).
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0) || self.height.is_some_and(|h| !(h > 0.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSpec {
    pub text: String,
    pub style: TextStyle,
    /// `None` means the label is measured unconstrained.
    #[serde(default)]
    pub constraint: Option<LabelBox>,
}

impl LabelSpec {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            constraint: None,
        }
    }

    pub fn with_box(mut self, constraint: LabelBox) -> Self {
        self.constraint = Some(constraint);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitOptions {
    pub min_font_size: f64,
    /// Font-size decrement per shrink step, in px.
    pub shrink_step: f64,
    pub allow_wrap: bool,
    pub allow_truncate: bool,
    pub max_lines: usize,
    pub ellipsis: String,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_font_size: 8.0,
            shrink_step: 1.0,
            allow_wrap: true,
            allow_truncate: true,
            max_lines: 2,
            ellipsis: "\u{2026}".to_string(),
        }
    }
}

impl FitOptions {
    /// Effective line limit: `max_lines` (at least 1) when wrapping, otherwise 1.
    pub fn line_limit(&self) -> usize {
        if self.allow_wrap {
            self.max_lines.max(1)
        } else {
            1
        }
    }

    fn min_size(&self) -> f64 {
        self.min_font_size.max(1.0)
    }

    fn step(&self) -> f64 {
        if self.shrink_step.is_finite() && self.shrink_step > 0.0 {
            self.shrink_step
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResult {
    pub lines: Vec<String>,
    pub font_size: f64,
    pub width: f64,
    pub height: f64,
    pub truncated: bool,
    /// Nothing fits, not even a lone ellipsis; render nothing.
    pub hidden: bool,
    /// Still wider/taller than the box because truncation was disabled.
    pub overflowing: bool,
}

impl FitResult {
    pub fn hidden(font_size: f64) -> Self {
        Self {
            lines: Vec::new(),
            font_size,
            width: 0.0,
            height: 0.0,
            truncated: false,
            hidden: true,
            overflowing: false,
        }
    }

    fn empty(font_size: f64) -> Self {
        Self {
            hidden: false,
            ..Self::hidden(font_size)
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden && !self.lines.is_empty()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

struct Candidate {
    lines: Vec<String>,
    complete: bool,
    width: f64,
    height: f64,
    fits: bool,
}

struct Fitter<'a> {
    measurer: &'a dyn TextMeasurer,
    text: &'a str,
    style: &'a TextStyle,
    bx: LabelBox,
    opts: &'a FitOptions,
    line_limit: usize,
}

impl Fitter<'_> {
    fn style_at(&self, font_size: f64) -> TextStyle {
        self.style.with_font_size(font_size)
    }

    fn block_size(&self, lines: &[String], style: &TextStyle) -> (f64, f64) {
        let mut width = 0.0f64;
        let mut height = 0.0f64;
        for line in lines {
            let m = self.measurer.measure(line, style);
            width = width.max(m.width);
            height += m.height;
        }
        (width, height)
    }

    fn height_ok(&self, height: f64) -> bool {
        self.bx.fits_height(height)
    }

    fn candidate(&self, font_size: f64) -> Candidate {
        let style = self.style_at(font_size);
        let (lines, complete) = if self.opts.allow_wrap {
            let wrapped = wrap_words(
                self.text,
                self.measurer,
                &style,
                self.bx.width,
                self.line_limit,
            );
            (wrapped.lines, wrapped.complete)
        } else {
            let hard = HeuristicTextMeasurer::normalized_text_lines(self.text);
            let complete = hard.len() <= 1;
            (vec![hard[0].to_string()], complete)
        };
        let (width, height) = self.block_size(&lines, &style);
        let fits = complete && self.bx.fits_width(width) && self.height_ok(height);
        Candidate {
            lines,
            complete,
            width,
            height,
            fits,
        }
    }

    fn accept(candidate: Candidate, font_size: f64) -> FitResult {
        FitResult {
            lines: candidate.lines,
            font_size,
            width: candidate.width,
            height: candidate.height,
            truncated: false,
            hidden: false,
            overflowing: false,
        }
    }

    fn truncate_line(&self, line: &str, style: &TextStyle, force: bool) -> Option<String> {
        let chars: Vec<char> = line.chars().collect();
        let start = if force {
            chars.len()
        } else {
            chars.len().saturating_sub(1)
        };
        for keep in (0..=start).rev() {
            let head: String = chars[..keep].iter().collect();
            let candidate = format!("{}{}", head.trim_end(), self.opts.ellipsis);
            if self.bx.fits_width(self.measurer.measure(&candidate, style).width) {
                return Some(candidate);
            }
        }
        None
    }

    fn truncate(&self, candidate: Candidate, font_size: f64) -> FitResult {
        let style = self.style_at(font_size);
        let ellipsis = self.measurer.measure(&self.opts.ellipsis, &style);
        if !self.bx.fits_width(ellipsis.width) {
            return FitResult::hidden(font_size);
        }

        let mut allowed = self.line_limit;
        if let Some(h) = self.bx.height {
            let line_height = ellipsis.height.max(f64::EPSILON);
            allowed = allowed.min(((h + FIT_EPSILON) / line_height).floor() as usize);
        }
        if allowed == 0 {
            return FitResult::hidden(font_size);
        }

        let mut lines = candidate.lines;
        let dropped_rows = !candidate.complete || lines.len() > allowed;
        lines.truncate(allowed);
        let last = lines.len().saturating_sub(1);

        for (idx, line) in lines.iter_mut().enumerate() {
            let force = dropped_rows && idx == last;
            if !force && self.bx.fits_width(self.measurer.measure(line, &style).width) {
                continue;
            }
            match self.truncate_line(line, &style, force) {
                Some(shortened) => *line = shortened,
                None => return FitResult::hidden(font_size),
            }
        }

        let (width, height) = self.block_size(&lines, &style);
        if !self.height_ok(height) {
            return FitResult::hidden(font_size);
        }
        FitResult {
            lines,
            font_size,
            width,
            height,
            truncated: true,
            hidden: false,
            overflowing: false,
        }
    }
}

/// Fits `text` into `bx`, shrinking, wrapping and truncating as allowed by `opts`.
///
/// The returned font size is never below `opts.min_font_size` (a smaller requested size is
/// raised to it) and the result never has more than [`FitOptions::line_limit`] lines.
pub fn fit_label(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    bx: LabelBox,
    opts: &FitOptions,
) -> FitResult {
    let min_size = opts.min_size();
    let requested = if style.font_size.is_finite() {
        style.font_size.max(min_size)
    } else {
        min_size
    };

    if bx.is_degenerate() {
        return FitResult::hidden(requested);
    }
    if text.is_empty() {
        return FitResult::empty(requested);
    }

    let fitter = Fitter {
        measurer,
        text,
        style,
        bx,
        opts,
        line_limit: opts.line_limit(),
    };

    let full = fitter.style_at(requested);
    let m = measurer.measure(text, &full);
    if m.line_count <= fitter.line_limit && bx.fits_width(m.width) && fitter.height_ok(m.height) {
        return FitResult {
            lines: HeuristicTextMeasurer::normalized_text_lines(text)
                .into_iter()
                .map(str::to_string)
                .collect(),
            font_size: requested,
            width: m.width,
            height: m.height,
            truncated: false,
            hidden: false,
            overflowing: false,
        };
    }

    if opts.allow_wrap {
        let wrapped = fitter.candidate(requested);
        if wrapped.fits {
            return Fitter::accept(wrapped, requested);
        }
    }

    let step = opts.step();
    let steps = ((requested - min_size) / step).ceil().max(0.0) as usize;
    for i in 1..=steps {
        let size = (requested - i as f64 * step).max(min_size);
        let candidate = fitter.candidate(size);
        if candidate.fits {
            return Fitter::accept(candidate, size);
        }
    }

    let at_min = fitter.candidate(min_size);
    if opts.allow_truncate {
        let out = fitter.truncate(at_min, min_size);
        if out.hidden {
            tracing::trace!(text, box_width = bx.width, "label hidden: not even an ellipsis fits");
        }
        return out;
    }

    FitResult {
        lines: at_min.lines,
        font_size: min_size,
        width: at_min.width,
        height: at_min.height,
        truncated: false,
        hidden: false,
        overflowing: true,
    }
}
