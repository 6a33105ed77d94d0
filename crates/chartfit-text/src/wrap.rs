//! Greedy word wrapping driven by a [`TextMeasurer`].

use crate::fit::FIT_EPSILON;
use crate::measure::{HeuristicTextMeasurer, TextMeasurer, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLines {
    pub lines: Vec<String>,
    /// `false` when wrapping stopped at the line limit with words left over.
    pub complete: bool,
}

/// Wraps `text` into lines no wider than `max_width_px`, accepting at most `max_lines` lines.
///
/// Words are separated by whitespace (runs collapse to one space); `\n` is a hard break. A word
/// wider than `max_width_px` is placed on its own line and left overflowing; callers decide
/// whether to shrink or truncate.
pub fn wrap_words(
    text: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
    max_lines: usize,
) -> WrappedLines {
    let max_lines = max_lines.max(1);
    let mut out: Vec<String> = Vec::new();

    let hard_lines = HeuristicTextMeasurer::normalized_text_lines(text);
    let hard_count = hard_lines.len();
    for (hard_idx, hard_line) in hard_lines.into_iter().enumerate() {
        let words = hard_line.split_whitespace();
        let mut cur = String::new();

        for word in words {
            let candidate = if cur.is_empty() {
                word.to_string()
            } else {
                format!("{cur} {word}")
            };
            if cur.is_empty() || measurer.measure(&candidate, style).width <= max_width_px + FIT_EPSILON {
                cur = candidate;
                continue;
            }

            if out.len() + 1 == max_lines {
                out.push(cur);
                return WrappedLines {
                    lines: out,
                    complete: false,
                };
            }
            out.push(std::mem::replace(&mut cur, word.to_string()));
        }

        let more_follow = hard_idx + 1 < hard_count;
        if out.len() + 1 == max_lines && more_follow {
            out.push(cur);
            return WrappedLines {
                lines: out,
                complete: false,
            };
        }
        out.push(cur);
    }

    WrappedLines {
        lines: out,
        complete: true,
    }
}
