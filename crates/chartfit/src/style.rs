use chartfit_text::TextStyle;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_FAMILY: &str = "\"trebuchet ms\", verdana, arial, sans-serif";

/// Fonts per text role, resolved by the caller before layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolvedStyle {
    pub category_label: TextStyle,
    /// Formatted data values drawn inside their segment.
    pub value_label: TextStyle,
    pub title: TextStyle,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            category_label: TextStyle {
                font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
                font_size: 12.0,
                font_weight: None,
            },
            value_label: TextStyle {
                font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
                font_size: 11.0,
                font_weight: None,
            },
            title: TextStyle {
                font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
                font_size: 18.0,
                font_weight: Some("bold".to_string()),
            },
        }
    }
}
