use crate::{Error, Result};
use chartfit_text::FitOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Layout tunables shared by every chart mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub min_font_size: f64,
    pub shrink_step: f64,
    pub max_lines: usize,
    pub allow_wrap: bool,
    pub allow_truncate: bool,
    /// Upper bound for each pair of opposite margins, as a fraction of the canvas dimension.
    pub margin_cap_ratio: f64,
    /// Fixed space reserved next to side labels for a legend marker or icon.
    pub marker_allowance: f64,
    pub min_visible_extent: f64,
    /// Gap between a small-multiple shape and its label.
    pub label_gap: f64,
    pub ellipsis: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_font_size: 8.0,
            shrink_step: 1.0,
            max_lines: 2,
            allow_wrap: true,
            allow_truncate: true,
            margin_cap_ratio: 0.45,
            marker_allowance: 0.0,
            min_visible_extent: 2.0,
            label_gap: 4.0,
            ellipsis: "\u{2026}".to_string(),
        }
    }
}

fn json_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_i64().map(|n| n as f64))
        .or_else(|| v.as_u64().map(|n| n as f64))
}

fn config_value<'a>(cfg: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = cfg;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

fn config_f64(cfg: &Value, path: &[&str]) -> Option<f64> {
    config_value(cfg, path).and_then(json_f64)
}

fn config_bool(cfg: &Value, path: &[&str]) -> Option<bool> {
    config_value(cfg, path)?.as_bool()
}

fn config_string(cfg: &Value, path: &[&str]) -> Option<String> {
    config_value(cfg, path)?.as_str().map(|s| s.to_string())
}

impl LayoutConfig {
    /// Reads the `layout` section of an already-resolved effective config.
    ///
    /// Missing or mistyped keys keep their defaults.
    pub fn from_effective_config(effective_config: &Value) -> Self {
        let d = Self::default();
        let max_lines = config_f64(effective_config, &["layout", "maxLines"])
            .filter(|v| v.is_finite() && *v >= 1.0)
            .map(|v| v as usize)
            .unwrap_or(d.max_lines);

        Self {
            min_font_size: config_f64(effective_config, &["layout", "minFontSize"])
                .unwrap_or(d.min_font_size),
            shrink_step: config_f64(effective_config, &["layout", "shrinkStep"])
                .unwrap_or(d.shrink_step),
            max_lines,
            allow_wrap: config_bool(effective_config, &["layout", "allowWrap"])
                .unwrap_or(d.allow_wrap),
            allow_truncate: config_bool(effective_config, &["layout", "allowTruncate"])
                .unwrap_or(d.allow_truncate),
            margin_cap_ratio: config_f64(effective_config, &["layout", "marginCapRatio"])
                .unwrap_or(d.margin_cap_ratio),
            marker_allowance: config_f64(effective_config, &["layout", "markerAllowance"])
                .unwrap_or(d.marker_allowance),
            min_visible_extent: config_f64(effective_config, &["layout", "minVisibleExtent"])
                .unwrap_or(d.min_visible_extent),
            label_gap: config_f64(effective_config, &["layout", "labelGap"])
                .unwrap_or(d.label_gap),
            ellipsis: config_string(effective_config, &["layout", "ellipsis"])
                .unwrap_or(d.ellipsis),
        }
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(message: String) -> Result<()> {
            Err(Error::InvalidConfig { message })
        }

        if !(self.min_font_size.is_finite() && self.min_font_size > 0.0) {
            return invalid(format!("minFontSize must be positive (got {})", self.min_font_size));
        }
        if !(self.shrink_step.is_finite() && self.shrink_step > 0.0) {
            return invalid(format!("shrinkStep must be positive (got {})", self.shrink_step));
        }
        if !(self.margin_cap_ratio > 0.0 && self.margin_cap_ratio <= 0.5) {
            return invalid(format!(
                "marginCapRatio must be in (0, 0.5] (got {})",
                self.margin_cap_ratio
            ));
        }
        for (name, v) in [
            ("markerAllowance", self.marker_allowance),
            ("minVisibleExtent", self.min_visible_extent),
            ("labelGap", self.label_gap),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return invalid(format!("{name} must be a non-negative number (got {v})"));
            }
        }
        Ok(())
    }

    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            min_font_size: self.min_font_size,
            shrink_step: self.shrink_step,
            allow_wrap: self.allow_wrap,
            allow_truncate: self.allow_truncate,
            max_lines: self.max_lines,
            ellipsis: self.ellipsis.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn effective_config_overrides_defaults() {
        let cfg = json!({
            "layout": {
                "minFontSize": 10,
                "maxLines": 3,
                "allowTruncate": false,
                "ellipsis": "..."
            }
        });
        let c = LayoutConfig::from_effective_config(&cfg);
        assert_eq!(c.min_font_size, 10.0);
        assert_eq!(c.max_lines, 3);
        assert!(!c.allow_truncate);
        assert_eq!(c.ellipsis, "...");
        assert_eq!(c.margin_cap_ratio, 0.45);
    }

    #[test]
    fn mistyped_keys_keep_defaults() {
        let cfg = json!({ "layout": { "minFontSize": "big", "maxLines": 0 } });
        let c = LayoutConfig::from_effective_config(&cfg);
        assert_eq!(c, LayoutConfig::default());
    }

    #[test]
    fn serde_fills_missing_fields() {
        let c: LayoutConfig = serde_json::from_value(json!({ "labelGap": 6 })).unwrap();
        assert_eq!(c.label_gap, 6.0);
        assert_eq!(c.min_font_size, 8.0);
    }

    #[test]
    fn validation_rejects_out_of_range_cap() {
        let c = LayoutConfig {
            margin_cap_ratio: 0.8,
            ..LayoutConfig::default()
        };
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("marginCapRatio"));
        assert!(LayoutConfig::default().validate().is_ok());
    }
}
