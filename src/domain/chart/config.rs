use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::value_objects::{Margin, TooltipTrigger, ViewportInset};
use crate::domain::census::{AxisField, XField, YField};
use crate::domain::errors::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub opacity: f64,
    pub font_family: String,
    pub font_size_px: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 15.0,
            fill: "aqua".to_string(),
            stroke: "black".to_string(),
            opacity: 0.75,
            font_family: "sans-serif".to_string(),
            font_size_px: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    pub trigger: TooltipTrigger,
    /// `(down, right)` shift from the marker, in pixels.
    pub offset: (f64, f64),
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self { trigger: TooltipTrigger::Hover, offset: (50.0, 90.0) }
    }
}

/// Everything about the chart that is fixed for the page's lifetime.
///
/// Missing JSON keys fall back to the selectable preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub data_url: String,
    /// CSS selector of the element the surface is appended to.
    pub container: String,
    pub viewport_inset: ViewportInset,
    pub margin: Margin,
    /// Axis and marker animation length; 0 draws without animation.
    pub transition_ms: u32,
    pub x_candidates: Vec<XField>,
    pub y_candidates: Vec<YField>,
    pub default_x: XField,
    pub default_y: YField,
    pub marker: MarkerStyle,
    pub tooltip: TooltipStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::selectable()
    }
}

impl ChartConfig {
    /// Three switchable fields per axis with animated transitions.
    pub fn selectable() -> Self {
        Self {
            data_url: "assets/data/data.csv".to_string(),
            container: "#scatter".to_string(),
            viewport_inset: ViewportInset { width: 500.0, height: 200.0 },
            margin: Margin { top: 20.0, right: 40.0, bottom: 80.0, left: 100.0 },
            transition_ms: 2000,
            x_candidates: vec![XField::Poverty, XField::Income, XField::Age],
            y_candidates: vec![YField::Healthcare, YField::Obesity, YField::Smokes],
            default_x: XField::DEFAULT,
            default_y: YField::DEFAULT,
            marker: MarkerStyle::default(),
            tooltip: TooltipStyle::default(),
        }
    }

    /// Poverty against healthcare only, drawn once, tooltips on click.
    pub fn fixed() -> Self {
        Self {
            viewport_inset: ViewportInset { width: 500.0, height: 150.0 },
            margin: Margin { top: 20.0, right: 40.0, bottom: 60.0, left: 100.0 },
            transition_ms: 0,
            x_candidates: vec![XField::Poverty],
            y_candidates: vec![YField::Healthcare],
            marker: MarkerStyle {
                radius: 16.0,
                opacity: 1.0,
                font_family: "calibri".to_string(),
                font_size_px: 12.0,
                ..MarkerStyle::default()
            },
            tooltip: TooltipStyle { trigger: TooltipTrigger::Click, offset: (40.0, 80.0) },
            ..Self::selectable()
        }
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_candidates(&self.x_candidates, self.default_x)?;
        validate_candidates(&self.y_candidates, self.default_y)?;
        if !(self.marker.radius >= 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "marker radius must be non-negative, got {}",
                self.marker.radius
            )));
        }
        Ok(())
    }
}

fn validate_candidates<F: AxisField + std::hash::Hash>(candidates: &[F], default: F) -> ChartResult<()> {
    if candidates.is_empty() {
        return Err(ChartError::InvalidConfig(format!("no {} axis candidates", F::SIDE)));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = candidates.iter().find(|c| !seen.insert(**c)) {
        return Err(ChartError::InvalidConfig(format!("duplicate {} axis candidate {}", F::SIDE, dup)));
    }
    if !candidates.contains(&default) {
        return Err(ChartError::InvalidConfig(format!(
            "default {} axis {} is not a candidate",
            F::SIDE,
            default
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(ChartConfig::selectable().validate().is_ok());
        assert!(ChartConfig::fixed().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ChartConfig::from_json(r#"{"transition_ms": 500, "tooltip": {"trigger": "click"}}"#)
            .expect("valid json");
        assert_eq!(config.transition_ms, 500);
        assert_eq!(config.tooltip.trigger, TooltipTrigger::Click);
        assert_eq!(config.tooltip.offset, (50.0, 90.0));
        assert_eq!(config.x_candidates.len(), 3);
    }

    #[test]
    fn default_outside_candidates_is_rejected() {
        let result = ChartConfig::from_json(r#"{"x_candidates": ["income"], "default_x": "poverty"}"#);
        assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        let result = ChartConfig::from_json(r#"{"y_candidates": ["poverty"]}"#);
        assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn duplicate_candidates_are_rejected() {
        let mut config = ChartConfig::selectable();
        config.y_candidates.push(YField::Smokes);
        assert!(config.validate().is_err());
    }
}
