use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Which ruler an axis is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum AxisSide {
    #[display(fmt = "x")]
    Bottom,
    #[display(fmt = "y")]
    Left,
}

/// Value Object - continuous value-to-pixel mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values covering the domain, stepping by 1, 2 or 5 × 10^k.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 || !d0.is_finite() || !d1.is_finite() {
            return Vec::new();
        }
        if d0 == d1 {
            return vec![d0];
        }
        let (start, stop) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
            return Vec::new();
        };
        let mut ticks: Vec<f64> = (i1..=i2)
            .map(|i| if inc < 0.0 { i as f64 / -inc } else { i as f64 * inc })
            .collect();
        if d1 < d0 {
            ticks.reverse();
        }
        ticks
    }

    /// Formats a tick with the precision implied by the tick step.
    pub fn tick_format(&self, count: usize, value: f64) -> String {
        let (d0, d1) = self.domain;
        let step = tick_step((d1 - d0).abs(), count as f64);
        let decimals = if step > 0.0 && step.is_finite() {
            (-step.log10().floor()).max(0.0) as usize
        } else {
            0
        };
        format_grouped(value, decimals)
    }
}

fn tick_step(span: f64, count: f64) -> f64 {
    let raw = span / count.max(1.0);
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    10f64.powf(power) * factor
}

/// `(first index, last index, increment)`; a negative increment means the
/// tick is `index / -inc`, which keeps fractional steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round() as i64;
        i2 = (stop * inv).round() as i64;
        if (i1 as f64) / inv < start {
            i1 += 1;
        }
        if (i2 as f64) / inv > stop {
            i2 -= 1;
        }
        inc = -inv;
    } else {
        let fwd = 10f64.powf(power) * factor;
        i1 = (start / fwd).round() as i64;
        i2 = (stop / fwd).round() as i64;
        if (i1 as f64) * fwd < start {
            i1 += 1;
        }
        if (i2 as f64) * fwd > stop {
            i2 -= 1;
        }
        inc = fwd;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i2 >= i1).then_some((i1, i2, inc))
}

/// Fixed decimals with `,` thousands separators: `40000` → `40,000`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let negative = value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Value Object - pixel position inside the chart group
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// How much of the window the page around the chart keeps for itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportInset {
    pub width: f64,
    pub height: f64,
}

/// Value Object - host window inner size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Value Object - surface and plotting-area sizes for one generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartDimensions {
    pub svg_width: f64,
    pub svg_height: f64,
    pub chart_width: f64,
    pub chart_height: f64,
    pub margin: Margin,
}

impl ChartDimensions {
    /// Sizes never go negative on tiny windows; the chart collapses instead.
    pub fn from_viewport(viewport: Viewport, inset: ViewportInset, margin: Margin) -> Self {
        let svg_width = (viewport.width - inset.width).max(0.0);
        let svg_height = (viewport.height - inset.height).max(0.0);
        Self {
            svg_width,
            svg_height,
            chart_width: (svg_width - margin.left - margin.right).max(0.0),
            chart_height: (svg_height - margin.top - margin.bottom).max(0.0),
            margin,
        }
    }

    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.chart_width)
    }

    /// Inverted so larger values plot higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.chart_height, 0.0)
    }

    pub fn range_for(&self, side: AxisSide) -> (f64, f64) {
        match side {
            AxisSide::Bottom => self.x_range(),
            AxisSide::Left => self.y_range(),
        }
    }
}

/// Where an axis label sits: a group anchor plus a per-label offset along
/// the stacking direction. Rotated labels read bottom-to-top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub anchor: Position,
    pub offset: f64,
    pub rotated: bool,
}

impl LabelPlacement {
    pub fn for_label(side: AxisSide, index: usize, dims: &ChartDimensions) -> Self {
        let step = 20.0 * (index as f64 + 1.0);
        match side {
            AxisSide::Bottom => Self {
                anchor: Position::new(dims.chart_width / 2.0, dims.chart_height + 10.0),
                offset: step,
                rotated: false,
            },
            AxisSide::Left => Self {
                anchor: Position::new(-dims.margin.left / 4.0, dims.chart_height / 2.0),
                offset: -step,
                rotated: true,
            },
        }
    }
}

/// What shows a marker's tooltip; leaving the marker always hides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    #[display(fmt = "hover")]
    Hover,
    #[display(fmt = "click")]
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AxisHandle(pub usize);

/// One circle plus its abbreviation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LabelHandle(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_cover_padded_domain_in_steps_of_two() {
        let scale = LinearScale::new((8.0, 24.0), (0.0, 100.0));
        assert_eq!(scale.ticks(10), vec![8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0]);
    }

    #[test]
    fn fractional_ticks_are_exact() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
    }

    #[test]
    fn reversed_domain_reverses_ticks() {
        let scale = LinearScale::new((10.0, 0.0), (0.0, 100.0));
        let ticks = scale.ticks(5);
        assert_eq!(ticks.first(), Some(&10.0));
        assert_eq!(ticks.last(), Some(&0.0));
    }

    #[test]
    fn apply_maps_linearly_and_inverts() {
        let scale = LinearScale::new((0.0, 10.0), (200.0, 0.0));
        assert_eq!(scale.apply(0.0), 200.0);
        assert_eq!(scale.apply(10.0), 0.0);
        assert_eq!(scale.apply(2.5), 150.0);
    }

    #[test]
    fn grouped_format() {
        assert_eq!(format_grouped(40000.0, 0), "40,000");
        assert_eq!(format_grouped(1234567.5, 1), "1,234,567.5");
        assert_eq!(format_grouped(-2500.0, 0), "-2,500");
        assert_eq!(format_grouped(12.0, 0), "12");
    }

    #[test]
    fn tick_format_uses_step_precision() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        assert_eq!(scale.tick_format(10, 0.3), "0.3");
        let income = LinearScale::new((30000.0, 90000.0), (0.0, 100.0));
        assert_eq!(income.tick_format(10, 40000.0), "40,000");
    }

    #[test]
    fn dimensions_subtract_inset_and_margins() {
        let dims = ChartDimensions::from_viewport(
            Viewport::new(1500.0, 900.0),
            ViewportInset { width: 500.0, height: 200.0 },
            Margin { top: 20.0, right: 40.0, bottom: 80.0, left: 100.0 },
        );
        assert_eq!(dims.svg_width, 1000.0);
        assert_eq!(dims.svg_height, 700.0);
        assert_eq!(dims.chart_width, 860.0);
        assert_eq!(dims.chart_height, 600.0);
        assert_eq!(dims.y_range(), (600.0, 0.0));
    }
}
