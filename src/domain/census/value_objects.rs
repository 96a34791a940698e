use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoEnumIterator};

use super::entities::CensusRecord;
use crate::domain::chart::value_objects::AxisSide;

/// Value Object - one of the six numeric survey columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum NumericField {
    #[display(fmt = "poverty")]
    Poverty,
    #[display(fmt = "income")]
    Income,
    #[display(fmt = "age")]
    Age,
    #[display(fmt = "healthcare")]
    Healthcare,
    #[display(fmt = "obesity")]
    Obesity,
    #[display(fmt = "smokes")]
    Smokes,
}

impl NumericField {
    pub fn of(self, record: &CensusRecord) -> f64 {
        match self {
            NumericField::Poverty => record.poverty,
            NumericField::Income => record.income,
            NumericField::Age => record.age,
            NumericField::Healthcare => record.healthcare,
            NumericField::Obesity => record.obesity,
            NumericField::Smokes => record.smokes,
        }
    }
}

/// A field that may drive one axis of the scatter plot.
///
/// Each axis has its own closed candidate enum, so an x choice can never be
/// handed to the y slot by mistake.
pub trait AxisField:
    Copy + Eq + std::fmt::Debug + std::fmt::Display + FromStr + IntoEnumIterator + 'static
{
    const SIDE: AxisSide;
    const DEFAULT: Self;

    fn numeric(self) -> NumericField;

    /// Prefix shown before the value inside a tooltip.
    fn tooltip_prefix(self) -> &'static str;

    /// Text of the clickable axis label.
    fn label_text(self) -> &'static str;

    fn value(self, record: &CensusRecord) -> f64 {
        self.numeric().of(record)
    }

    /// Parse a host-supplied name; anything outside the enum is rejected.
    fn parse(name: &str) -> Result<Self, crate::domain::errors::ChartError> {
        Self::from_str(name).map_err(|_| crate::domain::errors::ChartError::InvalidAxisChoice {
            axis: Self::SIDE,
            value: name.to_string(),
        })
    }
}

/// Candidates for the horizontal axis
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum XField {
    #[display(fmt = "poverty")]
    Poverty,
    #[display(fmt = "income")]
    Income,
    #[display(fmt = "age")]
    Age,
}

impl AxisField for XField {
    const SIDE: AxisSide = AxisSide::Bottom;
    const DEFAULT: Self = XField::Poverty;

    fn numeric(self) -> NumericField {
        match self {
            XField::Poverty => NumericField::Poverty,
            XField::Income => NumericField::Income,
            XField::Age => NumericField::Age,
        }
    }

    fn tooltip_prefix(self) -> &'static str {
        match self {
            XField::Poverty => "Poverty (%): ",
            XField::Income => "Median Income: ",
            XField::Age => "Age: ",
        }
    }

    fn label_text(self) -> &'static str {
        match self {
            XField::Poverty => "% in Poverty",
            XField::Income => "Income (Median)",
            XField::Age => "Age (Median)",
        }
    }
}

/// Candidates for the vertical axis
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum YField {
    #[display(fmt = "healthcare")]
    Healthcare,
    #[display(fmt = "obesity")]
    Obesity,
    #[display(fmt = "smokes")]
    Smokes,
}

impl AxisField for YField {
    const SIDE: AxisSide = AxisSide::Left;
    const DEFAULT: Self = YField::Healthcare;

    fn numeric(self) -> NumericField {
        match self {
            YField::Healthcare => NumericField::Healthcare,
            YField::Obesity => NumericField::Obesity,
            YField::Smokes => NumericField::Smokes,
        }
    }

    fn tooltip_prefix(self) -> &'static str {
        match self {
            YField::Healthcare => "Lacks Healthcare (%): ",
            YField::Obesity => "Obesity (%): ",
            YField::Smokes => "Smokers (%): ",
        }
    }

    fn label_text(self) -> &'static str {
        match self {
            YField::Healthcare => "Lacks Healthcare (%)",
            YField::Obesity => "Obese (%)",
            YField::Smokes => "Smoker (%)",
        }
    }
}

/// A typed selection request carried by a label control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AxisRequest {
    #[display(fmt = "x={}", _0)]
    X(XField),
    #[display(fmt = "y={}", _0)]
    Y(YField),
}

impl From<XField> for AxisRequest {
    fn from(field: XField) -> Self {
        AxisRequest::X(field)
    }
}

impl From<YField> for AxisRequest {
    fn from(field: YField) -> Self {
        AxisRequest::Y(field)
    }
}
