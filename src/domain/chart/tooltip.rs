use serde::Serialize;

use super::value_objects::MarkerHandle;
use crate::domain::census::{AxisField, CensusRecord, XField, YField};

/// Text shown for one marker: the state name, then one line per axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl TooltipContent {
    pub fn for_record(record: &CensusRecord, x: XField, y: YField) -> Self {
        Self {
            title: record.state.clone(),
            lines: vec![
                format!("{}{}", x.tooltip_prefix(), x.value(record)),
                format!("{}{}", y.tooltip_prefix(), y.value(record)),
            ],
        }
    }

    /// Newline separated, for `white-space: pre-line` overlays.
    pub fn text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.lines.iter().any(|l| l.contains(needle))
    }
}

/// Pairs a marker with the content its handlers will show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipBinding {
    pub marker: MarkerHandle,
    pub content: TooltipContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_uses_field_prefixes() {
        let record = CensusRecord {
            state: "Alabama".into(),
            abbr: "AL".into(),
            poverty: 19.3,
            income: 42830.0,
            age: 38.6,
            healthcare: 13.9,
            obesity: 33.5,
            smokes: 21.1,
        };
        let content = TooltipContent::for_record(&record, XField::Income, YField::Smokes);
        assert_eq!(content.text(), "Alabama\nMedian Income: 42830\nSmokers (%): 21.1");
    }
}
