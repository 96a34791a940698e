use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::value_objects::NumericField;

/// Domain entity - one state's survey row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusRecord {
    pub state: String,
    pub abbr: String,
    pub poverty: f64,
    pub income: f64,
    pub age: f64,
    pub healthcare: f64,
    pub obesity: f64,
    pub smokes: f64,
}

/// Ordered, read-only collection of records for one chart generation.
///
/// Cloning shares the underlying rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Arc<Vec<CensusRecord>>,
}

impl Dataset {
    pub fn new(records: Vec<CensusRecord>) -> Self {
        Self { records: Arc::new(records) }
    }

    pub fn records(&self) -> &[CensusRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&CensusRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(min, max)` of a column, `None` when there are no rows.
    pub fn extent(&self, field: NumericField) -> Option<(f64, f64)> {
        self.records.iter().map(|r| field.of(r)).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl From<Vec<CensusRecord>> for Dataset {
    fn from(records: Vec<CensusRecord>) -> Self {
        Self::new(records)
    }
}
