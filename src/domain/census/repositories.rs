use super::entities::Dataset;
use crate::domain::errors::ChartResult;

/// Source of the survey rows for one chart generation.
///
/// Loading is the only suspension point of a rebuild.
#[allow(async_fn_in_trait)]
pub trait DatasetRepository {
    async fn load(&self) -> ChartResult<Dataset>;
}

/// Serves an already parsed dataset (tests, demos, host-provided data).
#[derive(Debug, Clone, Default)]
pub struct StaticDatasetRepository {
    dataset: Dataset,
}

impl StaticDatasetRepository {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetRepository for StaticDatasetRepository {
    async fn load(&self) -> ChartResult<Dataset> {
        Ok(self.dataset.clone())
    }
}
