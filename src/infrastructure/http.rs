use crate::domain::census::{CensusRecord, Dataset, DatasetRepository, NumericField};
use strum::IntoEnumIterator;
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info};
use gloo::net::http::Request;

/// Loads the census table over HTTP.
#[derive(Debug, Clone)]
pub struct CsvDatasetRepository {
    url: String,
}

impl CsvDatasetRepository {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DatasetRepository for CsvDatasetRepository {
    async fn load(&self) -> ChartResult<Dataset> {
        log_debug!(LogComponent::Infrastructure("CsvDatasetRepository"), "GET {}", self.url);

        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| ChartError::DataLoadFailure(format!("request to {} failed: {}", self.url, e)))?;

        if !response.ok() {
            return Err(ChartError::DataLoadFailure(format!(
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChartError::DataLoadFailure(format!("failed to read body: {}", e)))?;

        let dataset = parse_census_csv(&body)?;
        log_info!(
            LogComponent::Infrastructure("CsvDatasetRepository"),
            "loaded {} records from {}",
            dataset.len(),
            self.url
        );
        Ok(dataset)
    }
}

/// Parses a census table with a header row. Columns are matched by name;
/// columns the chart does not plot are ignored. Every plotted column must be
/// present and hold a finite number on every row.
pub fn parse_census_csv(text: &str) -> ChartResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let records = reader
        .deserialize::<CensusRecord>()
        .collect::<Result<Vec<_>, csv::Error>>()?;

    for (row, record) in records.iter().enumerate() {
        if let Some(field) = NumericField::iter().find(|field| !field.of(record).is_finite()) {
            return Err(ChartError::DataLoadFailure(format!(
                "row {} ({}): {} is not a finite number",
                row + 1,
                record.abbr,
                field
            )));
        }
    }

    log_debug!(LogComponent::Infrastructure("CsvParser"), "parsed {} rows", records.len());
    Ok(Dataset::new(records))
}
