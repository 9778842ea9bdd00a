use contracts::dashboards::d100_city_sales::{
    CitySalesResponse, ComparisonParams, ComparisonResponse, MetadataResponse,
};
use contracts::shared::location::Location;
use std::path::{Path, PathBuf};

use super::aggregation;
use super::error::AnalyticsError;
use super::repository;

/// Sales-by-city queries over the orders CSV.
///
/// Holds nothing but the dataset path: every query re-reads the file, so
/// answers always reflect its current contents and requests share no state.
#[derive(Debug, Clone)]
pub struct SalesService {
    dataset_path: PathBuf,
}

impl SalesService {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
        }
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// Top cities by sales for one year
    pub async fn get_sales_by_city(&self, year: &str) -> Result<CitySalesResponse, AnalyticsError> {
        let orders = repository::load_orders(&self.dataset_path).await?;
        Ok(aggregation::yearly_city_ranking(&orders, year))
    }

    /// Distinct locations and years for dashboard filters
    pub async fn get_metadata(&self) -> Result<MetadataResponse, AnalyticsError> {
        let orders = repository::load_orders(&self.dataset_path).await?;
        Ok(aggregation::metadata(&orders))
    }

    /// Yearly sales of `city1` against `city2`.
    ///
    /// Parameters are validated before the dataset is touched.
    pub async fn get_sales_comparison(
        &self,
        params: &ComparisonParams,
    ) -> Result<ComparisonResponse, AnalyticsError> {
        let (first, second) = parse_comparison_params(params)?;
        let orders = repository::load_orders(&self.dataset_path).await?;
        Ok(aggregation::comparison_series(&orders, &first, &second))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AnalyticsError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AnalyticsError::MissingParameter(format!(
            "{name} (two cities are required for comparison)"
        ))),
    }
}

/// Both labels must be present before either is parsed
fn parse_comparison_params(params: &ComparisonParams) -> Result<(Location, Location), AnalyticsError> {
    let label1 = required(&params.city1, "city1")?;
    let label2 = required(&params.city2, "city2")?;
    Ok((Location::parse(label1)?, Location::parse(label2)?))
}
