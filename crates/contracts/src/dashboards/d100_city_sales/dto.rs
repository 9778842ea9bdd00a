use serde::{Deserialize, Serialize};

/// Number of cities returned in the yearly ranking; the rest go to "others"
pub const TOP_CITIES_LIMIT: usize = 10;

/// Response for GET /api/data/sales-by-city/:year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySalesResponse {
    /// Requested year prefix, echoed back as given
    pub year: String,
    /// Up to `TOP_CITIES_LIMIT` rows, sorted by sales descending
    pub top_cities: Vec<CitySalesRow>,
    /// Sales of all cities in the year (before truncation)
    pub total_sales: f64,
    /// `total_sales` minus the sales of `top_cities`
    pub others_sales: f64,
}

/// Single city row in the yearly ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySalesRow {
    pub city: String,
    pub state: String,
    /// "City, State"
    pub city_state: String,
    /// Number of orders
    pub count: u64,
    pub sales: f64,
    /// Share of the year's total sales, percent, 2 decimals
    pub share: f64,
}

/// Response for GET /api/data/metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataResponse {
    /// Sorted distinct "City, State" labels
    pub cities: Vec<String>,
    /// Sorted distinct year prefixes
    pub years: Vec<String>,
}

/// Query for GET /api/data/comparison?city1=Austin, Texas&city2=Chicago, Illinois
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonParams {
    pub city1: Option<String>,
    pub city2: Option<String>,
}

/// Response for GET /api/data/comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    /// Years ascending; every `datasets[i].data` is aligned with this list
    pub years: Vec<String>,
    /// Exactly two entries, in city1, city2 order
    pub datasets: Vec<ComparisonDataset>,
}

/// One chart series of the comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDataset {
    /// "City (State)"
    pub label: String,
    pub data: Vec<f64>,
}

/// Error payload shared by all data endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
