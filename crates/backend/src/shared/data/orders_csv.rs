use contracts::shared::location::Location;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Cannot read dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Invalid sales value '{value}' at line {line}")]
    InvalidSales { line: u64, value: String },
}

/// Cell values read as "no value", like an empty cell
const MISSING_MARKERS: &[&str] = &["#N/A", "#NA", "<NA>", "N/A", "NA", "NULL", "NaN", "-NaN", "None"];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(cell))
}

/// Строка таблицы заказов (заказ + город покупателя)
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    /// "YYYY-MM-DD..."; only the first four characters are used
    pub order_date: String,
    pub city: String,
    pub state: String,
    pub sales: f64,
}

impl OrderRecord {
    pub fn new(order_date: &str, city: &str, state: &str, sales: f64) -> Self {
        Self {
            order_date: order_date.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            sales,
        }
    }

    /// First four characters of the order date (the whole date if shorter)
    pub fn year(&self) -> &str {
        match self.order_date.char_indices().nth(4) {
            Some((idx, _)) => &self.order_date[..idx],
            None => &self.order_date,
        }
    }

    pub fn is_at(&self, location: &Location) -> bool {
        self.city == location.city && self.state == location.state
    }
}

/// Read the whole orders table from a CSV file
pub fn load_orders(path: &Path) -> Result<Vec<OrderRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let orders = read_orders(file)?;
    tracing::debug!("Loaded {} orders from {}", orders.len(), path.display());
    Ok(orders)
}

/// Parse orders from any CSV source with a header row
pub fn read_orders<R: Read>(source: R) -> Result<Vec<OrderRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();

    // Get column index by header name (case-insensitive, BOM stripped)
    let column = |name: &'static str| -> Result<usize, DatasetError> {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{FEFF}').trim().eq_ignore_ascii_case(name))
            .ok_or(DatasetError::MissingColumn(name))
    };

    let date_idx = column("order_date")?;
    let city_idx = column("city")?;
    let state_idx = column("state")?;
    let sales_idx = column("sales")?;

    let mut orders = Vec::new();

    for result in reader.records() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let raw_sales = field(sales_idx).trim();
        // Missing sales cell: the order still counts, with no revenue
        let sales = if is_missing(raw_sales) {
            0.0
        } else {
            match raw_sales.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    return Err(DatasetError::InvalidSales {
                        line: record.position().map(|p| p.line()).unwrap_or_default(),
                        value: raw_sales.to_string(),
                    })
                }
            }
        };

        orders.push(OrderRecord {
            order_date: field(date_idx).to_string(),
            city: field(city_idx).to_string(),
            state: field(state_idx).to_string(),
            sales,
        });
    }

    Ok(orders)
}
