use axum::http::StatusCode;
use contracts::shared::location::LocationParseError;
use thiserror::Error;

use crate::shared::data::orders_csv::DatasetError;

/// Ошибки аналитики продаж по городам
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("{0}")]
    MalformedLocationLabel(#[from] LocationParseError),

    #[error("Failed to load dataset: {0}")]
    DataLoadFailure(#[from] DatasetError),

    #[error("Computation failed: {0}")]
    ComputationFailure(String),
}

impl AnalyticsError {
    /// Only a missing parameter is the caller's fault; everything else is
    /// reported as a server error, malformed labels included.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalyticsError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AnalyticsError::MalformedLocationLabel(_)
            | AnalyticsError::DataLoadFailure(_)
            | AnalyticsError::ComputationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AnalyticsError::MissingParameter("city1".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        let malformed = AnalyticsError::from(LocationParseError {
            label: "Austin".into(),
        });
        assert_eq!(malformed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(malformed.to_string().contains("'Austin'"));
        assert_eq!(
            AnalyticsError::from(DatasetError::MissingColumn("sales")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AnalyticsError::ComputationFailure("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
