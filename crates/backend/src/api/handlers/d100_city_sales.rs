use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use contracts::dashboards::d100_city_sales::{
    CitySalesResponse, ComparisonParams, ComparisonResponse, ErrorResponse, MetadataResponse,
};
use std::sync::Arc;

use crate::dashboards::d100_city_sales::error::AnalyticsError;
use crate::dashboards::d100_city_sales::service::SalesService;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn to_api_error(e: AnalyticsError) -> ApiError {
    (e.status_code(), Json(ErrorResponse::new(e.to_string())))
}

/// Request the extractor refused (bad UTF-8 in the path, duplicate query keys...)
fn rejected(status: StatusCode, message: String) -> ApiError {
    tracing::warn!("D100: Rejected request: {}", message);
    (status, Json(ErrorResponse::new(message)))
}

/// GET /api/data/sales-by-city/:year
pub async fn get_sales_by_city(
    State(service): State<Arc<SalesService>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CitySalesResponse>, ApiError> {
    let Path(year) = path.map_err(|r| rejected(r.status(), r.body_text()))?;
    tracing::info!("D100: Getting sales by city for {}", year);

    match service.get_sales_by_city(&year).await {
        Ok(response) => {
            tracing::info!(
                "D100: Returning {} top cities for {}, total {:.2}",
                response.top_cities.len(),
                year,
                response.total_sales
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D100: Failed to get sales by city for {}: {}", year, e);
            Err(to_api_error(e))
        }
    }
}

/// GET /api/data/metadata
pub async fn get_metadata(
    State(service): State<Arc<SalesService>>,
) -> Result<Json<MetadataResponse>, ApiError> {
    match service.get_metadata().await {
        Ok(response) => {
            tracing::info!(
                "D100: Returning metadata: {} cities, {} years",
                response.cities.len(),
                response.years.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D100: Failed to get metadata: {}", e);
            Err(to_api_error(e))
        }
    }
}

/// GET /api/data/comparison?city1=Austin, Texas&city2=Chicago, Illinois
pub async fn get_sales_comparison(
    State(service): State<Arc<SalesService>>,
    query: Result<Query<ComparisonParams>, QueryRejection>,
) -> Result<Json<ComparisonResponse>, ApiError> {
    let Query(params) = query.map_err(|r| rejected(r.status(), r.body_text()))?;
    tracing::info!(
        "D100: Comparison request: city1={:?}, city2={:?}",
        params.city1,
        params.city2
    );

    match service.get_sales_comparison(&params).await {
        Ok(response) => {
            tracing::info!("D100: Returning comparison over {} years", response.years.len());
            Ok(Json(response))
        }
        Err(e @ AnalyticsError::MissingParameter(_)) => {
            tracing::warn!("D100: Rejected comparison request: {}", e);
            Err(to_api_error(e))
        }
        Err(e) => {
            tracing::error!("D100: Failed to compare cities: {}", e);
            Err(to_api_error(e))
        }
    }
}
