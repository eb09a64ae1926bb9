//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{company_pacing, summarize, CompanyPacing, Summary};
use crate::excel::WorkbookImporter;
use crate::sheet::{column_index, DEFAULT_START_COL};
use crate::types::{DaysConfig, EnrichedRecord, DEFAULT_TOTAL_DAYS};

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Thermo API Server".to_string(),
        version: state.version.clone(),
        description: "HTTP API for sales & gross-profit thermometer reports".to_string(),
        endpoints: vec![
            EndpointInfo {
                path: "/health".to_string(),
                method: "GET".to_string(),
                description: "Health check endpoint".to_string(),
            },
            EndpointInfo {
                path: "/version".to_string(),
                method: "GET".to_string(),
                description: "Get server version".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/report".to_string(),
                method: "POST".to_string(),
                description: "Tidy table plus per-company pacing for a workbook".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/summary".to_string(),
                method: "POST".to_string(),
                description: "Workbook-wide summary statistics".to_string(),
            },
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec!["report".to_string(), "summary".to_string()],
    }))
}

/// Report request
#[derive(Deserialize)]
pub struct ReportRequest {
    pub file_path: String,
    /// Total working days in the month (default 22, range 1..=31)
    pub total_days: Option<u32>,
    /// First data column of the daily tab as an Excel reference (default "AA")
    pub data_start: Option<String>,
}

/// Report response
#[derive(Serialize, Default)]
pub struct ReportResponse {
    pub file_path: String,
    pub generated_at: String,
    pub month_label: Option<String>,
    pub total_sales_goal: f64,
    pub companies: Vec<String>,
    pub records: Vec<EnrichedRecord>,
    pub pacing: Vec<CompanyPacing>,
}

struct RequestLayout {
    total_days: u32,
    start_col: usize,
}

fn resolve_layout(
    total_days: Option<u32>,
    data_start: Option<&str>,
) -> Result<RequestLayout, String> {
    let total_days = total_days.unwrap_or(DEFAULT_TOTAL_DAYS);
    if !(1..=31).contains(&total_days) {
        return Err(format!("total_days must be in 1..=31, got {total_days}"));
    }

    let start_col = match data_start {
        None => DEFAULT_START_COL,
        Some(letters) => column_index(letters)
            .ok_or_else(|| format!("invalid data_start column reference '{letters}'"))?,
    };

    Ok(RequestLayout {
        total_days,
        start_col,
    })
}

/// POST /api/v1/report - Tidy table plus per-company pacing
pub async fn report(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReportRequest>,
) -> impl IntoResponse {
    let layout = match resolve_layout(req.total_days, req.data_start.as_deref()) {
        Ok(layout) => layout,
        Err(message) => return Json(ApiResponse::<ReportResponse>::err(message)),
    };

    let bytes = match tokio::fs::read(&req.file_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Json(ApiResponse::<ReportResponse>::err(format!(
                "failed to read {}: {e}",
                req.file_path
            )))
        }
    };

    let table = {
        let import = || {
            WorkbookImporter::from_bytes(bytes.clone())
                .with_start_col(layout.start_col)
                .import()
        };
        // The cache is keyed by content alone; non-default layouts bypass it
        if layout.start_col == DEFAULT_START_COL {
            let mut cache = match state.cache.lock() {
                Ok(cache) => cache,
                Err(poisoned) => poisoned.into_inner(),
            };
            cache.get_or_build(&bytes, import)
        } else {
            import().map(Arc::new)
        }
    };

    match table {
        Ok(table) => {
            let days = DaysConfig::new(layout.total_days);
            Json(ApiResponse::ok(ReportResponse {
                file_path: req.file_path,
                generated_at: chrono::Utc::now().to_rfc3339(),
                month_label: table.month_label.clone(),
                total_sales_goal: table.total_sales_goal,
                companies: table.companies.clone(),
                records: table.grouped_records(),
                pacing: company_pacing(&table, &days),
            }))
        }
        Err(e) => Json(ApiResponse::<ReportResponse>::err(e.to_string())),
    }
}

/// Summary request
#[derive(Deserialize)]
pub struct SummaryRequest {
    pub file_path: String,
    pub data_start: Option<String>,
}

/// Summary response
#[derive(Serialize, Default)]
pub struct SummaryResponse {
    pub file_path: String,
    pub generated_at: String,
    pub summary: Option<Summary>,
}

/// POST /api/v1/summary - Workbook-wide summary statistics
pub async fn summary(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummaryRequest>,
) -> impl IntoResponse {
    let layout = match resolve_layout(None, req.data_start.as_deref()) {
        Ok(layout) => layout,
        Err(message) => return Json(ApiResponse::<SummaryResponse>::err(message)),
    };

    let bytes = match tokio::fs::read(&req.file_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Json(ApiResponse::<SummaryResponse>::err(format!(
                "failed to read {}: {e}",
                req.file_path
            )))
        }
    };

    let table = {
        let import = || {
            WorkbookImporter::from_bytes(bytes.clone())
                .with_start_col(layout.start_col)
                .import()
        };
        if layout.start_col == DEFAULT_START_COL {
            let mut cache = match state.cache.lock() {
                Ok(cache) => cache,
                Err(poisoned) => poisoned.into_inner(),
            };
            cache.get_or_build(&bytes, import)
        } else {
            import().map(Arc::new)
        }
    };

    match table {
        Ok(table) => Json(ApiResponse::ok(SummaryResponse {
            file_path: req.file_path,
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary: Some(summarize(&table)),
        })),
        Err(e) => Json(ApiResponse::<SummaryResponse>::err(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_layout_defaults() {
        let layout = resolve_layout(None, None).unwrap();
        assert_eq!(layout.total_days, DEFAULT_TOTAL_DAYS);
        assert_eq!(layout.start_col, DEFAULT_START_COL);
    }

    #[test]
    fn test_resolve_layout_custom_column() {
        let layout = resolve_layout(Some(20), Some("B")).unwrap();
        assert_eq!(layout.total_days, 20);
        assert_eq!(layout.start_col, 1);
    }

    #[test]
    fn test_resolve_layout_rejects_bad_inputs() {
        assert!(resolve_layout(Some(0), None).is_err());
        assert!(resolve_layout(Some(40), None).is_err());
        assert!(resolve_layout(None, Some("7")).is_err());
    }
}
