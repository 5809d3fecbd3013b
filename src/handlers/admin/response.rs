//! Admin response DTOs

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    handlers::auth::ProfileResponse,
    scoring::{CategoryRanking, ResultsSummary},
    services::admin_service::{CandidateCounts, JuryGroup},
};

/// Candidate directory
#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<ProfileResponse>,
    /// Size of the filtered listing
    pub total: usize,
    /// Headcounts of the whole directory, independent of the filters
    pub counts: CandidateCounts,
}

/// Jury directory
#[derive(Debug, Serialize)]
pub struct JuryListResponse {
    pub groups: Vec<JuryGroup>,
}

/// Rankings of every category
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub rankings: Vec<CategoryRanking>,
    pub summary: ResultsSummary,
}

/// A downloadable CSV file
pub struct CsvFile {
    pub file_name: &'static str,
    pub body: String,
}

impl IntoResponse for CsvFile {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}
