//! Read-only access to stored objects

use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
    store::is_valid_object_name,
};

/// Serve `/files/{bucket}/{name}`
async fn get_object(
    State(state): State<AppState>,
    Path((bucket, name)): Path<(String, String)>,
) -> AppResult<Response> {
    if bucket != state.config().storage.bucket || !is_valid_object_name(&name) {
        return Err(AppError::NotFound("File not found".to_string()));
    }

    let bytes = state
        .objects()
        .get(&name)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    Ok(([(header::CONTENT_TYPE, content_type(&name))], bytes).into_response())
}

/// Content type guessed from the extension
fn content_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .to_string()
}

/// File routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/{bucket}/{name}", get(get_object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("a-video-1.MP4"), "video/mp4");
        assert_eq!(content_type("a-document-1.pdf"), "application/pdf");
        assert_eq!(content_type("a-video-2.webm"), "video/webm");
        assert_eq!(content_type("blob"), "application/octet-stream");
    }
}
