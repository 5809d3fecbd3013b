//! Candidate upload forms

use axum::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    services::submission_service::UploadedFile,
};

/// Fields of an upload form: `file` and, for videos, `title`
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub title: Option<String>,
}

impl UploadForm {
    /// Read the multipart body; unknown fields are ignored
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {}", e)))?
        {
            match field.name() {
                Some("file") => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid upload: {}", e)))?;
                    form.file = Some(UploadedFile {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                Some("title") => {
                    form.title = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::Validation(format!("Invalid title: {}", e)))?,
                    );
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn require_file(&mut self) -> AppResult<UploadedFile> {
        self.file
            .take()
            .ok_or_else(|| AppError::Validation("A file is required".to_string()))
    }
}
