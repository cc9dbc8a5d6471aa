//! Multipart form parsing.
//!
//! Uploads are buffered fully in memory; the router's body limit bounds
//! the total size.

use std::collections::HashMap;

use axum::extract::Multipart;

use atelier_core::attachment::UploadedFile;

use crate::error::{ApiError, validation};

/// Parsed multipart form: text fields plus uploaded files, both by name.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl FormData {
    /// Drain a multipart body into memory.
    ///
    /// Parts without a filename are treated as text fields. File parts with
    /// an empty body are skipped; browsers send those for untouched file
    /// inputs and they must not count as a replacement upload.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| validation(format!("malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(ToString::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| validation(format!("failed to read upload '{name}': {e}")))?;
                if bytes.is_empty() {
                    continue;
                }
                form.files
                    .entry(name)
                    .or_default()
                    .push(UploadedFile::new(filename, content_type, bytes));
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| validation(format!("failed to read field '{name}': {e}")))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// A text field's value, if present.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A required text field; 400 when missing or blank.
    pub fn require(&self, name: &str) -> Result<String, ApiError> {
        match self.text(name) {
            Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
            _ => Err(validation(format!("{name} is required"))),
        }
    }

    /// The first uploaded file under `name`, if any.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name).and_then(|files| files.first())
    }

    /// All uploaded files under `name`.
    #[must_use]
    pub fn files(&self, name: &str) -> &[UploadedFile] {
        self.files.get(name).map_or(&[], Vec::as_slice)
    }
}
