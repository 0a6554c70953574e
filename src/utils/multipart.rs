use std::collections::HashMap;

use axum::extract::Multipart;
use reqwest::multipart::Part;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Re-packages the upload as an outgoing multipart part.
    pub fn into_part(self) -> AppResult<Part> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.content_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| AppError::BadRequest(format!("Unsupported file type: {}", e))),
            None => Ok(part),
        }
    }
}

/// A browser form submission split into text fields and non-empty file uploads.
#[derive(Debug, Default)]
pub struct FormUpload {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormUpload {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut upload = FormUpload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid form data: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
                    // Browsers send an empty part for an untouched file input.
                    if !bytes.is_empty() {
                        upload.files.insert(
                            name,
                            UploadedFile {
                                file_name,
                                content_type,
                                bytes: bytes.to_vec(),
                            },
                        );
                    }
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Invalid form field: {}", e)))?;
                    upload.fields.insert(name, value);
                }
            }
        }

        Ok(upload)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

#[cfg(test)]
impl FormUpload {
    pub(crate) fn from_fields(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }

    pub(crate) fn with_file(mut self, name: &str, file: UploadedFile) -> Self {
        self.files.insert(name.to_string(), file);
        self
    }
}
