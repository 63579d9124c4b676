use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::ApiError;
use crate::filter::split_ids;
use crate::media::FormFile;

/// Text fields and image parts of a gallery multipart form.
#[derive(Debug, Default)]
pub struct GalleryForm {
    fields: HashMap<String, String>,
    pub images: Vec<FormFile>,
}

impl GalleryForm {
    /// Text value as submitted; empty when the field was absent.
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Non-empty text value.
    pub fn optional(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// Comma-separated list field, entries trimmed.
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        self.optional(name).map(|raw| split_ids(&raw))
    }
}

fn form_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::bad_request("Error parsing multipart form").with_detail(e)
}

pub async fn read_gallery_form(mut multipart: Multipart) -> Result<GalleryForm, ApiError> {
    let mut form = GalleryForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or("").to_string();

        if name == "images" || name == "images[]" {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field.bytes().await.map_err(form_error)?;
            form.images.push(FormFile {
                file_name,
                content_type,
                data: data.to_vec(),
            });
        } else if !name.is_empty() {
            let value = field.text().await.map_err(form_error)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
