//! Multipart form parsing for program enrollment and gallery uploads.
//!
//! Text parts are collected by name; every `images` part is validated as an
//! image and kept in submission order.

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use programs_cloud::UploadFile;
use programs_core::image::validate_image;
use programs_core::program::{EnrollProgram, Location};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Multipart field name carrying image files.
pub const IMAGES_FIELD: &str = "images";

/// Text fields and validated image files from one multipart request.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub images: Vec<UploadFile>,
}

/// Drain `multipart`, validating each image part against the configured limits.
///
/// File parts with an empty filename and no content (an unselected file
/// input) are skipped.
pub async fn read_form(multipart: &mut Multipart, config: &ServerConfig) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == IMAGES_FIELD {
            let content_type = field.content_type().map(str::to_owned);
            let unselected = field.file_name().is_some_and(str::is_empty);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            if unselected && data.is_empty() {
                continue;
            }
            if form.images.len() == config.max_images_per_request {
                return Err(AppError::BadRequest(format!(
                    "At most {} images may be uploaded per request",
                    config.max_images_per_request
                )));
            }

            let kind = validate_image(content_type.as_deref(), &data, config.max_image_bytes)?;
            form.images.push(UploadFile::image(kind, data.to_vec()));
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            form.fields.insert(name, text);
        }
    }

    Ok(form)
}

/// Build an [`EnrollProgram`] from the text parts of an enrollment form.
///
/// Host/program descriptions, chat link and spend time default to empty.
pub fn enrollment_from_fields(fields: &mut HashMap<String, String>) -> AppResult<EnrollProgram> {
    let mut required = |name: &str| {
        fields
            .remove(name)
            .ok_or_else(|| AppError::BadRequest(format!("Missing required field '{name}'")))
    };

    let host_email = required("host_email")?;
    let host_name = required("host_name")?;
    let program_name = required("program_name")?;
    let road_name_address = required("road_name_address")?;
    let category = required("category")?;
    let start_date = required("start_date")?;
    let price = required("price")?;
    let latitude = required("latitude")?;
    let longitude = required("longitude")?;

    let start_date_time = DateTime::parse_from_rfc3339(start_date.trim())
        .map_err(|e| {
            AppError::BadRequest(format!("'start_date' must be an RFC 3339 timestamp: {e}"))
        })?
        .with_timezone(&Utc);
    let price: i64 = parse_number("price", &price)?;
    let location = Location::new(
        parse_number("latitude", &latitude)?,
        parse_number("longitude", &longitude)?,
    )?;

    let mut optional = |name: &str| fields.remove(name).unwrap_or_default();

    Ok(EnrollProgram {
        host_email: host_email.trim().to_string(),
        host_name,
        host_description: optional("host_description"),
        program_name,
        road_name_address,
        category,
        description: optional("description"),
        start_date_time,
        price,
        chat_link: optional("chat_link"),
        spend_time: optional("spend_time"),
        location,
    })
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("'{name}' must be a number, got '{raw}'")))
}
