//! Program enrollment input, the embedded [`Location`] value object and
//! the storage category used for gallery images.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Object storage category (directory prefix) for program gallery images.
pub const IMAGE_CATEGORY: &str = "program";

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Immutable latitude/longitude pair embedded in a program row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Build a location, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::Validation(format!(
                "latitude must be between -90 and 90, got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::Validation(format!(
                "longitude must be between -180 and 180, got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

// ---------------------------------------------------------------------------
// Enrollment input
// ---------------------------------------------------------------------------

/// Host and program attributes submitted at enrollment (images travel
/// separately as raw uploads).
#[derive(Debug, Clone, Validate)]
pub struct EnrollProgram {
    #[validate(email, length(max = 255))]
    pub host_email: String,
    #[validate(length(min = 1, max = 255))]
    pub host_name: String,
    #[validate(length(max = 5000))]
    pub host_description: String,
    #[validate(length(min = 1, max = 255))]
    pub program_name: String,
    #[validate(length(min = 1, max = 255))]
    pub road_name_address: String,
    #[validate(length(min = 1, max = 255))]
    pub category: String,
    #[validate(length(max = 5000))]
    pub description: String,
    pub start_date_time: Timestamp,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(length(max = 255))]
    pub chat_link: String,
    #[validate(length(max = 255))]
    pub spend_time: String,
    pub location: Location,
}

impl EnrollProgram {
    /// Run all field validations, collapsing failures into one
    /// [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}

/// New free-text values applied by the detail-update operation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProgramDetails {
    #[validate(length(max = 5000))]
    pub program_description: String,
    #[validate(length(min = 1, max = 255))]
    pub road_name_address: String,
    #[validate(length(max = 5000))]
    pub host_description: String,
}

impl UpdateProgramDetails {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}
