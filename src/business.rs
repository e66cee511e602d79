// Business records - wire payload, validated record, stored row
// Required-field checks follow the "present and non-zero" rule

use serde::{Deserialize, Serialize};

// ============================================================================
// STORED ROW
// ============================================================================

/// A row of the `businesses` table.
///
/// `categories` is kept exactly as persisted (JSON array text); use
/// [`Business::category_list`] to get the decoded sequence back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub review_count: i64,
    pub categories: String,
    pub url: String,
}

impl Business {
    /// Decode the stored categories text back into its ordered list
    pub fn category_list(&self) -> serde_json::Result<Vec<String>> {
        decode_categories(&self.categories)
    }
}

// ============================================================================
// VALIDATED RECORD (no identifier yet)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NewBusiness {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub review_count: i64,
    pub categories: Vec<String>,
    pub url: String,
}

impl NewBusiness {
    /// Categories in their storable form
    pub fn categories_text(&self) -> String {
        encode_categories(&self.categories)
    }
}

// ============================================================================
// REQUEST PAYLOAD
// ============================================================================

/// Body of `POST /business` and `PUT /business/:id`.
///
/// Every field is optional here so that a missing field surfaces as a
/// validation failure instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessPayload {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub categories: Option<Vec<String>>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn missing(field: &'static str) -> ValidationError {
    ValidationError {
        field,
        message: "Required field is missing".to_string(),
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing(field)),
    }
}

// Zero counts as missing, same as an absent field.
fn required_float(value: Option<f64>, field: &'static str) -> Result<f64, ValidationError> {
    match value {
        Some(v) if v != 0.0 => Ok(v),
        _ => Err(missing(field)),
    }
}

fn required_int(value: Option<i64>, field: &'static str) -> Result<i64, ValidationError> {
    match value {
        Some(v) if v != 0 => Ok(v),
        _ => Err(missing(field)),
    }
}

impl BusinessPayload {
    /// Check every required field and produce a storable record.
    ///
    /// Strings must be non-empty, numbers must be non-zero, and
    /// `categories` must be present (an empty list is accepted).
    /// Fails on the first missing field, in declaration order.
    pub fn validate(self) -> Result<NewBusiness, ValidationError> {
        Ok(NewBusiness {
            name: required_text(self.name, "name")?,
            address: required_text(self.address, "address")?,
            city: required_text(self.city, "city")?,
            state: required_text(self.state, "state")?,
            zip_code: required_text(self.zip_code, "zip_code")?,
            phone: required_text(self.phone, "phone")?,
            latitude: required_float(self.latitude, "latitude")?,
            longitude: required_float(self.longitude, "longitude")?,
            rating: required_float(self.rating, "rating")?,
            review_count: required_int(self.review_count, "review_count")?,
            categories: self.categories.ok_or_else(|| missing("categories"))?,
            url: required_text(self.url, "url")?,
        })
    }
}

// ============================================================================
// CATEGORIES CODEC
// ============================================================================

pub fn encode_categories(categories: &[String]) -> String {
    // Serializing a list of strings cannot fail
    serde_json::to_string(categories).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_categories(text: &str) -> serde_json::Result<Vec<String>> {
    serde_json::from_str(text)
}
