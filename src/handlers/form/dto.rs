use serde::{Deserialize, Serialize};

use crate::database::models::FormKind;

/// Response model for form submission endpoints
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub id: String,
    pub kind: FormKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub preferred_date: Option<String>,
    pub handled: bool,
    pub created_at: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    #[serde(default)]
    pub kind: FormKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub preferred_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarkHandledRequest {
    pub handled: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct FormListQuery {
    pub kind: Option<FormKind>,
    pub handled: Option<bool>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
