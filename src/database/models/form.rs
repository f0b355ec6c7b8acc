use serde::{Deserialize, Serialize};

use super::utils::now_ts;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    #[default]
    Contact,
    Appointment,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Appointment => "appointment",
        }
    }
}

/// Contact or appointment form submission
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FormSubmission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<bson::oid::ObjectId>,
    pub kind: FormKind,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub preferred_date: Option<String>,
    pub handled: bool,
    pub created_at: u64,
}

impl FormSubmission {
    pub fn new(kind: FormKind, name: String, email: String, message: String) -> Self {
        Self {
            id: None,
            kind,
            name,
            email,
            phone: None,
            subject: None,
            message,
            preferred_date: None,
            handled: false,
            created_at: now_ts(),
        }
    }
}
