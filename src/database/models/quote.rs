use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::utils::now_ts;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Contacted,
    Closed,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Contacted => "contacted",
            QuoteStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(QuoteStatus::Pending),
            "contacted" => Ok(QuoteStatus::Contacted),
            "closed" => Ok(QuoteStatus::Closed),
            other => Err(format!("Unknown quote status '{}'", other)),
        }
    }
}

/// Price quote request for a product or a custom piece
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Quote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub guest_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub product_id: Option<ObjectId>,
    pub message: String,
    #[serde(default)]
    pub budget: Option<f64>,
    pub status: QuoteStatus,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Quote {
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            id: None,
            guest_id: None,
            name,
            email,
            phone: None,
            product_id: None,
            message,
            budget: None,
            status: QuoteStatus::Pending,
            created_at: now_ts(),
            updated_at: now_ts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            QuoteStatus::Pending,
            QuoteStatus::Contacted,
            QuoteStatus::Closed,
        ] {
            assert_eq!(status.as_str().parse::<QuoteStatus>().unwrap(), status);
        }
        assert!("archived".parse::<QuoteStatus>().is_err());
    }

    #[test]
    fn test_new_quote_is_pending() {
        let quote = Quote::new("Ana".into(), "ana@example.com".into(), "Halo ring".into());
        assert_eq!(quote.status, QuoteStatus::Pending);
        let doc = bson::to_document(&quote).unwrap();
        assert_eq!(doc.get_str("status").unwrap(), "pending");
    }
}
