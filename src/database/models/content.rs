//! Singleton content blocks edited from the admin panel.
//!
//! Each block lives alone in its own collection; reads fall back to the
//! block's `Default` until an admin saves it for the first time.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

/// A singleton document stored in `COLLECTION`
pub trait ContentBlock: Serialize + DeserializeOwned + Default + Send + Sync + Unpin {
    const COLLECTION: &'static str;

    fn set_updated_at(&mut self, ts: u64);

    /// Shape checks beyond what deserialization enforces
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Banner {
    pub image: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct HomeContent {
    #[serde(default)]
    pub hero_title: String,
    #[serde(default)]
    pub hero_subtitle: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub banners: Vec<Banner>,
    #[serde(default)]
    pub featured_product_ids: Vec<String>,
    #[serde(default)]
    pub updated_at: u64,
}

impl ContentBlock for HomeContent {
    const COLLECTION: &'static str = "home";

    fn set_updated_at(&mut self, ts: u64) {
        self.updated_at = ts;
    }

    fn validate(&self) -> Result<(), String> {
        for id in &self.featured_product_ids {
            bson::oid::ObjectId::parse_str(id)
                .map_err(|_| format!("Invalid featured product id '{}'", id))?;
        }
        if self.banners.iter().any(|b| b.image.trim().is_empty()) {
            return Err("Every banner needs an image".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AboutSection {
    pub heading: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AboutContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sections: Vec<AboutSection>,
    #[serde(default)]
    pub updated_at: u64,
}

impl ContentBlock for AboutContent {
    const COLLECTION: &'static str = "about_us";

    fn set_updated_at(&mut self, ts: u64) {
        self.updated_at = ts;
    }
}

/// Site chrome: logo, announcement bar, theme colour and contact links
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UiContent {
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub announcement: Option<String>,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub updated_at: u64,
}

fn default_primary_color() -> String {
    "#1a1a1a".to_string()
}

impl Default for UiContent {
    fn default() -> Self {
        Self {
            logo: None,
            announcement: None,
            primary_color: default_primary_color(),
            social_links: BTreeMap::new(),
            contact_email: None,
            contact_phone: None,
            updated_at: 0,
        }
    }
}

pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

impl ContentBlock for UiContent {
    const COLLECTION: &'static str = "ui";

    fn set_updated_at(&mut self, ts: u64) {
        self.updated_at = ts;
    }

    fn validate(&self) -> Result<(), String> {
        if !is_hex_color(&self.primary_color) {
            return Err(format!(
                "primary_color must be #rgb or #rrggbb, got '{}'",
                self.primary_color
            ));
        }
        if let Some(email) = &self.contact_email {
            if !super::utils::is_valid_email(email) {
                return Err(format!("Invalid contact email '{}'", email));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#C0FFEE"));
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ffff"));
        assert!(!is_hex_color("#ggg"));
    }

    #[test]
    fn test_ui_defaults_validate() {
        let ui = UiContent::default();
        assert!(ui.validate().is_ok());

        let bad = UiContent {
            primary_color: "red".into(),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_partial_ui_body_fills_defaults() {
        let ui: UiContent = serde_json::from_value(serde_json::json!({
            "announcement": "Free shipping on all rings",
            "social_links": { "instagram": "https://instagram.com/store" }
        }))
        .unwrap();
        assert_eq!(ui.primary_color, "#1a1a1a");
        assert_eq!(ui.social_links.len(), 1);
    }

    #[test]
    fn test_home_rejects_bad_featured_id() {
        let home = HomeContent {
            featured_product_ids: vec!["nope".into()],
            ..Default::default()
        };
        assert!(home.validate().is_err());
    }

    #[test]
    fn test_collections_are_distinct() {
        assert_ne!(HomeContent::COLLECTION, AboutContent::COLLECTION);
        assert_ne!(AboutContent::COLLECTION, UiContent::COLLECTION);
    }
}
