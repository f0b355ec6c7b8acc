use serde::{Deserialize, Serialize};

use super::utils::now_ts;

/// Category model for MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<bson::oid::ObjectId>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Category {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: None,
            name,
            slug,
            description: None,
            image: None,
            parent: None,
            sort_order: 0,
            created_at: now_ts(),
            updated_at: now_ts(),
        }
    }
}

/// URL slug: lowercase ASCII alphanumerics separated by single dashes
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Engagement Rings"), "engagement-rings");
        assert_eq!(slugify("  Earrings & Studs!! "), "earrings-studs");
        assert_eq!(slugify("18K--Gold"), "18k-gold");
        assert_eq!(slugify("Bagues de fiançailles"), "bagues-de-fian-ailles");
        assert_eq!(slugify("***"), "");
    }
}
