use bson::doc;
use log::{debug, info};
use mongodb::Database;
use std::str::FromStr;

use crate::{
    database::models::{now_ts, ContentBlock},
    errors::ApiError,
};

/// Addressable content blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Home,
    About,
    Ui,
}

impl FromStr for ContentKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(ContentKind::Home),
            "about" => Ok(ContentKind::About),
            "ui" => Ok(ContentKind::Ui),
            other => Err(ApiError::NotFound(format!(
                "Unknown content block '{}'",
                other
            ))),
        }
    }
}

pub struct ContentService;

impl ContentService {
    /// Stored block, or its defaults when nothing has been saved yet
    pub async fn get<B: ContentBlock>(db: &Database) -> anyhow::Result<B> {
        let stored = db.collection::<B>(B::COLLECTION).find_one(doc! {}).await?;
        if stored.is_none() {
            debug!("No {} block stored, serving defaults", B::COLLECTION);
        }
        Ok(stored.unwrap_or_default())
    }

    /// Replace the block wholesale
    pub async fn put<B: ContentBlock>(db: &Database, body: serde_json::Value) -> anyhow::Result<B> {
        let mut block = parse_block::<B>(body)?;
        block.set_updated_at(now_ts());

        db.collection::<B>(B::COLLECTION)
            .replace_one(doc! {}, &block)
            .upsert(true)
            .await?;

        info!("Saved {} content block", B::COLLECTION);
        Ok(block)
    }
}

/// Deserialize and validate a request body as block `B`
pub fn parse_block<B: ContentBlock>(body: serde_json::Value) -> Result<B, ApiError> {
    let block: B = serde_json::from_value(body).map_err(|e| {
        ApiError::BadRequest(format!("Invalid {} content: {}", B::COLLECTION, e))
    })?;
    block.validate().map_err(ApiError::BadRequest)?;
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{AboutContent, HomeContent, UiContent};
    use serde_json::json;

    #[test]
    fn test_content_kind_from_path() {
        assert_eq!("home".parse::<ContentKind>().unwrap(), ContentKind::Home);
        assert_eq!("ui".parse::<ContentKind>().unwrap(), ContentKind::Ui);
        assert!(matches!(
            "footer".parse::<ContentKind>(),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_block_shape_errors() {
        let wrong_type = json!({ "banners": "not-a-list" });
        assert!(matches!(
            parse_block::<HomeContent>(wrong_type),
            Err(ApiError::BadRequest(_))
        ));

        let bad_color = json!({ "primary_color": "blue" });
        assert!(matches!(
            parse_block::<UiContent>(bad_color),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_parse_block_accepts_partial_about() {
        let about = parse_block::<AboutContent>(json!({
            "title": "Our story",
            "sections": [{ "heading": "Since 1984" }]
        }))
        .unwrap();
        assert_eq!(about.sections.len(), 1);
        assert_eq!(about.body, "");
    }
}
