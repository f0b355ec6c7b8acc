use bson::{doc, oid::ObjectId, Document};
use log::{debug, info};
use mongodb::Database;

use crate::{
    database::{
        collections,
        models::{
            utils::{id_to_string, non_empty, now_ts},
            Event,
        },
        query::find_all,
    },
    errors::ApiError,
    handlers::event::dto::{CreateEventRequest, EventResponse, UpdateEventRequest},
};

pub struct EventService;

impl EventService {
    /// Published events in start order
    pub async fn list(db: &Database, upcoming: bool) -> anyhow::Result<Vec<EventResponse>> {
        let filter = listing_filter(upcoming, now_ts());
        debug!("Event filter: {}", filter);

        let collection = db.collection::<Event>(collections::EVENTS);
        let events = find_all(&collection, filter, doc! { "starts_at": 1, "_id": 1 }).await?;

        Ok(events.into_iter().map(Self::map_to_response).collect())
    }

    pub async fn get_by_id(db: &Database, id: ObjectId) -> anyhow::Result<Option<EventResponse>> {
        let collection = db.collection::<Event>(collections::EVENTS);
        let event = collection.find_one(doc! { "_id": id }).await?;
        Ok(event.map(Self::map_to_response))
    }

    pub async fn create(db: &Database, request: CreateEventRequest) -> anyhow::Result<EventResponse> {
        let mut event = build_event(request);
        validate_event(&event)?;

        let collection = db.collection::<Event>(collections::EVENTS);
        let result = collection.insert_one(&event).await?;
        event.id = result.inserted_id.as_object_id();

        info!("Created event '{}'", event.title);
        Ok(Self::map_to_response(event))
    }

    pub async fn update(
        db: &Database,
        id: ObjectId,
        request: UpdateEventRequest,
    ) -> anyhow::Result<EventResponse> {
        let collection = db.collection::<Event>(collections::EVENTS);
        let existing = collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Event {} not found", id)))?;

        let event = apply_update(existing, request);
        validate_event(&event)?;

        collection.replace_one(doc! { "_id": id }, &event).await?;

        info!("Updated event {}", id);
        Ok(Self::map_to_response(event))
    }

    pub async fn delete(db: &Database, id: ObjectId) -> anyhow::Result<bool> {
        let collection = db.collection::<Event>(collections::EVENTS);
        let result = collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    fn map_to_response(event: Event) -> EventResponse {
        EventResponse {
            id: id_to_string(event.id),
            title: event.title,
            description: event.description,
            location: event.location,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            image: event.image,
            published: event.published,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Published events; with `upcoming`, those not yet over at `now`
pub fn listing_filter(upcoming: bool, now: u64) -> Document {
    let mut filter = doc! { "published": true };
    if upcoming {
        let now = now as i64;
        filter.insert(
            "$or",
            vec![
                doc! { "ends_at": { "$gte": now } },
                doc! { "ends_at": null, "starts_at": { "$gte": now } },
            ],
        );
    }
    filter
}

pub fn build_event(request: CreateEventRequest) -> Event {
    let mut event = Event::new(request.title.trim().to_string(), request.starts_at);
    event.description = non_empty(request.description);
    event.location = non_empty(request.location);
    event.ends_at = request.ends_at;
    event.image = non_empty(request.image);
    event.published = request.published.unwrap_or(true);
    event
}

pub fn apply_update(mut event: Event, request: UpdateEventRequest) -> Event {
    if let Some(title) = request.title {
        event.title = title.trim().to_string();
    }
    if request.description.is_some() {
        event.description = non_empty(request.description);
    }
    if request.location.is_some() {
        event.location = non_empty(request.location);
    }
    if let Some(starts_at) = request.starts_at {
        event.starts_at = starts_at;
    }
    if let Some(ends_at) = request.ends_at {
        event.ends_at = ends_at;
    }
    if request.image.is_some() {
        event.image = non_empty(request.image);
    }
    if let Some(published) = request.published {
        event.published = published;
    }
    event.updated_at = now_ts();
    event
}

fn validate_event(event: &Event) -> Result<(), ApiError> {
    if event.title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }
    if let Some(ends_at) = event.ends_at {
        if ends_at < event.starts_at {
            return Err(ApiError::BadRequest(
                "ends_at must not precede starts_at".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateEventRequest {
        CreateEventRequest {
            title: " Trunk show ".into(),
            description: None,
            location: Some("Showroom".into()),
            starts_at: 1_800_000_000,
            ends_at: Some(1_800_010_000),
            image: None,
            published: None,
        }
    }

    #[test]
    fn test_build_event_defaults_to_published() {
        let event = build_event(request());
        assert_eq!(event.title, "Trunk show");
        assert!(event.published);
        assert!(validate_event(&event).is_ok());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let event = build_event(request());
        let moved = apply_update(
            event,
            UpdateEventRequest {
                starts_at: Some(1_900_000_000),
                ..Default::default()
            },
        );
        assert!(matches!(validate_event(&moved), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_end_can_be_cleared_or_kept() {
        let event = build_event(request());

        let untouched: UpdateEventRequest = serde_json::from_str(r#"{"title": "Gala"}"#).unwrap();
        let event = apply_update(event, untouched);
        assert_eq!(event.ends_at, Some(1_800_010_000));

        let cleared: UpdateEventRequest = serde_json::from_str(r#"{"ends_at": null}"#).unwrap();
        let event = apply_update(event, cleared);
        assert_eq!(event.ends_at, None);

        let set: UpdateEventRequest = serde_json::from_str(r#"{"ends_at": 1800020000}"#).unwrap();
        assert_eq!(apply_update(event, set).ends_at, Some(1_800_020_000));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let mut req = request();
        req.title = "   ".into();
        assert!(validate_event(&build_event(req)).is_err());
    }

    #[test]
    fn test_listing_filter() {
        assert_eq!(listing_filter(false, 100), doc! { "published": true });

        let upcoming = listing_filter(true, 100);
        let branches = upcoming.get_array("$or").unwrap();
        assert_eq!(branches.len(), 2);
        assert_eq!(
            branches[1].as_document().unwrap(),
            &doc! { "ends_at": null, "starts_at": { "$gte": 100_i64 } }
        );
    }
}
