use bson::{doc, oid::ObjectId};
use log::{debug, info};
use mongodb::Database;

use crate::{
    database::{
        collections,
        models::{
            testimonial::{is_valid_rating, MAX_RATING, MIN_RATING},
            utils::{id_to_string, non_empty, now_ts},
            Testimonial,
        },
        query::find_all,
    },
    errors::ApiError,
    handlers::testimonial::dto::{
        CreateTestimonialRequest, TestimonialResponse, UpdateTestimonialRequest,
    },
};

pub struct TestimonialService;

impl TestimonialService {
    /// Newest first; `published_only` hides unreviewed submissions
    pub async fn list(
        db: &Database,
        published_only: bool,
    ) -> anyhow::Result<Vec<TestimonialResponse>> {
        let filter = if published_only {
            doc! { "published": true }
        } else {
            doc! {}
        };

        let collection = db.collection::<Testimonial>(collections::TESTIMONIALS);
        let testimonials = find_all(&collection, filter, doc! { "created_at": -1, "_id": -1 }).await?;

        debug!("Retrieved {} testimonials", testimonials.len());
        Ok(testimonials.into_iter().map(Self::map_to_response).collect())
    }

    /// Store a testimonial; public submissions always start unpublished
    pub async fn create(
        db: &Database,
        request: CreateTestimonialRequest,
        allow_publish: bool,
    ) -> anyhow::Result<TestimonialResponse> {
        let mut testimonial = build_testimonial(request, allow_publish);
        validate_testimonial(&testimonial)?;

        let collection = db.collection::<Testimonial>(collections::TESTIMONIALS);
        let result = collection.insert_one(&testimonial).await?;
        testimonial.id = result.inserted_id.as_object_id();

        info!(
            "Stored testimonial from {} (published: {})",
            testimonial.author, testimonial.published
        );
        Ok(Self::map_to_response(testimonial))
    }

    pub async fn update(
        db: &Database,
        id: ObjectId,
        request: UpdateTestimonialRequest,
    ) -> anyhow::Result<TestimonialResponse> {
        let collection = db.collection::<Testimonial>(collections::TESTIMONIALS);
        let existing = collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Testimonial {} not found", id)))?;

        let testimonial = apply_update(existing, request);
        validate_testimonial(&testimonial)?;

        collection.replace_one(doc! { "_id": id }, &testimonial).await?;

        info!("Updated testimonial {}", id);
        Ok(Self::map_to_response(testimonial))
    }

    pub async fn delete(db: &Database, id: ObjectId) -> anyhow::Result<bool> {
        let collection = db.collection::<Testimonial>(collections::TESTIMONIALS);
        let result = collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    fn map_to_response(testimonial: Testimonial) -> TestimonialResponse {
        TestimonialResponse {
            id: id_to_string(testimonial.id),
            author: testimonial.author,
            location: testimonial.location,
            rating: testimonial.rating,
            body: testimonial.body,
            image: testimonial.image,
            published: testimonial.published,
            created_at: testimonial.created_at,
            updated_at: testimonial.updated_at,
        }
    }
}

pub fn build_testimonial(request: CreateTestimonialRequest, allow_publish: bool) -> Testimonial {
    let mut testimonial = Testimonial::new(
        request.author.trim().to_string(),
        request.rating,
        request.body.trim().to_string(),
    );
    testimonial.location = non_empty(request.location);
    testimonial.image = non_empty(request.image);
    testimonial.published = allow_publish && request.published.unwrap_or(false);
    testimonial
}

pub fn apply_update(mut testimonial: Testimonial, request: UpdateTestimonialRequest) -> Testimonial {
    if let Some(author) = request.author {
        testimonial.author = author.trim().to_string();
    }
    if let Some(body) = request.body {
        testimonial.body = body.trim().to_string();
    }
    if let Some(rating) = request.rating {
        testimonial.rating = rating;
    }
    if request.location.is_some() {
        testimonial.location = non_empty(request.location);
    }
    if request.image.is_some() {
        testimonial.image = non_empty(request.image);
    }
    if let Some(published) = request.published {
        testimonial.published = published;
    }
    testimonial.updated_at = now_ts();
    testimonial
}

fn validate_testimonial(testimonial: &Testimonial) -> Result<(), ApiError> {
    if testimonial.author.is_empty() {
        return Err(ApiError::BadRequest("author must not be empty".to_string()));
    }
    if testimonial.body.is_empty() {
        return Err(ApiError::BadRequest("body must not be empty".to_string()));
    }
    if !is_valid_rating(testimonial.rating) {
        return Err(ApiError::BadRequest(format!(
            "rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(published: Option<bool>) -> CreateTestimonialRequest {
        CreateTestimonialRequest {
            author: "Maya".into(),
            location: Some("Lisbon".into()),
            rating: 5,
            body: "Beautiful ring, fast delivery".into(),
            image: None,
            published,
        }
    }

    #[test]
    fn test_public_submission_is_never_published() {
        assert!(!build_testimonial(request(Some(true)), false).published);
        assert!(build_testimonial(request(Some(true)), true).published);
        assert!(!build_testimonial(request(None), true).published);
    }

    #[test]
    fn test_rating_bounds() {
        let mut testimonial = build_testimonial(request(None), false);
        assert!(validate_testimonial(&testimonial).is_ok());

        testimonial.rating = 0;
        assert!(validate_testimonial(&testimonial).is_err());
        testimonial.rating = 6;
        assert!(validate_testimonial(&testimonial).is_err());
    }

    #[test]
    fn test_update_can_publish_and_blank_fields_fail() {
        let testimonial = build_testimonial(request(None), false);
        let published = apply_update(
            testimonial,
            UpdateTestimonialRequest {
                published: Some(true),
                location: Some(String::new()),
                ..Default::default()
            },
        );
        assert!(published.published);
        assert_eq!(published.location, None);

        let blank = apply_update(
            published,
            UpdateTestimonialRequest {
                author: Some("  ".into()),
                ..Default::default()
            },
        );
        assert!(validate_testimonial(&blank).is_err());
    }
}
