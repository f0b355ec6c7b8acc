use bson::{doc, oid::ObjectId};
use log::{debug, info};
use mongodb::{options::ReturnDocument, Database};

use crate::{
    database::{
        collections,
        models::{
            parse_object_id,
            utils::{id_to_string, is_valid_email, non_empty, now_ts},
            Quote, QuoteStatus,
        },
        query::find_page,
    },
    errors::ApiError,
    filters::{Paginated, PaginationParams},
    handlers::{
        product::service::ProductService,
        quote::dto::{CreateQuoteRequest, QuoteListQuery, QuoteResponse},
    },
    services::Mailer,
};

/// Service layer for quote requests
pub struct QuoteService;

impl QuoteService {
    /// Store a quote request and notify staff
    pub async fn create(
        db: &Database,
        mailer: &Mailer,
        guest_id: Option<String>,
        request: CreateQuoteRequest,
    ) -> anyhow::Result<QuoteResponse> {
        let mut quote = build_quote(request)?;
        quote.guest_id = guest_id;

        if let Some(product_id) = quote.product_id {
            if !ProductService::exists(db, product_id).await? {
                return Err(
                    ApiError::NotFound(format!("Product {} not found", product_id)).into(),
                );
            }
        }

        let collection = db.collection::<Quote>(collections::QUOTES);
        let result = collection.insert_one(&quote).await?;
        quote.id = result.inserted_id.as_object_id();

        info!("Stored quote request from {}", quote.email);
        mailer.notify_quote(&quote);

        Ok(Self::map_to_response(quote))
    }

    /// Newest first, optionally narrowed to one status
    pub async fn list(
        db: &Database,
        query: &QuoteListQuery,
    ) -> anyhow::Result<Paginated<QuoteResponse>> {
        let mut filter = doc! {};
        if let Some(status) = query.status.as_deref() {
            let status = status
                .parse::<QuoteStatus>()
                .map_err(ApiError::BadRequest)?;
            filter.insert("status", status.as_str());
        }
        let params = PaginationParams::new(query.page, query.limit);

        let collection = db.collection::<Quote>(collections::QUOTES);
        let (quotes, total) = find_page(
            &collection,
            filter,
            doc! { "created_at": -1, "_id": -1 },
            &params,
        )
        .await?;

        debug!("Retrieved {} of {} quotes", quotes.len(), total);
        let data = quotes.into_iter().map(Self::map_to_response).collect();
        Ok(Paginated::new(data, &params, total))
    }

    pub async fn get_by_id(db: &Database, id: ObjectId) -> anyhow::Result<Option<QuoteResponse>> {
        let collection = db.collection::<Quote>(collections::QUOTES);
        let quote = collection.find_one(doc! { "_id": id }).await?;
        Ok(quote.map(Self::map_to_response))
    }

    pub async fn update_status(
        db: &Database,
        id: ObjectId,
        status: QuoteStatus,
    ) -> anyhow::Result<Option<QuoteResponse>> {
        let collection = db.collection::<Quote>(collections::QUOTES);
        let updated = collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "status": status.as_str(), "updated_at": now_ts() as i64 } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            info!("Quote {} is now {}", id, status);
        }
        Ok(updated.map(Self::map_to_response))
    }

    pub async fn delete(db: &Database, id: ObjectId) -> anyhow::Result<bool> {
        let collection = db.collection::<Quote>(collections::QUOTES);
        let result = collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    fn map_to_response(quote: Quote) -> QuoteResponse {
        QuoteResponse {
            id: id_to_string(quote.id),
            guest_id: quote.guest_id,
            name: quote.name,
            email: quote.email,
            phone: quote.phone,
            product_id: quote.product_id.map(|id| id.to_hex()),
            message: quote.message,
            budget: quote.budget,
            status: quote.status,
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        }
    }
}

/// Validate a quote request and turn it into a pending quote
pub fn build_quote(request: CreateQuoteRequest) -> Result<Quote, ApiError> {
    let name = request.name.trim().to_string();
    let email = request.email.trim().to_lowercase();
    let message = request.message.trim().to_string();

    if name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }
    if !is_valid_email(&email) {
        return Err(ApiError::BadRequest(format!("Invalid email '{}'", email)));
    }
    if let Some(budget) = request.budget {
        if !budget.is_finite() || budget < 0.0 {
            return Err(ApiError::BadRequest(
                "budget must be a non-negative number".to_string(),
            ));
        }
    }

    let mut quote = Quote::new(name, email, message);
    quote.phone = non_empty(request.phone);
    quote.budget = request.budget;
    quote.product_id = match non_empty(request.product_id) {
        Some(raw) => Some(parse_object_id(&raw)?),
        None => None,
    };
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateQuoteRequest {
        CreateQuoteRequest {
            name: " Ana ".into(),
            email: "Ana@Example.com".into(),
            phone: Some("  ".into()),
            product_id: None,
            message: "Looking for a 2ct oval".into(),
            budget: Some(12000.0),
        }
    }

    #[test]
    fn test_build_quote_normalizes() {
        let quote = build_quote(request()).unwrap();
        assert_eq!(quote.name, "Ana");
        assert_eq!(quote.email, "ana@example.com");
        assert_eq!(quote.phone, None);
        assert_eq!(quote.status, QuoteStatus::Pending);
    }

    #[test]
    fn test_build_quote_rejects_invalid_fields() {
        let mut empty_message = request();
        empty_message.message = "   ".into();
        assert!(matches!(build_quote(empty_message), Err(ApiError::BadRequest(_))));

        let mut bad_email = request();
        bad_email.email = "ana".into();
        assert!(matches!(build_quote(bad_email), Err(ApiError::BadRequest(_))));

        let mut negative = request();
        negative.budget = Some(-1.0);
        assert!(matches!(build_quote(negative), Err(ApiError::BadRequest(_))));

        let mut bad_product = request();
        bad_product.product_id = Some("xyz".into());
        assert!(matches!(build_quote(bad_product), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_build_quote_keeps_product() {
        let id = ObjectId::new();
        let mut with_product = request();
        with_product.product_id = Some(id.to_hex());
        assert_eq!(build_quote(with_product).unwrap().product_id, Some(id));
    }
}
