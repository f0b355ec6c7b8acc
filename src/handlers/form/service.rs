use bson::{doc, oid::ObjectId, Document};
use log::{debug, info};
use mongodb::{options::ReturnDocument, Database};

use crate::{
    database::{
        collections,
        models::{
            utils::{id_to_string, is_valid_email, non_empty},
            FormKind, FormSubmission,
        },
        query::find_page,
    },
    errors::ApiError,
    filters::{Paginated, PaginationParams},
    handlers::form::dto::{CreateFormRequest, FormListQuery, FormResponse},
    services::Mailer,
};

pub struct FormService;

impl FormService {
    /// Store a submission and notify staff
    pub async fn submit(
        db: &Database,
        mailer: &Mailer,
        request: CreateFormRequest,
    ) -> anyhow::Result<FormResponse> {
        let mut form = build_form(request)?;

        let collection = db.collection::<FormSubmission>(collections::FORMS);
        let result = collection.insert_one(&form).await?;
        form.id = result.inserted_id.as_object_id();

        info!("Stored {} form from {}", form.kind.as_str(), form.email);
        mailer.notify_form(&form);

        Ok(Self::map_to_response(form))
    }

    pub async fn list(
        db: &Database,
        query: &FormListQuery,
    ) -> anyhow::Result<Paginated<FormResponse>> {
        let filter = listing_filter(query);
        let params = PaginationParams::new(query.page, query.limit);

        let collection = db.collection::<FormSubmission>(collections::FORMS);
        let (forms, total) = find_page(
            &collection,
            filter,
            doc! { "created_at": -1, "_id": -1 },
            &params,
        )
        .await?;

        debug!("Retrieved {} of {} form submissions", forms.len(), total);
        let data = forms.into_iter().map(Self::map_to_response).collect();
        Ok(Paginated::new(data, &params, total))
    }

    pub async fn mark_handled(
        db: &Database,
        id: ObjectId,
        handled: bool,
    ) -> anyhow::Result<Option<FormResponse>> {
        let collection = db.collection::<FormSubmission>(collections::FORMS);
        let updated = collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "handled": handled } })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(Self::map_to_response))
    }

    pub async fn delete(db: &Database, id: ObjectId) -> anyhow::Result<bool> {
        let collection = db.collection::<FormSubmission>(collections::FORMS);
        let result = collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    fn map_to_response(form: FormSubmission) -> FormResponse {
        FormResponse {
            id: id_to_string(form.id),
            kind: form.kind,
            name: form.name,
            email: form.email,
            phone: form.phone,
            subject: form.subject,
            message: form.message,
            preferred_date: form.preferred_date,
            handled: form.handled,
            created_at: form.created_at,
        }
    }
}

pub fn listing_filter(query: &FormListQuery) -> Document {
    let mut filter = doc! {};
    if let Some(kind) = query.kind {
        filter.insert("kind", kind.as_str());
    }
    if let Some(handled) = query.handled {
        filter.insert("handled", handled);
    }
    filter
}

/// Validate a submission; appointments need a preferred date
pub fn build_form(request: CreateFormRequest) -> Result<FormSubmission, ApiError> {
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

    let preferred_date = non_empty(request.preferred_date);
    if request.kind == FormKind::Appointment && preferred_date.is_none() {
        return Err(ApiError::BadRequest(
            "Appointments need a preferred_date".to_string(),
        ));
    }

    let mut form = FormSubmission::new(request.kind, name, email, message);
    form.phone = non_empty(request.phone);
    form.subject = non_empty(request.subject);
    form.preferred_date = preferred_date;
    Ok(form)
}
