//! Form response HTTP handlers

use super::model::FormResponse;
use crate::core::envelope::Envelope;
use crate::core::error::{ApiResult, EntityError};
use crate::core::extractors::{JsonBody, QueryParams, parse_reference};
use crate::core::query::ListQuery;
use crate::core::resource::{Resource, status_from_body};
use crate::core::validation::ValidatableEntity;
use crate::entities::investment::Investment;
use crate::entities::tourism::TourismPackage;
use axum::extract::{Path, State};
use serde_json::Value;

/// FormResponse-specific AppState
#[derive(Clone)]
pub struct FormResponseAppState {
    pub responses: Resource<FormResponse>,
    pub investments: Resource<Investment>,
    pub packages: Resource<TourismPackage>,
}

impl FormResponseAppState {
    /// Title of the referenced package or property, 404 when it is gone
    async fn referenced_title(&self, payload: &Value) -> ApiResult<(&'static str, String)> {
        match payload.get("type").and_then(Value::as_str) {
            Some("tourism") => {
                let package = match parse_reference(payload.get("packageId")) {
                    Some(id) => self.packages.get(&id).await?,
                    None => None,
                };
                package
                    .map(|p| ("packageTitle", p.title))
                    .ok_or_else(|| EntityError::reference_not_found("Tourism package", "").into())
            }
            _ => {
                let property = match parse_reference(payload.get("propertyId")) {
                    Some(id) => self.investments.get(&id).await?,
                    None => None,
                };
                property
                    .map(|p| ("propertyTitle", p.title))
                    .ok_or_else(|| EntityError::reference_not_found("Property", "").into())
            }
        }
    }
}

/// The title is always copied from the referenced document
pub async fn create_form_response(
    State(state): State<FormResponseAppState>,
    JsonBody(mut payload): JsonBody,
) -> ApiResult<Envelope<FormResponse>> {
    if let Some(obj) = payload.as_object_mut() {
        obj.remove("status");
    }
    let mut payload = FormResponse::validate_payload(payload)?;

    let (title_field, title) = state.referenced_title(&payload).await?;
    if let Some(obj) = payload.as_object_mut() {
        obj.insert(title_field.to_string(), Value::String(title));
    }

    let response = state
        .responses
        .create(FormResponse::from_payload(payload)?)
        .await?;
    Ok(Envelope::created(response).with_message("Form response created successfully"))
}

/// `?type=` and `?status=` narrow the list
pub async fn list_form_responses(
    State(state): State<FormResponseAppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Envelope<Vec<FormResponse>>> {
    let responses = state.responses.list(&query.filter()).await?;
    Ok(Envelope::ok(responses).with_message("Form responses retrieved successfully"))
}

pub async fn get_form_response(
    State(state): State<FormResponseAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<FormResponse>> {
    let response = state.responses.find(&id).await?;
    Ok(Envelope::ok(response).with_message("Form response retrieved successfully"))
}

pub async fn update_form_response_status(
    State(state): State<FormResponseAppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<FormResponse>> {
    let response = state
        .responses
        .update_status(&id, status_from_body(&body))
        .await?;
    Ok(Envelope::ok(response).with_message("Form response status updated successfully"))
}

pub async fn delete_form_response(
    State(state): State<FormResponseAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<()>> {
    state.responses.delete(&id).await?;
    Ok(Envelope::message("Form response deleted successfully"))
}
