//! Investment-only registration handlers (`/property-registrations`)
//!
//! An older intake path for the property pages. Records land in the same
//! registrations collection as `/registrations` with `type = investment`.

use super::model::Registration;
use super::handlers::RegistrationAppState;
use super::workflow::{Populated, PropertySummary};
use crate::core::envelope::Envelope;
use crate::core::error::{ApiResult, ValidationError};
use crate::core::extractors::{JsonBody, QueryParams};
use crate::core::query::{Filter, PageQuery};
use crate::core::resource::status_from_body;
use axum::extract::{Path, State};
use serde_json::{Map, Value, json};

/// Every one of these must be a non-blank string
const INTAKE_FIELDS: &[&str] = &[
    "propertyId",
    "name",
    "email",
    "country",
    "state",
    "phone",
    "occupation",
    "requirements",
];

/// Keys a property registration update may touch
const UPDATABLE_FIELDS: &[&str] = &[
    "name",
    "email",
    "country",
    "state",
    "phone",
    "occupation",
    "requirements",
    "status",
];

fn investment_only(filter: Filter) -> Filter {
    filter.eq("type", "investment")
}

pub async fn create_property_registration(
    State(state): State<RegistrationAppState>,
    JsonBody(payload): JsonBody,
) -> ApiResult<Envelope<Registration>> {
    let complete = INTAKE_FIELDS.iter().all(|field| {
        payload
            .get(*field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    });
    if !complete {
        return Err(ValidationError::Incomplete {
            message: "All fields are required",
        }
        .into());
    }

    let mut payload = payload;
    if let Some(obj) = payload.as_object_mut() {
        let requirements = obj.get("requirements").cloned().unwrap_or(Value::Null);
        obj.entry("message").or_insert(requirements);
        obj.insert("type".to_string(), json!("investment"));
        obj.remove("packageId");
    }

    let registration = state.service.register(payload).await?;
    Ok(Envelope::created(registration).with_message("Registration created successfully"))
}

/// Paginated, with `property {id, title, price}` on every row
pub async fn list_property_registrations(
    State(state): State<RegistrationAppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Envelope<Vec<Populated<PropertySummary>>>> {
    let filter = investment_only(query.filter());
    let (rows, pagination) = state
        .service
        .page_with_properties(&filter, query.page())
        .await?;
    Ok(Envelope::ok(rows).with_pagination(pagination))
}

pub async fn get_property_registration(
    State(state): State<RegistrationAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Populated<PropertySummary>>> {
    let registration = state.service.registrations().find(&id).await?;
    Ok(Envelope::ok(
        state.service.with_property_details(registration).await?,
    ))
}

/// Only personal fields and `status` are taken from the body
pub async fn update_property_registration(
    State(state): State<RegistrationAppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<Registration>> {
    let patch: Map<String, Value> = body
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter(|(key, value)| UPDATABLE_FIELDS.contains(&key.as_str()) && !value.is_null())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    let registration = state
        .service
        .registrations()
        .update(&id, Value::Object(patch))
        .await?;
    Ok(Envelope::ok(registration).with_message("Registration updated successfully"))
}

pub async fn delete_property_registration(
    State(state): State<RegistrationAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<()>> {
    state.service.remove(&id).await?;
    Ok(Envelope::message("Registration deleted successfully"))
}

/// Newest first, `?status=` optional
pub async fn list_registrations_by_property(
    State(state): State<RegistrationAppState>,
    Path(property_id): Path<String>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Envelope<Vec<Registration>>> {
    let filter = Filter::new()
        .eq("propertyId", property_id)
        .eq_opt("status", query.status.as_deref());
    let (rows, pagination) = state
        .service
        .registrations()
        .page(&filter, query.page())
        .await?;
    Ok(Envelope::ok(rows).with_pagination(pagination))
}

pub async fn update_property_registration_status(
    State(state): State<RegistrationAppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<Registration>> {
    let registration = state
        .service
        .registrations()
        .update_status(&id, status_from_body(&body))
        .await?;
    Ok(Envelope::ok(registration).with_message("Status updated successfully"))
}
