//! Registration HTTP handlers (`/registrations`)

use super::model::Registration;
use super::workflow::{Populated, RegistrationService};
use crate::core::envelope::Envelope;
use crate::core::error::ApiResult;
use crate::core::extractors::{JsonBody, QueryParams};
use crate::core::query::ListQuery;
use crate::core::resource::status_from_body;
use crate::entities::investment::Investment;
use axum::extract::{Path, State};

/// Registration-specific AppState
#[derive(Clone)]
pub struct RegistrationAppState {
    pub service: RegistrationService,
}

pub async fn create_registration(
    State(state): State<RegistrationAppState>,
    JsonBody(payload): JsonBody,
) -> ApiResult<Envelope<Registration>> {
    let registration = state.service.register(payload).await?;
    Ok(Envelope::created(registration).with_message("Registration created successfully"))
}

/// `?type=` and `?status=` narrow the list
pub async fn list_registrations(
    State(state): State<RegistrationAppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Envelope<Vec<Populated<Investment>>>> {
    let filter = query.filter();
    let registrations = state.service.registrations().list(&filter).await?;
    let rows = state.service.populate_all(registrations).await?;
    Ok(Envelope::ok(rows))
}

pub async fn get_registration(
    State(state): State<RegistrationAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Populated<Investment>>> {
    let registration = state.service.registrations().find(&id).await?;
    Ok(Envelope::ok(state.service.populate(registration).await?))
}

pub async fn update_registration_status(
    State(state): State<RegistrationAppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<Registration>> {
    let registration = state
        .service
        .registrations()
        .update_status(&id, status_from_body(&body))
        .await?;
    Ok(Envelope::ok(registration).with_message("Registration status updated successfully"))
}

pub async fn delete_registration(
    State(state): State<RegistrationAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<()>> {
    state.service.remove(&id).await?;
    Ok(Envelope::message("Registration deleted successfully"))
}
