//! Investment HTTP handlers

use super::model::Investment;
use crate::core::envelope::Envelope;
use crate::core::error::ApiResult;
use crate::core::extractors::{JsonBody, QueryParams};
use crate::core::query::ListQuery;
use crate::core::resource::{Resource, status_from_body};
use crate::core::validation::Validated;
use axum::extract::{Path, State};
use serde_json::{Map, Value};

/// Investment-specific AppState
#[derive(Clone)]
pub struct InvestmentAppState {
    pub investments: Resource<Investment>,
}

pub async fn list_investments(
    State(state): State<InvestmentAppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Envelope<Vec<Investment>>> {
    let investments = state.investments.list(&query.filter()).await?;
    let count = investments.len();
    Ok(Envelope::ok(investments).with_count(count))
}

pub async fn get_investment(
    State(state): State<InvestmentAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Investment>> {
    Ok(Envelope::ok(state.investments.find(&id).await?))
}

pub async fn create_investment(
    State(state): State<InvestmentAppState>,
    Validated(investment): Validated<Investment>,
) -> ApiResult<Envelope<Investment>> {
    let investment = state.investments.create(investment).await?;
    Ok(Envelope::created(investment))
}

pub async fn update_investment(
    State(state): State<InvestmentAppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody,
) -> ApiResult<Envelope<Investment>> {
    Ok(Envelope::ok(state.investments.update(&id, patch).await?))
}

/// Registrations pointing at the property are left in place.
pub async fn delete_investment(
    State(state): State<InvestmentAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Value>> {
    let removed = state.investments.delete(&id).await?;
    if !removed.registrations.is_empty() {
        tracing::warn!(
            investment = %removed.id,
            orphaned = removed.registrations.len(),
            "deleted investment still had registrations"
        );
    }
    Ok(Envelope::ok(Value::Object(Map::new())))
}

pub async fn update_investment_status(
    State(state): State<InvestmentAppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<Investment>> {
    let investment = state
        .investments
        .update_status(&id, status_from_body(&body))
        .await?;
    Ok(Envelope::ok(investment).with_message("Investment status updated successfully"))
}
