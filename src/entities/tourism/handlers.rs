//! Tourism package HTTP handlers

use super::model::{PackageStatus, TourismPackage};
use crate::core::envelope::Envelope;
use crate::core::error::ApiResult;
use crate::core::extractors::{JsonBody, QueryParams};
use crate::core::query::{Filter, ListQuery};
use crate::core::resource::{Resource, status_from_body};
use crate::core::validation::Validated;
use axum::extract::{Path, State};

/// Tourism-specific AppState
#[derive(Clone)]
pub struct TourismAppState {
    pub packages: Resource<TourismPackage>,
}

pub async fn create_package(
    State(state): State<TourismAppState>,
    Validated(package): Validated<TourismPackage>,
) -> ApiResult<Envelope<TourismPackage>> {
    let package = state.packages.create(package).await?;
    Ok(Envelope::created(package).with_message("Tourism package created successfully"))
}

/// `?category=` and `?status=` narrow the list
pub async fn list_packages(
    State(state): State<TourismAppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Envelope<Vec<TourismPackage>>> {
    let filter = Filter::new()
        .eq_opt("category", query.category.as_deref())
        .eq_opt("status", query.status.as_deref());
    Ok(Envelope::ok(state.packages.list(&filter).await?))
}

/// Active packages of one category
pub async fn list_packages_by_category(
    State(state): State<TourismAppState>,
    Path(category): Path<String>,
) -> ApiResult<Envelope<Vec<TourismPackage>>> {
    let filter = Filter::new()
        .eq("category", category)
        .eq("status", PackageStatus::Active.as_str());
    Ok(Envelope::ok(state.packages.list(&filter).await?))
}

pub async fn get_package(
    State(state): State<TourismAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<TourismPackage>> {
    Ok(Envelope::ok(state.packages.find(&id).await?))
}

pub async fn update_package(
    State(state): State<TourismAppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody,
) -> ApiResult<Envelope<TourismPackage>> {
    let package = state.packages.update(&id, patch).await?;
    Ok(Envelope::ok(package).with_message("Tourism package updated successfully"))
}

pub async fn delete_package(
    State(state): State<TourismAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<()>> {
    state.packages.delete(&id).await?;
    Ok(Envelope::message("Tourism package deleted successfully"))
}

pub async fn update_package_status(
    State(state): State<TourismAppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<TourismPackage>> {
    let package = state
        .packages
        .update_status(&id, status_from_body(&body))
        .await?;
    Ok(Envelope::ok(package).with_message("Tourism package status updated successfully"))
}
