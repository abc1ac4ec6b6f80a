//! Booking HTTP handlers

use super::model::Booking;
use crate::core::envelope::Envelope;
use crate::core::error::ApiResult;
use crate::core::extractors::{JsonBody, QueryParams};
use crate::core::query::ListQuery;
use crate::core::resource::{Resource, status_from_body};
use crate::core::validation::Validated;
use axum::extract::{Path, State};

/// Booking-specific AppState
#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Resource<Booking>,
}

pub async fn create_booking(
    State(state): State<BookingAppState>,
    Validated(booking): Validated<Booking>,
) -> ApiResult<Envelope<Booking>> {
    let booking = state.bookings.create(booking).await?;
    Ok(Envelope::created(booking).with_message("Booking created successfully"))
}

pub async fn list_bookings(
    State(state): State<BookingAppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Envelope<Vec<Booking>>> {
    let bookings = state.bookings.list(&query.filter()).await?;
    Ok(Envelope::ok(bookings))
}

pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Booking>> {
    Ok(Envelope::ok(state.bookings.find(&id).await?))
}

pub async fn update_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody,
) -> ApiResult<Envelope<Booking>> {
    let booking = state.bookings.update(&id, patch).await?;
    Ok(Envelope::ok(booking).with_message("Booking updated successfully"))
}

pub async fn delete_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<()>> {
    state.bookings.delete(&id).await?;
    Ok(Envelope::message("Booking deleted successfully"))
}

pub async fn update_booking_status(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Envelope<Booking>> {
    let booking = state
        .bookings
        .update_status(&id, status_from_body(&body))
        .await?;
    Ok(Envelope::ok(booking).with_message("Booking status updated successfully"))
}
