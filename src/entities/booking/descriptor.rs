//! Entity descriptor for Booking

use super::handlers::{
    BookingAppState, create_booking, delete_booking, get_booking, list_bookings, update_booking,
    update_booking_status,
};
use super::model::Booking;
use crate::core::resource::Resource;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, patch},
};

/// Descriptor for the Booking entity
pub struct BookingDescriptor {
    pub bookings: Resource<Booking>,
}

impl BookingDescriptor {
    pub fn new(bookings: Resource<Booking>) -> Self {
        Self { bookings }
    }
}

impl EntityDescriptor for BookingDescriptor {
    fn entity_type(&self) -> &str {
        "booking"
    }

    fn plural(&self) -> &str {
        "bookings"
    }

    fn build_routes(&self) -> Router {
        let state = BookingAppState {
            bookings: self.bookings.clone(),
        };

        Router::new()
            .route("/bookings", get(list_bookings).post(create_booking))
            .route(
                "/bookings/{id}",
                get(get_booking).put(update_booking).delete(delete_booking),
            )
            .route("/bookings/{id}/status", patch(update_booking_status))
            .with_state(state)
    }
}
