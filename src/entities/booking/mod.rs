//! Bookings: stay requests from the public booking form

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::BookingDescriptor;
pub use model::{Booking, BookingStatus, ContactPreference};
