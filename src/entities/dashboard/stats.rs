//! Dashboard aggregation
//!
//! Four totals, the pending-approval count and two recency feeds are read
//! concurrently. Monthly revenue is a separate read once the month boundary
//! is known.

use crate::core::error::ApiResult;
use crate::core::query::Filter;
use crate::core::resource::Resource;
use crate::entities::booking::Booking;
use crate::entities::form_response::{FormResponse, FormResponseStatus};
use crate::entities::investment::Investment;
use crate::entities::tourism::TourismPackage;
use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Size of each recency feed
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBooking {
    pub id: Uuid,
    pub full_name: String,
    pub package: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentInvestment {
    pub id: Uuid,
    pub title: String,
    pub price: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tourism_packages: usize,
    pub total_investments: usize,
    pub total_form_responses: usize,
    pub total_bookings: usize,
    pub recent_bookings: Vec<RecentBooking>,
    pub recent_investments: Vec<RecentInvestment>,
    pub monthly_revenue: f64,
    pub pending_approvals: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    pub bookings: Resource<Booking>,
    pub investments: Resource<Investment>,
    pub packages: Resource<TourismPackage>,
    pub responses: Resource<FormResponse>,
}

impl DashboardService {
    pub async fn stats(&self) -> ApiResult<DashboardStats> {
        let everything = Filter::new();
        let newest = Filter::new().limit(RECENT_LIMIT);
        let pending = Filter::new().eq("status", FormResponseStatus::New.as_str());

        let (
            total_tourism_packages,
            total_investments,
            total_form_responses,
            total_bookings,
            recent_bookings,
            recent_investments,
            pending_approvals,
        ) = tokio::try_join!(
            self.packages.count(&everything),
            self.investments.count(&everything),
            self.responses.count(&everything),
            self.bookings.count(&everything),
            self.bookings.list(&newest),
            self.investments.list(&newest),
            self.responses.count(&pending),
        )?;

        let this_month = Filter::new().since(month_start(Local::now()));
        let monthly_revenue = revenue(&self.bookings.list(&this_month).await?);

        Ok(DashboardStats {
            total_tourism_packages,
            total_investments,
            total_form_responses,
            total_bookings,
            recent_bookings: recent_bookings
                .into_iter()
                .map(|b| RecentBooking {
                    id: b.id,
                    full_name: b.full_name,
                    package: b.package,
                    status: b.status.to_string(),
                })
                .collect(),
            recent_investments: recent_investments
                .into_iter()
                .map(|i| RecentInvestment {
                    id: i.id,
                    title: i.title,
                    price: i.price,
                    status: i.status.to_string(),
                })
                .collect(),
            monthly_revenue,
            pending_approvals,
        })
    }
}

/// First instant of the current calendar month on the server clock
pub fn month_start(now: DateTime<Local>) -> DateTime<Utc> {
    let midnight = now
        .date_naive()
        .with_day(1)
        .and_then(|day| day.and_hms_opt(0, 0, 0));

    match midnight {
        Some(naive) => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
        None => now.with_timezone(&Utc),
    }
}

/// Sum of the `amount` carried by each booking
///
/// Bookings have no such field, so this is 0 until one is added.
pub fn revenue(bookings: &[Booking]) -> f64 {
    bookings
        .iter()
        .filter_map(|booking| serde_json::to_value(booking).ok())
        .map(|doc| doc.get("amount").and_then(Value::as_f64).unwrap_or(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::ValidatableEntity;
    use crate::entities::booking::model::tests::booking_payload;
    use chrono::Timelike;

    #[test]
    fn test_month_start_is_first_midnight() {
        let now = Local::now();
        let start = month_start(now).with_timezone(&Local);

        assert_eq!(start.day(), 1);
        assert_eq!(start.hour(), 0);
        assert_eq!(start.minute(), 0);
        assert_eq!(start.month(), now.month());
        assert!(start <= now);
    }

    #[test]
    fn test_revenue_of_bookings_is_zero() {
        let bookings = vec![
            Booking::from_payload(booking_payload()).unwrap(),
            Booking::from_payload(booking_payload()).unwrap(),
        ];
        assert_eq!(revenue(&bookings), 0.0);
        assert_eq!(revenue(&[]), 0.0);
    }
}
