use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bikerent_calendar::DateRange;
use bikerent_catalog::PricingEngine;
use bikerent_core::{RentalError, RentalService};
use bikerent_shared::models::{Bike, BookingErrorPayload, BookingRequest, BookingResponse};
use chrono::NaiveDate;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy)]
struct Reservation {
    bike_id: i64,
    from: NaiveDate,
    to: NaiveDate,
}

impl Reservation {
    fn overlaps(&self, bike_id: i64, from: NaiveDate, to: NaiveDate) -> bool {
        self.bike_id == bike_id && self.from <= to && from <= self.to
    }
}

/// In-process rental service, priced with the same engine as the widget
pub struct LocalRentalService {
    pricing: PricingEngine,
    bikes: HashMap<i64, Bike>,
    reservations: RwLock<Vec<Reservation>>,
    latency: Option<Duration>,
}

impl LocalRentalService {
    pub fn new(pricing: PricingEngine) -> Self {
        Self {
            pricing,
            bikes: HashMap::new(),
            reservations: RwLock::new(Vec::new()),
            latency: None,
        }
    }

    pub fn with_bike(mut self, bike: Bike) -> Self {
        self.bikes.insert(bike.id, bike);
        self
    }

    /// Delay every answer, to make the in-flight state observable
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn reservation_count(&self) -> usize {
        self.reservations.read().await.len()
    }
}

#[async_trait]
impl RentalService for LocalRentalService {
    async fn rent_bike(&self, request: &BookingRequest) -> Result<BookingResponse, RentalError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let (from, to) = request
            .dates()
            .filter(|(from, to)| from <= to)
            .ok_or_else(|| BookingErrorPayload::new("ValidationError", "Invalid booking dates"))?;

        let bike = self
            .bikes
            .get(&request.bike_id)
            .ok_or_else(|| BookingErrorPayload::new("NotFound", "Bike not found"))?;

        let mut reservations = self.reservations.write().await;
        if reservations.iter().any(|r| r.overlaps(bike.id, from, to)) {
            tracing::info!(bike_id = bike.id, %from, %to, "Rejecting overlapping rental");
            return Err(BookingErrorPayload::new("Conflict", "Bike unavailable").into());
        }

        let pricing = self.pricing.calculate(&DateRange::between(from, to), bike.rate);
        reservations.push(Reservation { bike_id: bike.id, from, to });

        tracing::info!(bike_id = bike.id, user_id = request.user_id, %from, %to, "Bike rented");
        Ok(BookingResponse {
            rent_amount: pricing.subtotal,
            fee: pricing.service_fee,
            total_amount: pricing.total,
        })
    }
}
