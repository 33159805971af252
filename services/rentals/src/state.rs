//! Application state shared across handlers

use std::sync::Arc;

use crate::payments::PaymentGateway;
use crate::repositories::{ListingRepository, RentalRepository, UserRepository};
use crate::workflow::RentalService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository>,
    pub listing_repository: Arc<dyn ListingRepository>,
    pub rental_repository: Arc<dyn RentalRepository>,
    pub rental_service: RentalService,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        listing_repository: Arc<dyn ListingRepository>,
        rental_repository: Arc<dyn RentalRepository>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        let rental_service = RentalService::new(
            user_repository.clone(),
            rental_repository.clone(),
            payments,
        );

        Self {
            user_repository,
            listing_repository,
            rental_repository,
            rental_service,
        }
    }
}
