//! Bike rental service
//!
//! Listings are rented through a hosted payments API: the buyer's card is
//! held for the listing price, the owner's bank account is credited and the
//! rental is recorded in PostgreSQL.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod payments;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
pub mod workflow;

pub use state::AppState;
pub use workflow::{RentalError, RentalService};
