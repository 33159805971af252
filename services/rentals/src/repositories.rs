//! Repositories for database operations
//!
//! Each entity has a repository trait so the rental workflow and the HTTP
//! handlers can run against PostgreSQL in production and against the
//! in-memory stores in tests.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Listing, NewListing, NewUser, Rental, User};

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryListingRepository, InMemoryRentalRepository, InMemoryUserRepository};
pub use postgres::{PgListingRepository, PgRentalRepository, PgUserRepository};

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Find a user by primary key
    async fn find_by_guid(&self, guid: Uuid) -> DatabaseResult<Option<User>>;
}

/// Listing persistence
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Create a new listing
    async fn create(&self, new_listing: &NewListing) -> DatabaseResult<Listing>;

    /// Find a listing by primary key
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Listing>>;

    /// All listings, newest first
    async fn list(&self) -> DatabaseResult<Vec<Listing>>;
}

/// Rental persistence. Rentals are only ever inserted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Insert a rental built by the workflow
    async fn insert(&self, rental: &Rental) -> DatabaseResult<()>;

    /// Find a rental by primary key
    async fn find_by_guid(&self, guid: Uuid) -> DatabaseResult<Option<Rental>>;

    /// Rentals of one listing, newest first
    async fn for_listing(&self, listing_guid: Uuid) -> DatabaseResult<Vec<Rental>>;
}
