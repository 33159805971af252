//! In-memory repositories
//!
//! Thread-safe stores over `Arc<RwLock<HashMap<..>>>` implementing the same
//! traits as the PostgreSQL repositories. Used by the test suites.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ListingRepository, RentalRepository, UserRepository};
use crate::models::{Listing, NewListing, NewUser, Rental, User};

/// In-memory user store
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fully built user, replacing any user with the same guid.
    pub async fn put(&self, user: User) {
        self.users.write().await.insert(user.guid, user);
    }

    /// Drop a user, as a purge of the users table would.
    pub async fn remove(&self, guid: Uuid) -> Option<User> {
        self.users.write().await.remove(&guid)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == new_user.email) {
            return Err(DatabaseError::Constraint(format!(
                "email {} already registered",
                new_user.email
            )));
        }

        let user = User {
            guid: Uuid::new_v4(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            customer_uri: new_user.customer_uri.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.guid, user.clone());
        Ok(user)
    }

    async fn find_by_guid(&self, guid: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.users.read().await.get(&guid).cloned())
    }
}

/// In-memory listing store
#[derive(Default, Clone)]
pub struct InMemoryListingRepository {
    listings: Arc<RwLock<HashMap<Uuid, Listing>>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a listing as-is, including tags outside the catalog.
    pub async fn put(&self, listing: Listing) {
        self.listings.write().await.insert(listing.id, listing);
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn create(&self, new_listing: &NewListing) -> DatabaseResult<Listing> {
        let listing = Listing {
            id: Uuid::new_v4(),
            owner_guid: new_listing.owner_guid,
            bike_type: new_listing.bike_type.as_str().to_string(),
            created_at: Utc::now(),
        };
        self.listings
            .write()
            .await
            .insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Listing>> {
        Ok(self.listings.read().await.get(&id).cloned())
    }

    async fn list(&self) -> DatabaseResult<Vec<Listing>> {
        let mut listings: Vec<Listing> = self.listings.read().await.values().cloned().collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }
}

/// In-memory rental store
#[derive(Default, Clone)]
pub struct InMemoryRentalRepository {
    rentals: Arc<RwLock<HashMap<Uuid, Rental>>>,
}

impl InMemoryRentalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted rentals
    pub async fn count(&self) -> usize {
        self.rentals.read().await.len()
    }
}

#[async_trait]
impl RentalRepository for InMemoryRentalRepository {
    async fn insert(&self, rental: &Rental) -> DatabaseResult<()> {
        let mut rentals = self.rentals.write().await;
        if rentals.contains_key(&rental.guid) {
            return Err(DatabaseError::Constraint(format!(
                "rental {} already exists",
                rental.guid
            )));
        }
        rentals.insert(rental.guid, rental.clone());
        Ok(())
    }

    async fn find_by_guid(&self, guid: Uuid) -> DatabaseResult<Option<Rental>> {
        Ok(self.rentals.read().await.get(&guid).cloned())
    }

    async fn for_listing(&self, listing_guid: Uuid) -> DatabaseResult<Vec<Rental>> {
        let mut rentals: Vec<Rental> = self
            .rentals
            .read()
            .await
            .values()
            .filter(|rental| rental.listing_guid == listing_guid)
            .cloned()
            .collect();
        rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rentals)
    }
}
