//! PostgreSQL repositories

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{ListingRepository, RentalRepository, UserRepository};
use crate::models::{Listing, NewListing, NewUser, Rental, User};

/// User repository backed by the `users` table
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.email);

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (guid, email, password_hash, customer_uri, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING guid, email, password_hash, customer_uri, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.customer_uri)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)
    }

    async fn find_by_guid(&self, guid: Uuid) -> DatabaseResult<Option<User>> {
        info!("Finding user by guid: {}", guid);

        sqlx::query_as::<_, User>(
            r#"
            SELECT guid, email, password_hash, customer_uri, created_at
            FROM users
            WHERE guid = $1
            "#,
        )
        .bind(guid)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}

/// Listing repository backed by the `listings` table
#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    /// Create a new listing repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn create(&self, new_listing: &NewListing) -> DatabaseResult<Listing> {
        info!(
            "Creating {} listing for owner {}",
            new_listing.bike_type, new_listing.owner_guid
        );

        sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (id, owner_guid, bike_type, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_guid, bike_type, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_listing.owner_guid)
        .bind(new_listing.bike_type.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Listing>> {
        sqlx::query_as::<_, Listing>(
            r#"
            SELECT id, owner_guid, bike_type, created_at
            FROM listings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn list(&self) -> DatabaseResult<Vec<Listing>> {
        sqlx::query_as::<_, Listing>(
            r#"
            SELECT id, owner_guid, bike_type, created_at
            FROM listings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}

/// Rental repository backed by the `rentals` table
#[derive(Clone)]
pub struct PgRentalRepository {
    pool: PgPool,
}

impl PgRentalRepository {
    /// Create a new rental repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn insert(&self, rental: &Rental) -> DatabaseResult<()> {
        info!("Persisting rental {}", rental.guid);

        sqlx::query(
            r#"
            INSERT INTO rentals (guid, buyer_guid, owner_guid, listing_guid, debit_uri, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(rental.guid)
        .bind(rental.buyer_guid)
        .bind(rental.owner_guid)
        .bind(rental.listing_guid)
        .bind(&rental.debit_uri)
        .bind(rental.created_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;

        Ok(())
    }

    async fn find_by_guid(&self, guid: Uuid) -> DatabaseResult<Option<Rental>> {
        sqlx::query_as::<_, Rental>(
            r#"
            SELECT guid, buyer_guid, owner_guid, listing_guid, debit_uri, created_at
            FROM rentals
            WHERE guid = $1
            "#,
        )
        .bind(guid)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn for_listing(&self, listing_guid: Uuid) -> DatabaseResult<Vec<Rental>> {
        sqlx::query_as::<_, Rental>(
            r#"
            SELECT guid, buyer_guid, owner_guid, listing_guid, debit_uri, created_at
            FROM rentals
            WHERE listing_guid = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(listing_guid)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}
