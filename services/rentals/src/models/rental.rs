//! Rental model and relationship accessors

use chrono::{DateTime, Utc};
use common::error::DatabaseError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use super::{Listing, ListingResponse, User, UserResponse};
use crate::repositories::{ListingRepository, UserRepository};

/// Rental entity, the record of one completed hold-and-credit transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub guid: Uuid,
    pub buyer_guid: Uuid,
    pub owner_guid: Uuid,
    pub listing_guid: Uuid,
    /// URI of the hold placed on the buyer's card
    pub debit_uri: String,
    pub created_at: DateTime<Utc>,
}

/// Failure to resolve a related record
#[derive(Error, Debug)]
pub enum RelationError {
    #[error("{entity} {key} not found")]
    Missing { entity: &'static str, key: Uuid },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl Rental {
    pub fn new(buyer_guid: Uuid, owner_guid: Uuid, listing_guid: Uuid, debit_uri: String) -> Self {
        Self {
            guid: Uuid::new_v4(),
            buyer_guid,
            owner_guid,
            listing_guid,
            debit_uri,
            created_at: Utc::now(),
        }
    }

    /// The listing owner. A missing owner is an integrity violation.
    pub async fn owner(&self, users: &dyn UserRepository) -> Result<User, RelationError> {
        users
            .find_by_guid(self.owner_guid)
            .await?
            .ok_or(RelationError::Missing {
                entity: "user",
                key: self.owner_guid,
            })
    }

    /// The renting user, or `None` once the buyer record has been purged.
    /// Rental history outlives buyers, so unlike `owner` this does not fail.
    pub async fn buyer(&self, users: &dyn UserRepository) -> Result<Option<User>, RelationError> {
        Ok(users.find_by_guid(self.buyer_guid).await?)
    }

    /// The rented listing
    pub async fn bike(&self, listings: &dyn ListingRepository) -> Result<Listing, RelationError> {
        listings
            .find_by_id(self.listing_guid)
            .await?
            .ok_or(RelationError::Missing {
                entity: "listing",
                key: self.listing_guid,
            })
    }
}

/// Rental with its related records resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalDetails {
    #[serde(flatten)]
    pub rental: Rental,
    pub owner: UserResponse,
    pub buyer: Option<UserResponse>,
    pub bike: ListingResponse,
}
