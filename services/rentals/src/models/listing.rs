//! Listing model and catalog-derived properties

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::catalog::{BikeType, UnknownBikeType};

/// Listing entity
///
/// `bike_type` is kept as the raw stored tag. Title, description and price
/// are derived from it and fail if the tag is not in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: Uuid,
    pub owner_guid: Uuid,
    pub bike_type: String,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn kind(&self) -> Result<BikeType, UnknownBikeType> {
        self.bike_type.parse()
    }

    pub fn title(&self) -> Result<&'static str, UnknownBikeType> {
        Ok(self.kind()?.title())
    }

    pub fn description(&self) -> Result<&'static str, UnknownBikeType> {
        Ok(self.kind()?.description())
    }

    /// Price in whole currency units
    pub fn price(&self) -> Result<i64, UnknownBikeType> {
        Ok(self.kind()?.price())
    }
}

/// New listing creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewListing {
    pub owner_guid: Uuid,
    pub bike_type: BikeType,
}

/// Listing with its catalog text resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingResponse {
    pub id: Uuid,
    pub owner_guid: Uuid,
    pub bike_type: BikeType,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Listing> for ListingResponse {
    type Error = UnknownBikeType;

    fn try_from(listing: Listing) -> Result<Self, Self::Error> {
        let kind = listing.kind()?;
        Ok(Self {
            id: listing.id,
            owner_guid: listing.owner_guid,
            bike_type: kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            price: kind.price(),
            created_at: listing.created_at,
        })
    }
}
