//! Domain models and API request payloads

use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::BikeType;

pub mod listing;
pub mod rental;
pub mod user;

pub use listing::{Listing, ListingResponse, NewListing};
pub use rental::{RelationError, Rental, RentalDetails};
pub use user::{NewUser, PasswordError, User, UserResponse, hash_password};

/// Request for user registration. Omitting the password registers an
/// anonymous user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: Option<String>,
    pub customer_uri: String,
}

/// Request for listing creation
#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub owner_guid: Uuid,
    pub bike_type: BikeType,
}

/// Request to rent a listing
#[derive(Debug, Deserialize)]
pub struct RentRequest {
    pub user_guid: Uuid,
    /// Card to charge instead of the user's default card
    pub card_uri: Option<String>,
}
