//! Rentals service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{
        CreateListingRequest, CreateUserRequest, Listing, ListingResponse, NewListing, NewUser,
        Rental, RentRequest, RentalDetails, User, UserResponse, hash_password,
    },
    state::AppState,
    validation::{validate_customer_uri, validate_email, validate_password},
};

/// Create the router for the rentals service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", post(create_user))
        .route("/users/:guid", get(get_user))
        .route("/listings", post(create_listing).get(get_listings))
        .route("/listings/:id", get(get_listing))
        .route("/listings/:id/rent", post(rent_listing))
        .route("/listings/:id/rentals", get(get_listing_rentals))
        .route("/rentals/:guid", get(get_rental))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "rentals-service"
    }))
}

async fn find_user(state: &AppState, guid: Uuid) -> ApiResult<User> {
    state
        .user_repository
        .find_by_guid(guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", guid)))
}

async fn find_listing(state: &AppState, id: Uuid) -> ApiResult<Listing> {
    state
        .listing_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Listing {} not found", id)))
}

/// Register a user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validate_customer_uri(&payload.customer_uri).map_err(ApiError::BadRequest)?;

    let password_hash = match payload.password.as_deref() {
        Some(password) => {
            validate_password(password).map_err(ApiError::BadRequest)?;
            let hash = hash_password(password).map_err(|e| {
                error!("{}", e);
                ApiError::InternalServerError
            })?;
            Some(hash)
        }
        None => None,
    };

    let user = state
        .user_repository
        .create(&NewUser {
            email: payload.email,
            password_hash,
            customer_uri: payload.customer_uri,
        })
        .await?;

    info!("Registered user {}", user.guid);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get a user by guid
pub async fn get_user(
    State(state): State<AppState>,
    Path(guid): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let user = find_user(&state, guid).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a listing for an existing owner
pub async fn create_listing(
    State(state): State<AppState>,
    Json(payload): Json<CreateListingRequest>,
) -> ApiResult<impl IntoResponse> {
    if state
        .user_repository
        .find_by_guid(payload.owner_guid)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest(format!(
            "Owner {} not found",
            payload.owner_guid
        )));
    }

    let listing = state
        .listing_repository
        .create(&NewListing {
            owner_guid: payload.owner_guid,
            bike_type: payload.bike_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ListingResponse::try_from(listing)?)))
}

/// Get all listings
pub async fn get_listings(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let listings = state
        .listing_repository
        .list()
        .await?
        .into_iter()
        .map(ListingResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(listings))
}

/// Get a listing by id
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let listing = find_listing(&state, id).await?;
    Ok(Json(ListingResponse::try_from(listing)?))
}

/// Rent a listing
pub async fn rent_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RentRequest>,
) -> ApiResult<impl IntoResponse> {
    let listing = find_listing(&state, id).await?;
    let user = find_user(&state, payload.user_guid).await?;

    info!("User {} renting listing {}", user.guid, listing.id);
    let rental = state
        .rental_service
        .rent_to(&listing, &user, payload.card_uri.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(rental)))
}

/// Get the rental history of a listing
pub async fn get_listing_rentals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let listing = find_listing(&state, id).await?;
    let rentals: Vec<Rental> = state.rental_repository.for_listing(listing.id).await?;
    Ok(Json(rentals))
}

/// Get a rental with its owner, buyer and bike
pub async fn get_rental(
    State(state): State<AppState>,
    Path(guid): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let rental = state
        .rental_repository
        .find_by_guid(guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Rental {} not found", guid)))?;

    let owner = rental.owner(state.user_repository.as_ref()).await?;
    let buyer = rental.buyer(state.user_repository.as_ref()).await?;
    let bike = rental.bike(state.listing_repository.as_ref()).await?;

    let details = RentalDetails {
        owner: owner.into(),
        buyer: buyer.map(UserResponse::from),
        bike: ListingResponse::try_from(bike)?,
        rental,
    };

    Ok(Json(details))
}
