//! Rental transaction workflow
//!
//! Renting a listing places a hold on the buyer's card, credits the owner's
//! bank account and records the rental. The steps run strictly in order and
//! nothing is rolled back: a failure after the hold leaves the hold in place,
//! and a failure after the credit leaves both. Concurrent rentals of the same
//! listing are not serialized.

use common::error::DatabaseError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::UnknownBikeType;
use crate::models::{Listing, Rental, User};
use crate::payments::{Card, Customer, PaymentError, PaymentGateway};
use crate::repositories::{RentalRepository, UserRepository};

/// Errors raised while renting a listing
#[derive(Error, Debug)]
pub enum RentalError {
    #[error("No card on file")]
    NoPaymentSource,

    #[error("Anonymous users must specify a card")]
    AnonymousCardRequired,

    #[error("No bank account on file")]
    NoPayoutAccount,

    #[error("Listing owner {0} not found")]
    OwnerNotFound(Uuid),

    #[error(transparent)]
    UnknownBikeType(#[from] UnknownBikeType),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Runs rentals against the payments provider and the rental store
#[derive(Clone)]
pub struct RentalService {
    users: Arc<dyn UserRepository>,
    rentals: Arc<dyn RentalRepository>,
    payments: Arc<dyn PaymentGateway>,
}

impl RentalService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        rentals: Arc<dyn RentalRepository>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            users,
            rentals,
            payments,
        }
    }

    /// Rent `listing` to `user`, charging `card_uri` or the user's default card.
    ///
    /// Without a `card_uri` the buyer must have a card on file and must be a
    /// registered user, checked in that order.
    ///
    /// The owner is credited as soon as the hold succeeds. A real marketplace
    /// would wait for the rental to be fulfilled before paying out; this one
    /// pays immediately.
    pub async fn rent_to(
        &self,
        listing: &Listing,
        user: &User,
        card_uri: Option<&str>,
    ) -> Result<Rental, RentalError> {
        let buyer = self.payments.fetch_customer(&user.customer_uri).await?;

        let card = match card_uri {
            Some(card_uri) => self.payments.find_card(card_uri).await?,
            None => self.default_card(user, &buyer).await?,
        };

        let owner_user = self
            .users
            .find_by_guid(listing.owner_guid)
            .await?
            .ok_or(RentalError::OwnerNotFound(listing.owner_guid))?;
        let owner = self.payments.fetch_customer(&owner_user.customer_uri).await?;

        let amount = listing.kind()?.price_minor_units();
        let hold = self.payments.place_hold(&card.uri, amount).await?;
        info!(
            "Placed hold {} of {} for listing {} by user {}",
            hold.uri, amount, listing.id, user.guid
        );

        let rental = Rental::new(user.guid, owner_user.guid, listing.id, hold.uri);

        let bank_accounts = self.payments.bank_accounts(&owner).await?;
        let Some(bank_account) = bank_accounts.first() else {
            warn!(
                "Owner {} has no bank account; hold {} left in place",
                owner_user.guid, rental.debit_uri
            );
            return Err(RentalError::NoPayoutAccount);
        };

        let credit = self.payments.issue_credit(bank_account, amount).await?;
        info!("Issued credit {} to owner {}", credit.uri, owner_user.guid);

        if let Err(err) = self.rentals.insert(&rental).await {
            warn!(
                "Rental not persisted after hold {} and credit {}: {}",
                rental.debit_uri, credit.uri, err
            );
            return Err(err.into());
        }

        info!("Rental {} recorded", rental.guid);
        Ok(rental)
    }

    async fn default_card(
        &self,
        user: &User,
        buyer: &Customer,
    ) -> Result<Card, RentalError> {
        if self.payments.cards(buyer).await?.is_empty() {
            return Err(RentalError::NoPaymentSource);
        }
        if !user.has_password() {
            return Err(RentalError::AnonymousCardRequired);
        }
        Ok(self.payments.default_source(buyer).await?)
    }
}
