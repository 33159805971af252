#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use rentals::AppState;
use rentals::models::{Listing, User};
use rentals::payments::{
    BankAccount, Card, Credit, Customer, Hold, PaymentError, PaymentGateway,
};
use rentals::repositories::{
    InMemoryListingRepository, InMemoryRentalRepository, InMemoryUserRepository,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Payment calls observed by [`RecordingGateway`]
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentCall {
    Hold { source_uri: String, amount: i64 },
    Credit { bank_account_uri: String, amount: i64 },
}

#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub cards: Vec<Card>,
    pub bank_accounts: Vec<BankAccount>,
    pub source_uri: Option<String>,
}

/// Fake payments provider with fixed customer profiles
#[derive(Default)]
pub struct RecordingGateway {
    profiles: Mutex<HashMap<String, Profile>>,
    calls: Mutex<Vec<PaymentCall>>,
}

impl RecordingGateway {
    pub fn with_profile(self, customer_uri: &str, profile: Profile) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(customer_uri.to_string(), profile);
        self
    }

    pub fn calls(&self) -> Vec<PaymentCall> {
        self.calls.lock().unwrap().clone()
    }

    fn profile(&self, customer_uri: &str) -> Result<Profile, PaymentError> {
        self.profiles
            .lock()
            .unwrap()
            .get(customer_uri)
            .cloned()
            .ok_or_else(|| not_found(customer_uri))
    }
}

fn not_found(uri: &str) -> PaymentError {
    PaymentError::Api {
        status: 404,
        category_code: Some("not-found".to_string()),
        description: format!("{uri} not found"),
    }
}

pub fn card(uri: &str) -> Card {
    Card {
        uri: uri.to_string(),
        last_four: None,
    }
}

pub fn bank_account(uri: &str) -> BankAccount {
    BankAccount {
        uri: uri.to_string(),
        credits_uri: format!("{uri}/credits"),
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn fetch_customer(&self, customer_uri: &str) -> Result<Customer, PaymentError> {
        let profile = self.profile(customer_uri)?;
        Ok(Customer {
            uri: customer_uri.to_string(),
            cards_uri: format!("{customer_uri}/cards"),
            bank_accounts_uri: format!("{customer_uri}/bank_accounts"),
            source_uri: profile.source_uri,
        })
    }

    async fn cards(&self, customer: &Customer) -> Result<Vec<Card>, PaymentError> {
        Ok(self.profile(&customer.uri)?.cards)
    }

    async fn bank_accounts(&self, customer: &Customer) -> Result<Vec<BankAccount>, PaymentError> {
        Ok(self.profile(&customer.uri)?.bank_accounts)
    }

    async fn default_source(&self, customer: &Customer) -> Result<Card, PaymentError> {
        let profile = self.profile(&customer.uri)?;
        match profile.source_uri {
            Some(uri) => Ok(card(&uri)),
            None => profile
                .cards
                .into_iter()
                .next()
                .ok_or_else(|| PaymentError::NoDefaultSource(customer.uri.clone())),
        }
    }

    async fn find_card(&self, card_uri: &str) -> Result<Card, PaymentError> {
        let known = self
            .profiles
            .lock()
            .unwrap()
            .values()
            .any(|profile| profile.cards.iter().any(|card| card.uri == card_uri));
        if known {
            Ok(card(card_uri))
        } else {
            Err(not_found(card_uri))
        }
    }

    async fn place_hold(&self, source_uri: &str, amount: i64) -> Result<Hold, PaymentError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(PaymentCall::Hold {
            source_uri: source_uri.to_string(),
            amount,
        });
        Ok(Hold {
            uri: format!("/v1/holds/HL{}", calls.len()),
            amount,
        })
    }

    async fn issue_credit(
        &self,
        bank_account: &BankAccount,
        amount: i64,
    ) -> Result<Credit, PaymentError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(PaymentCall::Credit {
            bank_account_uri: bank_account.uri.clone(),
            amount,
        });
        Ok(Credit {
            uri: format!("/v1/credits/CR{}", calls.len()),
            amount,
        })
    }
}

pub fn user(customer_uri: &str, registered: bool) -> User {
    User {
        guid: Uuid::new_v4(),
        email: format!("{}@example.com", Uuid::new_v4().simple()),
        password_hash: registered.then(|| "$argon2id$stub".to_string()),
        customer_uri: customer_uri.to_string(),
        created_at: Utc::now(),
    }
}

pub fn listing(owner: &User, bike_type: &str) -> Listing {
    Listing {
        id: Uuid::new_v4(),
        owner_guid: owner.guid,
        bike_type: bike_type.to_string(),
        created_at: Utc::now(),
    }
}

/// In-memory stores plus the fake gateway, wired into an [`AppState`]
pub struct Harness {
    pub users: InMemoryUserRepository,
    pub listings: InMemoryListingRepository,
    pub rentals: InMemoryRentalRepository,
    pub payments: Arc<RecordingGateway>,
    pub state: AppState,
}

impl Harness {
    pub fn new(payments: RecordingGateway) -> Self {
        let users = InMemoryUserRepository::new();
        let listings = InMemoryListingRepository::new();
        let rentals = InMemoryRentalRepository::new();
        let payments = Arc::new(payments);
        let state = AppState::new(
            Arc::new(users.clone()),
            Arc::new(listings.clone()),
            Arc::new(rentals.clone()),
            payments.clone(),
        );

        Self {
            users,
            listings,
            rentals,
            payments,
            state,
        }
    }
}
