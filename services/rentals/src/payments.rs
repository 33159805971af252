//! Payments provider boundary
//!
//! The rental workflow talks to the hosted payments API only through
//! [`PaymentGateway`]. Resource references are the provider's URIs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod balanced;

pub use balanced::BalancedClient;

/// Customer profile held by the payments provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub uri: String,
    pub cards_uri: String,
    pub bank_accounts_uri: String,
    /// Default funding source, when the customer has chosen one
    #[serde(default)]
    pub source_uri: Option<String>,
}

/// Stored card usable to place a hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub uri: String,
    #[serde(default)]
    pub last_four: Option<String>,
}

/// Bank account usable to receive a credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub uri: String,
    pub credits_uri: String,
}

/// Provisional charge reservation against a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub uri: String,
    pub amount: i64,
}

/// Payout transfer to a bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    pub uri: String,
    pub amount: i64,
}

/// Errors raised by the payments provider or while talking to it
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("payments request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("payments provider rejected request ({status}): {description}")]
    Api {
        status: u16,
        category_code: Option<String>,
        description: String,
    },

    #[error("customer {0} has no funding source")]
    NoDefaultSource(String),
}

/// Operations the rental workflow needs from the payments provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Load a customer profile
    async fn fetch_customer(&self, customer_uri: &str) -> Result<Customer, PaymentError>;

    /// Cards stored on the customer
    async fn cards(&self, customer: &Customer) -> Result<Vec<Card>, PaymentError>;

    /// Bank accounts stored on the customer
    async fn bank_accounts(&self, customer: &Customer) -> Result<Vec<BankAccount>, PaymentError>;

    /// The card used when the caller names none
    async fn default_source(&self, customer: &Customer) -> Result<Card, PaymentError>;

    /// Look up a card by URI
    async fn find_card(&self, card_uri: &str) -> Result<Card, PaymentError>;

    /// Reserve `amount` cents on the card at `source_uri`
    async fn place_hold(&self, source_uri: &str, amount: i64) -> Result<Hold, PaymentError>;

    /// Pay `amount` cents out to a bank account
    async fn issue_credit(
        &self,
        bank_account: &BankAccount,
        amount: i64,
    ) -> Result<Credit, PaymentError>;
}
