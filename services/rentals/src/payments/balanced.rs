//! HTTP client for the Balanced payments API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{error, info, warn};

use super::{BankAccount, Card, Credit, Customer, Hold, PaymentError, PaymentGateway};
use crate::config::PaymentsConfig;

/// A page of a collection resource
#[derive(Debug, Deserialize)]
struct Page<T> {
    items: Vec<T>,
}

/// Error document returned by the API on non-2xx responses
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    status_code: Option<u16>,
    category_code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct HoldRequest<'a> {
    source_uri: &'a str,
    amount: i64,
}

#[derive(Debug, Serialize)]
struct CreditRequest {
    amount: i64,
}

/// Balanced API client authenticated with the marketplace secret
#[derive(Clone)]
pub struct BalancedClient {
    http: Client,
    api_url: String,
    api_key_secret: String,
    marketplace_uri: String,
}

impl BalancedClient {
    pub fn new(config: &PaymentsConfig) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key_secret: config.api_key_secret.clone(),
            marketplace_uri: config.marketplace_uri.clone(),
        }
    }

    /// Absolute URL for a resource URI
    fn url(&self, uri: &str) -> String {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            uri.to_string()
        } else if uri.starts_with('/') {
            format!("{}{}", self.api_url, uri)
        } else {
            format!("{}/{}", self.api_url, uri)
        }
    }

    fn holds_uri(&self) -> String {
        format!("{}/holds", self.marketplace_uri.trim_end_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, uri: &str) -> Result<T, PaymentError> {
        let response = self
            .http
            .get(self.url(uri))
            .basic_auth(&self.api_key_secret, None::<&str>)
            .send()
            .await?;
        decode(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        uri: &str,
        body: &B,
    ) -> Result<T, PaymentError> {
        let response = self
            .http
            .post(self.url(uri))
            .basic_auth(&self.api_key_secret, None::<&str>)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PaymentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!("Unreadable payments API error body (HTTP {}): {}", status, err);
            String::new()
        }
    };
    let err = api_error(status.as_u16(), &body);
    error!("Payments API error: {}", err);
    Err(err)
}

fn api_error(status: u16, body: &str) -> PaymentError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    PaymentError::Api {
        status: parsed.status_code.unwrap_or(status),
        category_code: parsed.category_code,
        description: parsed
            .description
            .unwrap_or_else(|| format!("HTTP {}", status)),
    }
}

#[async_trait]
impl PaymentGateway for BalancedClient {
    async fn fetch_customer(&self, customer_uri: &str) -> Result<Customer, PaymentError> {
        self.get(customer_uri).await
    }

    async fn cards(&self, customer: &Customer) -> Result<Vec<Card>, PaymentError> {
        let page: Page<Card> = self.get(&customer.cards_uri).await?;
        Ok(page.items)
    }

    async fn bank_accounts(&self, customer: &Customer) -> Result<Vec<BankAccount>, PaymentError> {
        let page: Page<BankAccount> = self.get(&customer.bank_accounts_uri).await?;
        Ok(page.items)
    }

    async fn default_source(&self, customer: &Customer) -> Result<Card, PaymentError> {
        match &customer.source_uri {
            Some(source_uri) => self.find_card(source_uri).await,
            None => self
                .cards(customer)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| PaymentError::NoDefaultSource(customer.uri.clone())),
        }
    }

    async fn find_card(&self, card_uri: &str) -> Result<Card, PaymentError> {
        self.get(card_uri).await
    }

    async fn place_hold(&self, source_uri: &str, amount: i64) -> Result<Hold, PaymentError> {
        info!("Placing hold of {} on {}", amount, source_uri);
        self.post(&self.holds_uri(), &HoldRequest { source_uri, amount })
            .await
    }

    async fn issue_credit(
        &self,
        bank_account: &BankAccount,
        amount: i64,
    ) -> Result<Credit, PaymentError> {
        info!("Crediting {} to {}", amount, bank_account.uri);
        self.post(&bank_account.credits_uri, &CreditRequest { amount })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BalancedClient {
        BalancedClient::new(&PaymentsConfig {
            api_url: "https://api.balancedpayments.com/".to_string(),
            api_key_secret: "ak-test".to_string(),
            marketplace_uri: "/v1/marketplaces/MP1/".to_string(),
        })
    }

    #[test]
    fn test_url_joins_relative_uris() {
        let client = client();
        assert_eq!(
            client.url("/v1/customers/CU1"),
            "https://api.balancedpayments.com/v1/customers/CU1"
        );
        assert_eq!(
            client.url("v1/cards/CC1"),
            "https://api.balancedpayments.com/v1/cards/CC1"
        );
        assert_eq!(
            client.url("https://other.example/v1/cards/CC1"),
            "https://other.example/v1/cards/CC1"
        );
    }

    #[test]
    fn test_holds_are_created_on_the_marketplace() {
        assert_eq!(client().holds_uri(), "/v1/marketplaces/MP1/holds");
    }

    #[test]
    fn test_hold_request_body() {
        let body = serde_json::to_value(HoldRequest {
            source_uri: "/v1/cards/CC1",
            amount: 1500,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "source_uri": "/v1/cards/CC1", "amount": 1500 })
        );
    }

    #[test]
    fn test_api_error_uses_provider_document() {
        let err = api_error(
            409,
            r#"{"status_code": 402, "category_code": "card-declined", "description": "Card declined"}"#,
        );
        match err {
            PaymentError::Api {
                status,
                category_code,
                description,
            } => {
                assert_eq!(status, 402);
                assert_eq!(category_code.as_deref(), Some("card-declined"));
                assert_eq!(description, "Card declined");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_without_document() {
        let err = api_error(503, "<html>unavailable</html>");
        assert!(matches!(
            err,
            PaymentError::Api { status: 503, category_code: None, ref description } if description == "HTTP 503"
        ));
    }

    #[test]
    fn test_api_error_with_empty_body_keeps_status() {
        let err = api_error(502, "");
        assert!(matches!(
            err,
            PaymentError::Api { status: 502, category_code: None, ref description } if description == "HTTP 502"
        ));
    }

    #[test]
    fn test_decode_pages_and_customer() {
        let page: Page<BankAccount> = serde_json::from_str(
            r#"{"items": [{"uri": "/v1/bank_accounts/BA1", "credits_uri": "/v1/bank_accounts/BA1/credits"}], "total": 1}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);

        let customer: Customer = serde_json::from_str(
            r#"{"uri": "/v1/customers/CU1", "cards_uri": "/v1/customers/CU1/cards", "bank_accounts_uri": "/v1/customers/CU1/bank_accounts", "email": "x@example.com"}"#,
        )
        .unwrap();
        assert_eq!(customer.source_uri, None);
    }
}
