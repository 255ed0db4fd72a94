//! Payment-intent provider.
//!
//! The provider is opaque: it takes an amount in minor units and returns a
//! client secret the browser uses to confirm the payment.
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("payment provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("payment provider response has no client secret")]
    MissingClientSecret,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync + 'static {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        method_types: &[&str],
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Convert a decimal price into minor currency units (cents).
///
/// Returns `None` for non-finite, non-positive or out-of-range prices.
pub fn amount_in_minor_units(price: f64) -> Option<i64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }
    let cents = (price * 100.0).round();
    if cents < 1.0 || cents > i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}

/// Stripe-compatible HTTP client (`POST /v1/payment_intents`, form-encoded).
#[derive(Clone)]
pub struct HttpPaymentProvider {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl std::fmt::Debug for HttpPaymentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the secret key
        f.debug_struct("HttpPaymentProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpPaymentProvider {
    pub fn new(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        })
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.base_url)
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentProvider {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        method_types: &[&str],
    ) -> Result<PaymentIntent, PaymentError> {
        let mut form: Vec<(&str, String)> = vec![
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
        ];
        form.extend(
            method_types
                .iter()
                .map(|m| ("payment_method_types[]", (*m).to_string())),
        );

        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| status.to_string());
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: IntentResponse = response.json().await?;
        let client_secret = body
            .client_secret
            .ok_or(PaymentError::MissingClientSecret)?;

        Ok(PaymentIntent { client_secret })
    }
}
