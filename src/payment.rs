use serde::Deserialize;

use crate::config::Config;
use crate::resp::problem::Problem;

/// Boundary client for the card-payment processor. Only payment-intent
/// creation is used; confirmation happens entirely client-side.
#[derive(Clone)]
pub struct PaymentClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Handed to the browser verbatim so it can complete the payment.
    pub client_secret: String,
}

impl PaymentClient {
    pub fn new(config: &Config) -> PaymentClient {
        if config.payment_secret_key.is_empty() {
            tracing::warn!("No payment processor secret configured; intent creation will fail.");
        }

        PaymentClient {
            http: reqwest::Client::new(),
            secret_key: config.payment_secret_key.clone(),
            api_base: config.payment_api_base.clone(),
        }
    }

    /// Creates a payment intent for `amount` minor units of the fixed
    /// currency and returns the processor's client-side secret.
    pub async fn create_intent(&self, amount: i64) -> Result<PaymentIntent, Problem> {
        let params = [
            ("amount", amount.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .http
            .post(format!("{}/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

impl std::fmt::Debug for PaymentClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentClient:{}", self.api_base)
    }
}

/// Whole-currency price to processor minor units.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_convert_to_minor_units() {
        assert_eq!(to_minor_units(25.0), 2500);
        assert_eq!(to_minor_units(19.99), 1999);
        assert_eq!(to_minor_units(0.0), 0);
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let mut config = crate::config::Config::default();
        config.payment_secret_key = "sk_test_secret".to_string();

        let client = PaymentClient::new(&config);

        assert!(!format!("{:?}", client).contains("sk_test_secret"));
    }
}
