use crate::core::currency::{CurrencyCode, RateSource};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Live quotes from exchangerate-api.com (`/v4/latest/{base}`).
pub struct ExchangeRateApiProvider {
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateSource for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_quotes(&self, base: CurrencyCode) -> Result<HashMap<String, f64>> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("finsense/1.0")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        debug!(count = data.rates.len(), "Parsed exchange rates");
        Ok(data.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{RateLoader, RateOrigin};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/latest/COP"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "provider": "https://www.exchangerate-api.com",
            "base": "COP",
            "date": "2025-01-15",
            "rates": {
                "COP": 1,
                "USD": 0.000244,
                "EUR": 0.000222,
                "JPY": 0.0371
            }
        }"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let quotes = provider.fetch_quotes(CurrencyCode::Cop).await.unwrap();
        assert_eq!(quotes.len(), 4);
        assert_eq!(quotes["USD"], 0.000244);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server(ResponseTemplate::new(500)).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_quotes(CurrencyCode::Cop).await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base currency: COP"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_response = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_quotes(CurrencyCode::Cop).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for COP")
        );
    }

    #[tokio::test]
    async fn test_loader_with_partial_live_response() {
        let mock_response = r#"{"base": "COP", "rates": {"USD": 0.00025, "BRL": 0.00125}}"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let provider = Arc::new(ExchangeRateApiProvider::new(&mock_server.uri()));
        let snapshot = RateLoader::new(provider, Duration::from_secs(3)).load().await;

        assert_eq!(snapshot.origin, RateOrigin::Live);
        assert!((snapshot.table.rate(CurrencyCode::Usd) - 4000.0).abs() < 1e-6);
        assert!((snapshot.table.rate(CurrencyCode::Brl) - 800.0).abs() < 1e-6);
        assert_eq!(snapshot.table.rate(CurrencyCode::Eur), 4500.0);
        assert_eq!(snapshot.table.rate(CurrencyCode::Cop), 1.0);
    }

    #[tokio::test]
    async fn test_loader_with_slow_api_falls_back() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"rates": {"USD": 0.00025}}"#)
                .set_delay(Duration::from_millis(500)),
        )
        .await;

        let provider = Arc::new(ExchangeRateApiProvider::new(&mock_server.uri()));
        let snapshot = RateLoader::new(provider, Duration::from_millis(50)).load().await;

        assert_eq!(snapshot.origin, RateOrigin::Fallback);
        assert_eq!(snapshot.table.rate(CurrencyCode::Usd), 4100.0);
    }
}
