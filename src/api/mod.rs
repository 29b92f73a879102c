// Remote Catalog Client - thin typed wrapper over the product API
//
// Two endpoints are consumed:
//   GET {base}/products        -> full product array
//   PUT {base}/products/{id}   -> updated product, or error JSON {message?}
//
// Failures are classified immediately (see error.rs); no retries happen at
// this layer - whether to retry is the caller's decision. No timeout either:
// the UI gates a single in-flight request at a time and the transport is
// trusted to eventually resolve or reject.

mod error;

pub use error::{FetchError, UpdateError};

use crate::catalog::{Product, ProductPatch};
use anyhow::{Context, Result};

/// HTTP client scoped to one catalog base URL
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stockpit/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full product collection
    pub async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = format!("{}/products", self.base_url);
        tracing::debug!("Fetching product list from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                status: status.as_u16(),
            });
        }

        let products: Vec<Product> = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        tracing::info!("Fetched {} products", products.len());
        Ok(products)
    }

    /// Send a partial update for one product and return the server's copy
    pub async fn update_product(
        &self,
        id: u64,
        patch: &ProductPatch,
    ) -> Result<Product, UpdateError> {
        let url = format!("{}/products/{}", self.base_url, id);
        tracing::debug!("Updating product {} via {}", id, url);

        let response = self
            .client
            .put(&url)
            .json(patch)
            .send()
            .await
            .map_err(|e| UpdateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_update_failure(id, status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| UpdateError::Decode(e.to_string()))
    }
}

/// Map a non-success update response onto the failure taxonomy.
///
/// Pure function of status + body so the classification the toasts depend
/// on can be unit-tested without a server.
fn classify_update_failure(id: u64, status: u16, body: &str) -> UpdateError {
    match status {
        404 => UpdateError::NotFound { id },
        400 => UpdateError::Rejected {
            message: server_message(body)
                .unwrap_or_else(|| "the request was not valid".to_string()),
        },
        500 => UpdateError::ServerRefused,
        _ => UpdateError::Transport { status },
    }
}

/// Extract the `message` field from an error body, if any.
///
/// The catalog API answers 400s with `{"message": "..."}` but sometimes
/// sends an array of per-field messages instead of a single string.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(parts) => {
            let joined: Vec<&str> = parts.iter().filter_map(|p| p.as_str()).collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_classifies_as_not_found() {
        let err = classify_update_failure(42, 404, "");
        assert!(matches!(err, UpdateError::NotFound { id: 42 }));
    }

    #[test]
    fn test_400_carries_server_message() {
        let err = classify_update_failure(1, 400, r#"{"message": "price must be positive"}"#);
        match err {
            UpdateError::Rejected { message } => assert_eq!(message, "price must be positive"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_400_joins_message_array() {
        let err = classify_update_failure(
            1,
            400,
            r#"{"message": ["title should not be empty", "price must be a number"]}"#,
        );
        match err {
            UpdateError::Rejected { message } => {
                assert_eq!(message, "title should not be empty; price must be a number")
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_400_without_parseable_message_uses_fallback() {
        let err = classify_update_failure(1, 400, "<html>bad request</html>");
        match err {
            UpdateError::Rejected { message } => assert_eq!(message, "the request was not valid"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_500_means_record_not_editable() {
        let err = classify_update_failure(1, 500, "");
        assert!(matches!(err, UpdateError::ServerRefused));
    }

    #[test]
    fn test_other_statuses_are_transport() {
        let err = classify_update_failure(1, 503, "");
        assert!(matches!(err, UpdateError::Transport { status: 503 }));
    }
}
