//! Failure taxonomy for the remote catalog API
//!
//! The edit flow's user-facing messaging depends on these classifications,
//! so they are typed rather than collapsed into a single error string. The
//! `Display` text is what ends up in the error screen and toasts.

use thiserror::Error;

/// Failures while fetching the product list
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Non-2xx response from the catalog service
    #[error("catalog request failed with status {status}")]
    Transport { status: u16 },
    /// Request never produced a response (DNS, connection refused, ...)
    #[error("could not reach the catalog service: {0}")]
    Network(String),
    /// 2xx response whose body did not match the expected schema
    #[error("catalog response did not match the expected schema: {0}")]
    Decode(String),
}

/// Failures while updating a single product
#[derive(Debug, Clone, Error)]
pub enum UpdateError {
    /// 404 - the id no longer exists on the server
    #[error("product {id} no longer exists on the server")]
    NotFound { id: u64 },
    /// 400 - server-side validation failure; carries the server's message
    #[error("the server rejected the update: {message}")]
    Rejected { message: String },
    /// 500 on update is how this API says "this record is not editable",
    /// not a generic crash
    #[error("this product cannot be edited on the server")]
    ServerRefused,
    /// Any other non-2xx status
    #[error("update request failed with status {status}")]
    Transport { status: u16 },
    /// Request never produced a response
    #[error("could not reach the catalog service: {0}")]
    Network(String),
    /// 2xx response whose body did not match the expected schema
    #[error("update response did not match the expected schema: {0}")]
    Decode(String),
}
