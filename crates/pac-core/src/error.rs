//! Error types for PAC generation

use thiserror::Error;

/// PAC core error type
#[derive(Error, Debug)]
pub enum PacError {
    /// Tenant id is not a canonical GUID
    #[error("invalid tenant id: {0}")]
    InvalidTenantId(String),

    /// Expected template declaration is absent
    #[error("template declaration `var {0}` not found")]
    MissingSlot(&'static str),

    /// Template declaration appears more than once
    #[error("template declaration `var {slot}` found {count} times")]
    DuplicateSlot {
        /// Variable name of the offending declaration
        slot: &'static str,
        /// Number of active declarations found
        count: usize,
    },

    /// Template default endpoint disagrees with the configured stable endpoint
    #[error("template default endpoint {found} does not match configured stable endpoint {expected}")]
    EndpointMismatch {
        /// Endpoint embedded in the template
        found: String,
        /// Stable endpoint from configuration
        expected: String,
    },

    /// Random source kept producing rejected bytes
    #[error("random source exhausted while generating session pin")]
    PinGeneration,
}

/// Result type for PAC core operations
pub type PacResult<T> = Result<T, PacError>;
