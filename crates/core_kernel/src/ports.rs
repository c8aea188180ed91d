//! Ports and Adapters Infrastructure
//!
//! This module provides the shared types for the hexagonal (ports and adapters)
//! layout used across the domain crates.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! │        (FundDataService, NotesStore, HTTP handlers)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │      (FundSource, NoteRepository, KeyValueStore)             │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │  Internal Adapter │     │ External Adapter │
//!         │ (bundled dataset, │     │  (upstream REST  │
//!         │   file storage)   │     │      service)    │
//!         └───────────────────┘     └──────────────────┘
//! ```

use thiserror::Error;

/// Error type for port operations
///
/// Adapters map their native failures onto these variants so callers can apply
/// one fallback policy regardless of where the data came from.
#[derive(Debug, Error)]
pub enum PortError {
    /// The connection to the underlying system failed
    #[error("Transport failure: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The underlying system answered with a non-success status
    #[error("Upstream returned status {status}: {message}")]
    UpstreamStatus {
        status: u16,
        message: String,
    },

    /// The payload could not be decoded
    #[error("Malformed payload: {message}")]
    Parse {
        message: String,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// No tier could supply data
    #[error("Data unavailable: {message}")]
    DataUnavailable {
        message: String,
    },

    /// Reading or writing persisted state failed
    #[error("Storage failure: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        PortError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an UpstreamStatus error
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        PortError::UpstreamStatus {
            status,
            message: message.into(),
        }
    }

    /// Creates a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        PortError::Parse {
            message: message.into(),
        }
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        PortError::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Creates a DataUnavailable error
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        PortError::DataUnavailable {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        PortError::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        match self {
            PortError::Transport { .. } | PortError::Timeout { .. } => true,
            PortError::UpstreamStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Short machine-readable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            PortError::Transport { .. } => "transport",
            PortError::UpstreamStatus { .. } => "upstream_status",
            PortError::Parse { .. } => "parse",
            PortError::Timeout { .. } => "timeout",
            PortError::DataUnavailable { .. } => "data_unavailable",
            PortError::Storage { .. } => "storage",
        }
    }
}

impl From<serde_json::Error> for PortError {
    fn from(err: serde_json::Error) -> Self {
        PortError::parse(err.to_string())
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

/// A string-keyed, string-valued persistent store
///
/// Stands in for the browser-origin key-value storage of a dashboard: callers
/// see opaque get/set of whole values under a key.
pub trait KeyValueStore: DomainPort {
    /// Reads the value under `key`, `None` when nothing was ever stored
    fn get(&self, key: &str) -> Result<Option<String>, PortError>;

    /// Replaces the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), PortError>;

    /// Removes the value under `key`; removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<(), PortError>;
}
