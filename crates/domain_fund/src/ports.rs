//! Fund data ports
//!
//! A [`FundSource`] yields the full record set and can ask its backing system
//! to recompute. Adapters live in [`crate::adapters`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, PortError};

use crate::fund::FundRecord;

/// Wire shape of a fund listing: `{ "funds": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundsPayload {
    pub funds: Vec<FundRecord>,
}

/// Acknowledgment returned by a refresh, passed through as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshAck(pub serde_json::Value);

impl RefreshAck {
    /// Acknowledgment used by sources that refresh locally
    pub fn local(message: &str) -> Self {
        Self(serde_json::json!({ "success": true, "message": message }))
    }

    /// Whether the source reported success
    ///
    /// A response without a boolean `success` field counts as success, since
    /// only 2xx responses become acknowledgments.
    pub fn is_success(&self) -> bool {
        self.0
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true)
    }
}

/// Port for anything that can supply fund records
#[async_trait]
pub trait FundSource: DomainPort {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Fetches the full current record set
    async fn fetch_funds(&self) -> Result<Vec<FundRecord>, PortError>;

    /// Asks the source to recompute its data; does not return records
    async fn trigger_refresh(&self) -> Result<RefreshAck, PortError>;
}
