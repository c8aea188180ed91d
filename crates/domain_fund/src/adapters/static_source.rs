//! In-process fund source

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::catalog::bundled_funds;
use crate::fund::FundRecord;
use crate::ports::{FundSource, RefreshAck};

/// Serves a fixed record set
#[derive(Debug, Clone)]
pub struct StaticFundSource {
    funds: Vec<FundRecord>,
}

impl StaticFundSource {
    pub fn new(funds: Vec<FundRecord>) -> Self {
        Self { funds }
    }

    /// Serves the bundled dataset
    pub fn bundled() -> Self {
        Self::new(bundled_funds())
    }
}

impl Default for StaticFundSource {
    fn default() -> Self {
        Self::bundled()
    }
}

impl DomainPort for StaticFundSource {}

#[async_trait]
impl FundSource for StaticFundSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_funds(&self) -> Result<Vec<FundRecord>, PortError> {
        Ok(self.funds.clone())
    }

    async fn trigger_refresh(&self) -> Result<RefreshAck, PortError> {
        Ok(RefreshAck::local("Data refreshed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_bundled_dataset() {
        let source = StaticFundSource::bundled();
        let funds = source.fetch_funds().await.unwrap();
        assert_eq!(funds.len(), 5);
        assert!(source.trigger_refresh().await.unwrap().is_success());
    }
}
