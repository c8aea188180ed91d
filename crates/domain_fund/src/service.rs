//! Two-tier fund data access
//!
//! [`FundDataService`] loads records from a primary source and degrades to a
//! fallback instead of failing:
//!
//! 1. the primary source (normally the upstream service)
//! 2. the last record set the primary successfully returned
//! 3. the fallback source (normally the bundled dataset)
//!
//! Every load carries a [`DataOrigin`] so callers can tell live data from
//! degraded data.
//!
//! # Ordering
//!
//! Each load is tagged with a monotonically increasing sequence number. A
//! primary response that arrives after a newer one has already been applied is
//! discarded and the newer snapshot is returned in its place.

use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use core_kernel::PortError;

use crate::fund::FundRecord;
use crate::ports::{FundSource, RefreshAck};

/// Default bound on each data-access call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a loaded record set came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataOrigin {
    /// Fresh from the primary source
    Primary,
    /// Primary failed; last successful primary response reused
    LastKnownGood { reason: String },
    /// Primary failed and never succeeded; fallback source used
    Fallback { reason: String },
    /// Both tiers failed; the record set is empty
    Unavailable { reason: String },
}

impl DataOrigin {
    /// True for anything other than fresh primary data
    pub fn is_degraded(&self) -> bool {
        !matches!(self, DataOrigin::Primary)
    }
}

/// Result of a load
#[derive(Debug, Clone, Serialize)]
pub struct FundLoad {
    pub funds: Vec<FundRecord>,
    pub origin: DataOrigin,
    /// Sequence number of the load whose data this is
    pub sequence: u64,
}

#[derive(Debug, Clone)]
struct Snapshot {
    sequence: u64,
    funds: Vec<FundRecord>,
}

/// Primary + fallback fund loader
pub struct FundDataService {
    primary: Arc<dyn FundSource>,
    fallback: Arc<dyn FundSource>,
    timeout: Duration,
    sequence: AtomicU64,
    latest: RwLock<Option<Snapshot>>,
}

impl FundDataService {
    pub fn new(primary: Arc<dyn FundSource>, fallback: Arc<dyn FundSource>) -> Self {
        Self {
            primary,
            fallback,
            timeout: DEFAULT_TIMEOUT,
            sequence: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    /// Sets the bound applied to each call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads the current record set; never fails
    pub async fn load_funds(&self) -> FundLoad {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        match self.bounded("load_funds", self.primary.fetch_funds()).await {
            Ok(funds) => self.apply(sequence, funds).await,
            Err(err) => self.degrade(sequence, err).await,
        }
    }

    /// Asks the primary source to recompute; callers reload afterwards
    pub async fn refresh_funds(&self) -> Result<RefreshAck, PortError> {
        let result = self
            .bounded("refresh_funds", self.primary.trigger_refresh())
            .await;

        match &result {
            Ok(ack) => info!(
                source = self.primary.name(),
                success = ack.is_success(),
                "Refresh triggered"
            ),
            Err(err) => warn!(
                source = self.primary.name(),
                kind = err.kind(),
                error = %err,
                "Refresh failed"
            ),
        }
        result
    }

    /// Most recently applied primary record set, if any
    pub async fn last_known_good(&self) -> Option<Vec<FundRecord>> {
        self.latest.read().await.as_ref().map(|s| s.funds.clone())
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T, PortError>>,
    ) -> Result<T, PortError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| PortError::timeout(operation, self.timeout.as_millis() as u64))?
    }

    async fn apply(&self, sequence: u64, funds: Vec<FundRecord>) -> FundLoad {
        let mut latest = self.latest.write().await;

        if let Some(current) = latest.as_ref() {
            if current.sequence > sequence {
                debug!(
                    stale = sequence,
                    applied = current.sequence,
                    "Discarding stale fund response"
                );
                return FundLoad {
                    funds: current.funds.clone(),
                    origin: DataOrigin::Primary,
                    sequence: current.sequence,
                };
            }
        }

        *latest = Some(Snapshot {
            sequence,
            funds: funds.clone(),
        });

        FundLoad {
            funds,
            origin: DataOrigin::Primary,
            sequence,
        }
    }

    async fn degrade(&self, sequence: u64, err: PortError) -> FundLoad {
        let reason = err.to_string();
        warn!(
            source = self.primary.name(),
            kind = err.kind(),
            error = %err,
            "Fund load failed, falling back"
        );

        if let Some(snapshot) = self.latest.read().await.as_ref() {
            return FundLoad {
                funds: snapshot.funds.clone(),
                origin: DataOrigin::LastKnownGood { reason },
                sequence: snapshot.sequence,
            };
        }

        match self.bounded("load_funds_fallback", self.fallback.fetch_funds()).await {
            Ok(funds) => FundLoad {
                funds,
                origin: DataOrigin::Fallback { reason },
                sequence,
            },
            Err(fallback_err) => {
                let unavailable =
                    PortError::data_unavailable(format!("{}; fallback: {}", reason, fallback_err));
                error!(
                    source = self.fallback.name(),
                    error = %unavailable,
                    "No fund source could supply data"
                );
                FundLoad {
                    funds: Vec::new(),
                    origin: DataOrigin::Unavailable {
                        reason: unavailable.to_string(),
                    },
                    sequence,
                }
            }
        }
    }
}
