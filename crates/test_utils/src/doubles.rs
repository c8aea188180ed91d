//! Test Doubles
//!
//! Port implementations with scripted behaviour, for exercising fallback,
//! timeout and ordering paths without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};
use domain_fund::{FundRecord, FundSource, RefreshAck};
use domain_notes::{Note, NoteRepository};

/// One scripted answer of a [`ScriptedFundSource`]
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Succeeds with these records
    Funds(Vec<FundRecord>),
    /// Fails as if the upstream answered with this status
    Status(u16),
    /// Fails as if the connection was refused
    Transport,
    /// Fails as if the payload could not be decoded
    Malformed,
    /// Never answers within any test's timeout
    Hang,
}

impl ScriptedResponse {
    async fn play(self, delay: Duration) -> Result<Vec<FundRecord>, PortError> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match self {
            ScriptedResponse::Funds(funds) => Ok(funds),
            ScriptedResponse::Status(status) => {
                Err(PortError::upstream_status(status, "scripted status"))
            }
            ScriptedResponse::Transport => Err(PortError::transport("scripted connection failure")),
            ScriptedResponse::Malformed => Err(PortError::parse("scripted malformed payload")),
            ScriptedResponse::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(PortError::transport("scripted hang elapsed"))
            }
        }
    }
}

/// A [`FundSource`] that replays a script
///
/// Fetch `n` plays step `n`; once the script runs out the last step repeats.
/// An empty script answers with no records.
pub struct ScriptedFundSource {
    name: String,
    steps: Vec<(Duration, ScriptedResponse)>,
    refresh_status: Option<u16>,
    fetch_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
}

impl ScriptedFundSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
            refresh_status: None,
            fetch_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    /// Appends a step answered immediately
    pub fn then(self, response: ScriptedResponse) -> Self {
        self.then_after(Duration::ZERO, response)
    }

    /// Appends a step answered after `delay`
    pub fn then_after(mut self, delay: Duration, response: ScriptedResponse) -> Self {
        self.steps.push((delay, response));
        self
    }

    /// Makes refresh fail with `status`
    pub fn with_refresh_failure(mut self, status: u16) -> Self {
        self.refresh_status = Some(status);
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

impl DomainPort for ScriptedFundSource {}

#[async_trait]
impl FundSource for ScriptedFundSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_funds(&self) -> Result<Vec<FundRecord>, PortError> {
        let call = self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.get(call).or_else(|| self.steps.last()).cloned();

        match step {
            Some((delay, response)) => response.play(delay).await,
            None => Ok(Vec::new()),
        }
    }

    async fn trigger_refresh(&self) -> Result<RefreshAck, PortError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        match self.refresh_status {
            Some(status) => Err(PortError::upstream_status(status, "scripted refresh failure")),
            None => Ok(RefreshAck(serde_json::json!({
                "success": true,
                "message": "Data refreshed successfully"
            }))),
        }
    }
}

/// A [`NoteRepository`] kept in memory, counting saves
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<Vec<Note>>,
    saves: AtomicUsize,
    failing: bool,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            ..Self::default()
        }
    }

    /// A repository whose every load and save fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// The list as last saved
    pub fn stored(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl DomainPort for InMemoryNoteRepository {}

impl NoteRepository for InMemoryNoteRepository {
    fn load(&self) -> Result<Vec<Note>, PortError> {
        if self.failing {
            return Err(PortError::storage("scripted load failure"));
        }
        Ok(self.stored())
    }

    fn save(&self, notes: &[Note]) -> Result<(), PortError> {
        if self.failing {
            return Err(PortError::storage("scripted save failure"));
        }
        *self.notes.lock().unwrap() = notes.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
