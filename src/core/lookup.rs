use crate::core::transform::transform_all;
use crate::domain::model::{Address, RawAddressRecord, SearchPhase, SearchTicket, UiStatus};
use crate::utils::error::{AppError, Result};

/// Search side of the form: results, banner status and the attempt counter.
#[derive(Debug, Default)]
pub struct LookupWorkflow {
    results: Vec<Address>,
    status: UiStatus,
    phase: SearchPhase,
    latest_attempt: u64,
}

impl LookupWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[Address] {
        &self.results
    }

    pub fn status(&self) -> &UiStatus {
        &self.status
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn latest_attempt(&self) -> u64 {
        self.latest_attempt
    }

    pub(crate) fn set_error(&mut self, message: Option<String>) {
        self.status.error = message;
    }

    /// Enter `Searching`. Any earlier ticket becomes stale.
    pub fn begin(&mut self, post_code: &str, house_number: &str) -> SearchTicket {
        self.results.clear();
        self.status.error = None;
        self.status.loading = true;
        self.phase = SearchPhase::Searching;
        self.latest_attempt += 1;

        tracing::debug!(
            attempt = self.latest_attempt,
            post_code,
            house_number,
            "search started"
        );

        SearchTicket {
            attempt: self.latest_attempt,
            post_code: post_code.to_string(),
            house_number: house_number.to_string(),
        }
    }

    /// Apply the outcome of `ticket`'s lookup. Returns `false` when the ticket
    /// is stale and nothing changed.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<RawAddressRecord>>,
    ) -> bool {
        if ticket.attempt != self.latest_attempt || self.phase != SearchPhase::Searching {
            tracing::debug!(
                attempt = ticket.attempt,
                latest = self.latest_attempt,
                "discarding stale search outcome"
            );
            return false;
        }

        match outcome.and_then(|raws| transform_all(&raws, &ticket.house_number)) {
            Ok(addresses) => {
                tracing::info!(
                    post_code = %ticket.post_code,
                    house_number = %ticket.house_number,
                    found = addresses.len(),
                    "search finished"
                );
                self.results = addresses;
                self.phase = SearchPhase::Succeeded;
            }
            Err(err) => {
                self.fail(&err);
            }
        }

        self.status.loading = false;
        true
    }

    fn fail(&mut self, err: &AppError) {
        match err {
            AppError::Service { message } => {
                tracing::info!(reason = %message, "lookup service refused the search");
            }
            other => {
                tracing::warn!(error = %other, category = ?other.category(), "search failed");
            }
        }
        self.results.clear();
        self.status.error = Some(err.user_message());
        self.phase = SearchPhase::Failed;
    }

    /// Back to `Idle` with nothing shown. A search still in flight is
    /// invalidated.
    pub fn reset(&mut self) {
        self.results.clear();
        self.status = UiStatus::default();
        self.phase = SearchPhase::Idle;
        self.latest_attempt += 1;
    }
}
