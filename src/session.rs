use common::{Signal, SignalError};
use thiserror::Error;
use uuid::Uuid;

pub const MISSING_KEY_NOTICE: &str =
    "Gemini API Key is not configured. Please set the API_KEY environment variable.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading { request_id: Uuid, ticker: String },
    Failed(String),
    Ready(Signal),
}

/// Why a submission did not start a request. The view state is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Gemini API Key is not configured. Cannot fetch signal.")]
    NotConfigured,
    #[error("Please enter a stock ticker.")]
    EmptyTicker,
    #[error("A signal request for {0} is already in progress.")]
    Busy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub id: Uuid,
    pub ticker: String,
}

/// Caller-side guards around the signal pipeline: credential gating and at
/// most one outstanding request.
pub struct Session {
    api_key_available: bool,
    state: ViewState,
}

impl Session {
    pub fn new(api_key_available: bool) -> Self {
        let state = if api_key_available {
            ViewState::Idle
        } else {
            ViewState::Failed(MISSING_KEY_NOTICE.to_string())
        };

        Self {
            api_key_available,
            state,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ViewState::Loading { .. })
    }

    /// Starts a request for `input`, discarding any previous signal or error.
    pub fn submit(&mut self, input: &str) -> Result<RequestTicket, Rejection> {
        if let ViewState::Loading { ticker, .. } = &self.state {
            return Err(Rejection::Busy(ticker.clone()));
        }
        if !self.api_key_available {
            return Err(Rejection::NotConfigured);
        }

        let ticker = input.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(Rejection::EmptyTicker);
        }

        let ticket = RequestTicket {
            id: Uuid::new_v4(),
            ticker,
        };
        self.state = ViewState::Loading {
            request_id: ticket.id,
            ticker: ticket.ticker.clone(),
        };
        Ok(ticket)
    }

    /// Applies the outcome of request `id`. Returns `false` and changes nothing
    /// if `id` is not the outstanding request.
    pub fn complete(&mut self, id: Uuid, result: Result<Signal, SignalError>) -> bool {
        match &self.state {
            ViewState::Loading { request_id, .. } if *request_id == id => {}
            _ => return false,
        }

        self.state = match result {
            Ok(signal) => ViewState::Ready(signal),
            Err(e) => ViewState::Failed(failure_message(&e)),
        };
        true
    }
}

pub fn failure_message(error: &SignalError) -> String {
    format!(
        "Failed to fetch signal: {error}. Ensure the stock ticker is valid and the API key is correct."
    )
}
