use chrono::{Local, NaiveDate};
use common::{Signal, SignalError};
use tracing::{debug, info};

use crate::config::GeminiConfig;
use crate::prompt::{build_prompt, normalize_ticker};
use crate::remote::GeminiClient;
use crate::traits::TextGenerator;
use crate::validator::validate;

/// Prompt, one generation call, validation. Holds no state between calls.
pub struct SignalAgent<G> {
    generator: G,
}

impl<G: TextGenerator> SignalAgent<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn fetch_signal(&self, api_key: &str, ticker: &str) -> Result<Signal, SignalError> {
        self.fetch_signal_on(api_key, ticker, Local::now().date_naive())
            .await
    }

    /// Same as [`Self::fetch_signal`] with an explicit "today" for the prompt.
    pub async fn fetch_signal_on(
        &self,
        api_key: &str,
        ticker: &str,
        date: NaiveDate,
    ) -> Result<Signal, SignalError> {
        if api_key.trim().is_empty() {
            return Err(SignalError::MissingCredential);
        }
        let ticker = normalize_ticker(ticker).ok_or(SignalError::EmptyTicker)?;

        info!(ticker = %ticker, "Requesting signal");
        let prompt = build_prompt(&ticker, date);

        let raw = self.generator.generate(api_key, &prompt).await?;
        debug!(ticker = %ticker, bytes = raw.len(), "Received model output");

        let signal = validate(&raw, &ticker)?;
        info!(ticker = %signal.ticker(), signal = %signal.kind(), "Signal validated");
        Ok(signal)
    }
}

/// One-shot entry point against the default Gemini endpoint and model.
pub async fn fetch_signal(api_key: &str, ticker: &str) -> Result<Signal, SignalError> {
    if api_key.trim().is_empty() {
        return Err(SignalError::MissingCredential);
    }
    let client = GeminiClient::new(GeminiConfig::default())?;
    SignalAgent::new(client).fetch_signal(api_key, ticker).await
}
