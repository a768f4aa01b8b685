use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SignalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl SignalKind {
    pub const ALL: [SignalKind; 3] = [SignalKind::Buy, SignalKind::Sell, SignalKind::Hold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive. The error keeps the value exactly as received.
impl FromStr for SignalKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| SignalError::InvalidSignalValue(s.to_string()))
    }
}

/// A validated recommendation for one ticker.
///
/// Fields are private: a `Signal` only exists once every invariant holds, and
/// it cannot be changed afterwards. Serializes to the same JSON shape the model
/// is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    #[serde(rename = "stockTicker")]
    ticker: String,
    #[serde(rename = "signal")]
    kind: SignalKind,
    #[serde(rename = "currentPrice", skip_serializing_if = "Option::is_none")]
    current_price: Option<String>,
    #[serde(rename = "targetPrice")]
    target_price: String,
    reasoning: String,
}

impl Signal {
    pub fn new(
        ticker: impl Into<String>,
        kind: SignalKind,
        current_price: Option<String>,
        target_price: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Result<Self, SignalError> {
        let ticker = ticker.into();
        let target_price = target_price.into();
        let reasoning = reasoning.into();

        if is_blank(&ticker) {
            return Err(SignalError::IncompleteData("stockTicker"));
        }
        if is_blank(&target_price) {
            return Err(SignalError::IncompleteData("targetPrice"));
        }
        if is_blank(&reasoning) {
            return Err(SignalError::IncompleteData("reasoning"));
        }

        Ok(Self {
            ticker,
            kind,
            current_price: current_price.filter(|price| !is_blank(price)),
            target_price,
            reasoning,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn current_price(&self) -> Option<&str> {
        self.current_price.as_deref()
    }

    pub fn target_price(&self) -> &str {
        &self.target_price
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
