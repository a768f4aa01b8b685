use common::{Signal, SignalError, SignalKind};
use serde_json::{Map, Value};
use tracing::warn;

use crate::fence::strip_code_fence;

/// Turns raw model output into a [`Signal`], or fails without a partial result.
///
/// The ticker echoed by the model is kept as-is. A mismatch with
/// `requested_ticker` is logged but not rejected.
pub fn validate(raw_text: &str, requested_ticker: &str) -> Result<Signal, SignalError> {
    let body = strip_code_fence(raw_text);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| SignalError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(SignalError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            kind_of(&value)
        )));
    };

    let ticker = required_str(&fields, "stockTicker")?;
    let signal = required_str(&fields, "signal")?;
    let target_price = required_str(&fields, "targetPrice")?;
    let reasoning = required_str(&fields, "reasoning")?;

    let kind: SignalKind = signal.parse()?;
    let current_price = optional_str(&fields, "currentPrice")?;

    if !ticker.eq_ignore_ascii_case(requested_ticker.trim()) {
        warn!(
            requested = requested_ticker,
            returned = ticker,
            "Model answered for a different ticker"
        );
    }

    Signal::new(
        ticker,
        kind,
        current_price.map(str::to_string),
        target_price,
        reasoning,
    )
}

fn required_str<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a str, SignalError> {
    match optional_str(fields, name)? {
        Some(value) => Ok(value),
        None => Err(SignalError::IncompleteData(name)),
    }
}

/// `None` for absent, `null`, or blank strings.
fn optional_str<'a>(
    fields: &'a Map<String, Value>,
    name: &str,
) -> Result<Option<&'a str>, SignalError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(SignalError::MalformedResponse(format!(
            "`{name}` must be a string, got {}",
            kind_of(other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const REQUIRED_FIELDS: [&str; 4] = ["stockTicker", "signal", "targetPrice", "reasoning"];

    fn full_payload() -> Value {
        json!({
            "stockTicker": "AAPL",
            "signal": "BUY",
            "currentPrice": "USD 150.00",
            "targetPrice": "USD 160.00",
            "reasoning": "Strong earnings.",
        })
    }

    #[test]
    fn test_fenced_payload_with_lowercase_signal() {
        let raw = "```json\n{\"stockTicker\":\"AAPL\",\"signal\":\"buy\",\"currentPrice\":\"USD 150.00\",\"targetPrice\":\"USD 160.00\",\"reasoning\":\"Strong earnings.\"}\n```";

        let signal = validate(raw, "AAPL").unwrap();

        assert_eq!(signal.ticker(), "AAPL");
        assert_eq!(signal.kind(), SignalKind::Buy);
        assert_eq!(signal.current_price(), Some("USD 150.00"));
        assert_eq!(signal.target_price(), "USD 160.00");
        assert_eq!(signal.reasoning(), "Strong earnings.");
    }

    #[test]
    fn test_unknown_signal_names_value() {
        let raw = r#"{"stockTicker":"MSFT","signal":"WAIT","targetPrice":"USD 300.00","reasoning":"x"}"#;

        let err = validate(raw, "MSFT").unwrap_err();

        assert_eq!(err, SignalError::InvalidSignalValue("WAIT".to_string()));
        assert!(err.to_string().contains("WAIT"));
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = validate("not json at all", "AAPL").unwrap_err();
        assert!(matches!(err, SignalError::MalformedResponse(_)));
    }

    #[test]
    fn test_invalid_json_inside_fence_is_malformed() {
        let err = validate("```json\n{\"stockTicker\": \n```", "AAPL").unwrap_err();
        assert!(matches!(err, SignalError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_object_json_is_malformed() {
        for raw in ["[]", "42", "\"BUY\"", "null"] {
            let err = validate(raw, "AAPL").unwrap_err();
            assert!(matches!(err, SignalError::MalformedResponse(_)), "{raw}");
        }
    }

    #[test]
    fn test_fence_is_transparent() {
        let plain = full_payload().to_string();
        let expected = validate(&plain, "AAPL").unwrap();

        for wrapped in [
            format!("```json\n{plain}\n```"),
            format!("```\n{plain}\n```"),
            format!("\n  ```json{plain}```  \n"),
        ] {
            assert_eq!(validate(&wrapped, "AAPL").unwrap(), expected);
        }
    }

    #[test]
    fn test_every_casing_maps_to_kind() {
        for (literal, kind) in [
            ("buy", SignalKind::Buy),
            ("Sell", SignalKind::Sell),
            ("hOLD", SignalKind::Hold),
            ("HOLD", SignalKind::Hold),
        ] {
            let mut payload = full_payload();
            payload["signal"] = json!(literal);

            let signal = validate(&payload.to_string(), "AAPL").unwrap();
            assert_eq!(signal.kind(), kind);
            assert_eq!(signal.kind().as_str(), literal.to_uppercase());
        }
    }

    #[test]
    fn test_each_missing_required_field_is_incomplete() {
        for field in REQUIRED_FIELDS {
            let mut payload = full_payload();
            payload.as_object_mut().unwrap().remove(field);

            let err = validate(&payload.to_string(), "AAPL").unwrap_err();
            assert_eq!(err, SignalError::IncompleteData(field));
        }
    }

    #[test]
    fn test_empty_or_null_required_field_is_incomplete() {
        for blank in [json!(""), json!("   "), Value::Null] {
            let mut payload = full_payload();
            payload["reasoning"] = blank;

            let err = validate(&payload.to_string(), "AAPL").unwrap_err();
            assert_eq!(err, SignalError::IncompleteData("reasoning"));
        }
    }

    #[test]
    fn test_missing_field_wins_over_bad_signal() {
        let raw = r#"{"stockTicker":"AAPL","signal":"WAIT","reasoning":"x"}"#;
        let err = validate(raw, "AAPL").unwrap_err();
        assert_eq!(err, SignalError::IncompleteData("targetPrice"));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let mut payload = full_payload();
        payload["signal"] = json!(1);
        let err = validate(&payload.to_string(), "AAPL").unwrap_err();
        assert!(matches!(err, SignalError::MalformedResponse(msg) if msg.contains("signal")));

        let mut payload = full_payload();
        payload["currentPrice"] = json!(150.0);
        let err = validate(&payload.to_string(), "AAPL").unwrap_err();
        assert!(matches!(err, SignalError::MalformedResponse(msg) if msg.contains("currentPrice")));
    }

    #[test]
    fn test_current_price_is_optional() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("currentPrice");
        assert_eq!(validate(&payload.to_string(), "AAPL").unwrap().current_price(), None);

        payload["currentPrice"] = json!("");
        assert_eq!(validate(&payload.to_string(), "AAPL").unwrap().current_price(), None);
    }

    #[test]
    fn test_fields_pass_through_verbatim() {
        let raw = r#"{"stockTicker":"goog","signal":"hold","targetPrice":"  USD 1.00","reasoning":"Line one.\nLine two.","extra":true}"#;

        let signal = validate(raw, "AAPL").unwrap();

        assert_eq!(signal.ticker(), "goog");
        assert_eq!(signal.target_price(), "  USD 1.00");
        assert_eq!(signal.reasoning(), "Line one.\nLine two.");
    }

    #[test]
    fn test_serialized_signal_validates_back_to_itself() {
        let signal = validate(&full_payload().to_string(), "AAPL").unwrap();
        let wire = serde_json::to_string(&signal).unwrap();
        assert_eq!(validate(&wire, "AAPL").unwrap(), signal);
    }
}
