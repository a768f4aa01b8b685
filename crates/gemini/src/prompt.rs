use chrono::NaiveDate;

/// Long-form US date, e.g. `October 19, 2026`.
pub fn format_prompt_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Trims and uppercases a user-entered ticker. `None` when nothing is left.
pub fn normalize_ticker(ticker: &str) -> Option<String> {
    let ticker = ticker.trim();
    (!ticker.is_empty()).then(|| ticker.to_uppercase())
}

pub fn build_prompt(ticker: &str, date: NaiveDate) -> String {
    let ticker = ticker.trim().to_uppercase();
    let date = format_prompt_date(date);

    format!(
        r#"You are an expert investment agent specializing in NASDAQ stocks.
For the stock ticker "{ticker}", provide a daily trading signal (BUY, SELL, or HOLD), a hypothetical current price, a target price for this signal, and concise reasoning (2-4 sentences).
Assume today's date is {date}.
Your analysis should sound professional and consider general market factors or hypothetical news relevant to the stock.

Respond with a single JSON object in exactly this format and nothing else. No explanations and no markdown outside the JSON object:
{{
  "stockTicker": "{ticker}",
  "signal": "BUY" | "SELL" | "HOLD",
  "currentPrice": "USD XXX.XX",
  "targetPrice": "USD YYY.YY",
  "reasoning": "Concise reasoning explaining why this signal fits the hypothetical price."
}}
Prices use the form "USD 175.50".
The signal must be exactly one of "BUY", "SELL", or "HOLD".
"#
    )
}
