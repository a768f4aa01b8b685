use colored::{ColoredString, Colorize};
use common::{Signal, SignalKind};

use crate::session::ViewState;

const RULE_WIDTH: usize = 48;
const IDLE_HINT: &str = "Enter a stock ticker symbol (e.g., AAPL, MSFT, GOOGL) to begin.";

pub fn banner() -> String {
    format!(
        "{}\n{}\n{}",
        "AI Investment Signal Agent".bold().bright_blue(),
        "Enter a NASDAQ stock ticker to get a hypothetical daily signal, target price, and reasoning."
            .dimmed(),
        "Type `quit` to exit.".dimmed()
    )
}

pub fn view(state: &ViewState) -> String {
    match state {
        ViewState::Idle => IDLE_HINT.dimmed().to_string(),
        ViewState::Loading { ticker, .. } => format!("Analyzing {}...", ticker.bold()),
        ViewState::Failed(message) => format!("{} {}", "Error:".red().bold(), message.red()),
        ViewState::Ready(signal) => card(signal),
    }
}

fn badge(kind: SignalKind) -> ColoredString {
    match kind {
        SignalKind::Buy => format!("▲ {kind}").green().bold(),
        SignalKind::Sell => format!("▼ {kind}").red().bold(),
        SignalKind::Hold => format!("● {kind}").yellow().bold(),
    }
}

pub fn card(signal: &Signal) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        format!("{}    {}", signal.ticker().bold().cyan(), badge(signal.kind())),
        rule.clone(),
    ];

    if let Some(price) = signal.current_price() {
        lines.push(format!(
            "{} {}",
            "Hypothetical Current Price:".dimmed(),
            price.bold()
        ));
    }
    lines.push(format!(
        "{} {}",
        "Target Price:".dimmed(),
        signal.target_price().bold()
    ));
    lines.push(String::new());
    lines.push("Reasoning:".cyan().bold().to_string());
    lines.extend(signal.reasoning().lines().map(str::to_string));
    lines.push(rule);

    lines.join("\n")
}
