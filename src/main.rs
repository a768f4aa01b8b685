use std::sync::Arc;

use anyhow::Context;
use common::{Signal, SignalError, logger};
use dotenvy::dotenv;
use gemini::{GeminiClient, SignalAgent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::session::{RequestTicket, Session};

mod config;
mod render;
mod session;

const QUIT_COMMANDS: [&str; 3] = ["quit", "exit", ":q"];

type Completion = (Uuid, Result<Signal, SignalError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();

    let config = AppConfig::from_env();
    debug!(?config, "Configuration loaded");

    let client = GeminiClient::new(config.gemini.clone()).context("Failed to set up Gemini client")?;
    let agent = Arc::new(SignalAgent::new(client));
    let api_key: Arc<str> = Arc::from(config.api_key.clone().unwrap_or_default());

    let mut session = Session::new(config.api_key.is_some());
    if config.api_key.is_none() {
        warn!("No API key configured; submissions are disabled");
    }

    println!("{}\n", render::banner());
    println!("{}", render::view(session.state()));

    let (done_tx, mut done_rx) = mpsc::channel::<Completion>(1);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(input) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if QUIT_COMMANDS.contains(&input.trim().to_lowercase().as_str()) {
                    break;
                }

                match session.submit(&input) {
                    Ok(ticket) => {
                        println!("{}", render::view(session.state()));
                        spawn_request(agent.clone(), api_key.clone(), ticket, done_tx.clone());
                    }
                    Err(rejection) => println!("{}", rejection),
                }
            }

            Some((request_id, result)) = done_rx.recv() => {
                if session.complete(request_id, result) {
                    println!("{}", render::view(session.state()));
                }
            }
        }
    }

    if session.is_busy() {
        info!("Waiting for the outstanding request before exiting");
        if let Some((request_id, result)) = done_rx.recv().await {
            session.complete(request_id, result);
            println!("{}", render::view(session.state()));
        }
    }

    info!("Shutting down");
    Ok(())
}

fn spawn_request(
    agent: Arc<SignalAgent<GeminiClient>>,
    api_key: Arc<str>,
    ticket: RequestTicket,
    done_tx: mpsc::Sender<Completion>,
) {
    tokio::spawn(async move {
        info!(request_id = %ticket.id, ticker = %ticket.ticker, "Fetching signal");

        let result = agent.fetch_signal(&api_key, &ticket.ticker).await;
        if let Err(e) = &result {
            warn!(request_id = %ticket.id, "Signal request failed: {}", e);
        }

        if done_tx.send((ticket.id, result)).await.is_err() {
            warn!(request_id = %ticket.id, "Front end stopped before the result arrived");
        }
    });
}
