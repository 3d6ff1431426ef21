//! `mealcheck` -- terminal front-end for meal check-in.
//!
//! Reads registration IDs or scanned QR payloads from stdin, looks the
//! registrant up on the schedule service and, on confirmation, marks the
//! current meal as availed. Logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable                         | Required | Default                 | Description                    |
//! |----------------------------------|----------|-------------------------|--------------------------------|
//! | `MEALCHECK_BASE_URL`             | no       | --                      | Full service URL               |
//! | `MEALCHECK_SERVER_IP`            | no       | --                      | Service host IPv4 address      |
//! | `MEALCHECK_SERVER_PORT`          | no       | `8000`                  | Port used with the IP address  |
//! | `MEALCHECK_REQUEST_TIMEOUT_SECS` | no       | transport default       | Per-request timeout            |

use mealcheck_cli::command::Command;
use mealcheck_cli::render::render;
use mealcheck_cli::shell::{Reply, Shell, READY_MESSAGE};
use mealcheck_client::ClientConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealcheck=info,mealcheck_cli=info,mealcheck_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let mut shell = Shell::connect(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, code = e.code(), "Failed to create HTTP client");
        std::process::exit(1);
    });

    tracing::info!(base_url = %config.base_url, "Starting mealcheck");

    println!("{READY_MESSAGE} Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                break;
            }
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        let now = chrono::Local::now().naive_local();
        let reply = shell.handle(command, now).await;
        if reply == Reply::Quit {
            break;
        }
        if let Some(text) = render(&reply) {
            println!("{text}\n");
        }
    }
}
