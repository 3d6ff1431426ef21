//! `mealcheck-stub` -- local stand-in for the food-truck schedule service.
//!
//! Seeds a few registrants for today's date and serves the schedule and
//! user-data endpoints from memory.
//!
//! # Environment variables
//!
//! | Variable | Required | Default     | Description  |
//! |----------|----------|-------------|--------------|
//! | `HOST`   | no       | `127.0.0.1` | Bind address |
//! | `PORT`   | no       | `8000`      | Bind port    |

use std::net::{IpAddr, SocketAddr};

use mealcheck_stub::StubState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealcheck_stub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let host: IpAddr = std::env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".into())
        .parse()
        .unwrap_or_else(|_| {
            tracing::error!("HOST must be an IP address");
            std::process::exit(1);
        });

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()
        .unwrap_or_else(|_| {
            tracing::error!("PORT must be a valid u16");
            std::process::exit(1);
        });

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let state = StubState::demo(&today);
    tracing::info!(%today, "Seeded demo registrants");

    let addr = SocketAddr::new(host, port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!("Starting stub schedule service on {addr}");

    if let Err(e) = axum::serve(listener, mealcheck_stub::app(state)).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
