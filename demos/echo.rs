//! Minimal echo server run under graceful lifecycle coordination.
//!
//! ```sh
//! cargo run --example echo
//! curl http://127.0.0.1:8080/hello
//! # Ctrl-C drains in-flight requests for up to 10s, then exits.
//! ```

use std::time::Duration;

use axum::{extract::Path, routing::get, Router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), grace::RunError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grace=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = Router::new()
        .route("/", get(|| async { "echo server" }))
        .route("/{word}", get(|Path(word): Path<String>| async move { word }));

    grace::run(
        app,
        [
            grace::with_bind_address("127.0.0.1:8080"),
            grace::with_shutdown_timeout(Duration::from_secs(10)),
        ],
    )
    .await
}
