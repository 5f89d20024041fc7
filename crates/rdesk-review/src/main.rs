use std::sync::Arc;

use clap::Parser;
use tracing::info;

use rdesk_review::{api, AppState};
use review::notify::RatingsNotifier;
use review::source::AssetSource;

/// rdesk-review: asset rating review and submission service
#[derive(Parser)]
#[command(name = "rdesk-review")]
struct Args {
    /// Listen address for the HTTP API
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    listen_addr: String,

    /// Credora GraphQL endpoint
    #[arg(long, env = "CREDORA_API_URL", default_value = rdesk_credora::DEFAULT_API_URL)]
    credora_api_url: String,

    /// Resend API base URL
    #[arg(long, env = "RESEND_API_URL", default_value = rdesk_resend::DEFAULT_API_URL)]
    resend_api_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rdesk_review=info,rdesk_credora=info,rdesk_resend=info".into()),
        )
        .json()
        .init();

    let args = Args::parse();
    info!(listen_addr = %args.listen_addr, "rdesk-review starting");

    // Credentials are read once here; a missing credential surfaces on
    // the first call that needs it, not as a startup failure.
    let source: Arc<dyn AssetSource> = Arc::new(rdesk_credora::CredoraClient::from_env(
        args.credora_api_url,
    ));
    let notifier: Arc<dyn RatingsNotifier> = Arc::new(rdesk_resend::ResendNotifier::from_env(
        args.resend_api_url,
    ));

    let state = Arc::new(AppState::new(source, notifier));

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&args.listen_addr)
        .await
        .expect("failed to bind");
    info!(addr = %args.listen_addr, "API server listening");

    axum::serve(listener, app).await.expect("server error");

    info!("rdesk-review stopped");
}
