use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_gateway::application::service::PaymentService;
use payment_gateway::domain::ports::{BankGatewayBox, PaymentStoreBox};
use payment_gateway::infrastructure::bank::HttpBankGateway;
use payment_gateway::infrastructure::in_memory::InMemoryPaymentStore;
use payment_gateway::interfaces::http;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to serve the API on
    #[arg(long, env = "PAYMENTS_BIND", default_value = "0.0.0.0:3000")]
    bind: String,

    /// Authorization endpoint of the acquiring bank
    #[arg(
        long,
        env = "PAYMENTS_BANK_URL",
        default_value = "http://localhost:8080/payments"
    )]
    bank_url: String,

    /// Upper bound on a single bank call, in seconds
    #[arg(long, env = "PAYMENTS_BANK_TIMEOUT_SECS", default_value_t = 30)]
    bank_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Create boxed instances for each port
    let store: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());
    let gateway: BankGatewayBox = Box::new(
        HttpBankGateway::new(
            cli.bank_url.clone(),
            Duration::from_secs(cli.bank_timeout_secs),
        )
        .into_diagnostic()?,
    );

    let service = Arc::new(PaymentService::new(store, gateway));
    let app = http::router(service);

    let listener = TcpListener::bind(&cli.bind).await.into_diagnostic()?;
    info!("Listening on {} (bank at {})", cli.bind, cli.bank_url);
    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}
