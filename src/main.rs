use std::sync::Arc;

use anyhow::Context;

use promo_watch::config::{AppConfig, RecipientsSpec};
use promo_watch::notify::{Dispatcher, RecipientSource, SheetRecipients, SmtpDispatcher, StaticRecipients};
use promo_watch::provider::{GameDataProvider, StatsApiClient};
use promo_watch::run::Runner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let date = config.run_date();

    eprintln!("⚾ Promo Watch v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Date: {}", date);
    eprintln!(
        "   Teams: {}",
        config
            .teams
            .iter()
            .map(|t| t.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    eprintln!("   Stats API: {}", config.statsapi_base_url);

    let recipients: Arc<dyn RecipientSource> = match &config.recipients {
        RecipientsSpec::List(addresses) => {
            eprintln!("   Recipients: {} configured", addresses.len());
            Arc::new(StaticRecipients::new(addresses.clone()))
        }
        RecipientsSpec::SheetUrl(url) => {
            eprintln!("   Recipients: sheet ({url})");
            Arc::new(SheetRecipients::new(url.clone()))
        }
        RecipientsSpec::None => {
            eprintln!("   Recipients: none configured");
            Arc::new(StaticRecipients::new(Vec::new()))
        }
    };

    let dispatcher: Option<Arc<dyn Dispatcher>> = match &config.smtp {
        Some(smtp) => {
            eprintln!("   Email: enabled (SMTP: {}:{})\n", smtp.host, smtp.port);
            Some(Arc::new(SmtpDispatcher::new(smtp.clone())))
        }
        None => {
            eprintln!("   Email: disabled (SMTP_HOST not set)\n");
            None
        }
    };

    let provider: Arc<dyn GameDataProvider> =
        Arc::new(StatsApiClient::new(config.statsapi_base_url.clone()));
    let runner = Runner::new(provider, recipients, dispatcher);

    let outcome = runner
        .run(&config.teams, date)
        .await
        .context("Promo run failed")?;

    println!("{}", outcome.report.render());

    Ok(())
}
