use std::process::ExitCode;
use std::sync::Arc;

use bikerent_calendar::calendar;
use bikerent_catalog::{PricingConfig, PricingEngine};
use bikerent_core::AppConfig;
use bikerent_order::{BookingOverview, LocalRentalService};
use bikerent_shared::models::Bike;
use bikerent_app::Session;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
use args::Cli;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bikerent_app=info,bikerent_order=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // One event loop: input is handled strictly in order
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Fatal: Failed to start tokio runtime: {:?}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(async_main(cli)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal: main exited with: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn async_main(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let today = cli.today.unwrap_or_else(calendar::today);
    let user_id = config.resolved_user_id();
    tracing::info!(user_id, %today, "Starting booking session");

    let pricing = PricingEngine::new(PricingConfig {
        service_fee_percentage: config.pricing.service_fee_percentage,
    });
    let bike = Bike::new(cli.bike_id, cli.bike_name, cli.rate);

    let service = Arc::new(LocalRentalService::new(pricing.clone()).with_bike(bike.clone()));
    let widget = BookingOverview::for_bike(bike, pricing, today)
        .with_user_id(user_id)
        .with_viewport(cli.width, config.layout.mobile_breakpoint_px);

    let mut session = Session::new(widget, service, today);
    session
        .run(tokio::io::BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
