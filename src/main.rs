use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lunch_tray::event_sourcing::serialize_event;
use lunch_tray::{default_menu, MenuCategory, OrderAccumulator, OrderConfig, OrderMetrics};

fn main() -> anyhow::Result<()> {
    let config = OrderConfig::from_env()?;

    // Default filter can be overridden with RUST_LOG
    // Example: RUST_LOG=trace cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
        )
        .init();

    tracing::info!(tax_rate = %config.tax_rate, "Starting lunch tray demo");

    let menu = Arc::new(default_menu());
    for category in MenuCategory::ALL {
        for item in menu.items_in(category) {
            tracing::info!(category = %category, item = %item.id, price = %item.formatted_price(), "{}", item.name);
        }
    }

    let metrics = Arc::new(OrderMetrics::new()?);
    let mut order = OrderAccumulator::with_config(menu, &config)?.with_metrics(metrics.clone());

    order.subscribe(|envelope, state| {
        tracing::debug!(
            seq = envelope.sequence_number,
            event_type = %envelope.event_type,
            status = ?state.status(),
            "Order changed"
        );
    });

    order.set_entree("skillet")?;
    order.set_side("soup")?;
    order.set_accompaniment("berries")?;
    // Changing the entree replaces its charge
    order.set_entree("chili")?;

    if let Err(e) = order.set_side("fries") {
        tracing::warn!("{}", e);
    }

    order.calculate_tax_and_total();
    println!("{}", serde_json::to_string_pretty(&order.snapshot())?);

    for envelope in order.history() {
        println!("{}", serialize_event(envelope)?);
    }

    order.reset_order();
    println!("{}", serde_json::to_string_pretty(&order.snapshot())?);

    print!("{}", metrics.render()?);

    tracing::info!("Demo complete");
    Ok(())
}
