//! # Exam Shop demo
//!
//! Walks the storefront against a running backend:
//! 1. Loads configuration (`.env` is honoured) and installs tracing.
//! 2. Browses grades, subjects and prices.
//! 3. Lists the orders placed under this machine's client key.
//!
//! ```bash
//! BACKEND_URL=http://127.0.0.1:8000 RUST_LOG=info cargo run
//! ```

use anyhow::Result;
use exam_shop::catalog::SubjectSelection;
use exam_shop::config::AppConfig;
use exam_shop::lifecycle::{setup_tracing, Storefront};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(?config, "Starting exam shop demo");

    let shop = Storefront::new(&config)?;

    let span = tracing::info_span!("browse_catalog");
    async {
        let grades = match shop.catalog.list_grades().await {
            Ok(grades) => grades,
            Err(e) => {
                error!(error = %e, "Catalog unavailable");
                return;
            }
        };
        for grade in &grades {
            info!(grade = %grade.name, value = %grade.value, "Grade");
        }

        if let Some(first) = grades.first() {
            match shop.catalog.list_subjects(&first.value).await {
                Ok(subjects) => {
                    let mut selection = SubjectSelection::new(first.value.clone(), &subjects);
                    if let Some(subject) = subjects.first() {
                        selection.toggle(&subject.id);
                    }
                    info!(
                        subjects = subjects.len(),
                        selected = selection.selected().len(),
                        total = selection.total(),
                        "Sample selection"
                    );
                }
                Err(e) => warn!(error = %e, "Could not load subjects"),
            }
        }

        match shop.catalog.pricing().await {
            Ok(pricing) => info!(
                single = pricing.single_subject.price,
                all = pricing.all_subjects.price,
                currency = %pricing.single_subject.currency,
                "Pricing"
            ),
            Err(e) => warn!(error = %e, "Pricing unavailable"),
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("my_orders");
    async {
        match shop.tracker.list_my_orders().await {
            Ok(orders) => {
                info!(count = orders.len(), "Orders for this client");
                for order in &orders {
                    info!(
                        reference = %order.reference(),
                        status = %order.status,
                        total = order.total_amount,
                        "Order"
                    );
                }
            }
            Err(e) => error!(error = %e, "Could not list orders"),
        }
    }
    .instrument(span)
    .await;

    shop.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
