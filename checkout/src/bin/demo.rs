//! Ticket Checkout Demo
//!
//! Walks one customer through the four checkout steps:
//! - Mount (optionally resuming at a step) and load the ticket catalog
//! - Pick tickets, a visit date and the signed-in user
//! - Confirm, which validates the order and calls the checkout endpoint
//!
//! # Usage
//!
//! ```bash
//! # Against in-process mocks
//! ZOOMA_MOCK_BACKEND=true cargo run --bin checkout-demo
//!
//! # Against a running backend, resuming at step 2
//! ZOOMA_API_BASE_URL=http://localhost:5000/api cargo run --bin checkout-demo -- 2
//! ```

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zooma_checkout::{
    CheckoutAction, CheckoutConfig, CheckoutEnvironment, checkout_store,
    gateway::{CheckoutGateway, MockCheckoutGateway, StaticTicketCatalog, TicketCatalog},
    http::{ApiClient, HttpCheckoutGateway, HttpTicketCatalog},
    metrics::register_checkout_metrics,
    types::{CatalogTicket, CurrentUser, Money, TicketId},
};
use zooma_core::environment::SystemClock;
use zooma_runtime::metrics::register_store_metrics;

fn demo_catalog() -> Vec<CatalogTicket> {
    vec![
        CatalogTicket::new(1, "Adult", "13 years and over", Money::from_dong(150_000)),
        CatalogTicket::new(2, "Child", "3 to 12 years", Money::from_dong(80_000)),
        CatalogTicket::new(3, "Toddler", "Under 3 years", Money::from_dong(0)),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = CheckoutConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},zooma_checkout=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    register_store_metrics();
    register_checkout_metrics();

    let (catalog, gateway): (Arc<dyn TicketCatalog>, Arc<dyn CheckoutGateway>) =
        if config.mock_backend {
            tracing::info!("Using in-process catalog and checkout");
            (
                Arc::new(StaticTicketCatalog::new(demo_catalog())),
                Arc::new(MockCheckoutGateway::succeeding("https://pay.zooma.vn/demo")),
            )
        } else {
            tracing::info!(base_url = %config.api_base_url, "Using REST backend");
            let api = ApiClient::new(config.api_base_url.clone(), config.http_timeout())?;
            (
                Arc::new(HttpTicketCatalog::new(api.clone())),
                Arc::new(HttpCheckoutGateway::new(api)),
            )
        };

    let env =
        CheckoutEnvironment::new(catalog, gateway, Arc::new(SystemClock)).configured(&config);
    let store = checkout_store(env);
    let wait = config.http_timeout() + std::time::Duration::from_secs(1);

    println!("\n🦁 ============================================");
    println!("   Zooma - Ticket Checkout Demo");
    println!("============================================\n");

    // Step 0: mount and load the catalog
    let resume_step = std::env::args().nth(1);
    let loaded = store
        .send_and_wait_for(
            CheckoutAction::Mount {
                resume_step,
                current_user: None,
            },
            |a| {
                matches!(
                    a,
                    CheckoutAction::CatalogLoaded { .. } | CheckoutAction::CatalogFailed { .. }
                )
            },
            wait,
        )
        .await?;

    let step = store.state(|s| s.current_step()).await;
    match loaded {
        CheckoutAction::CatalogLoaded { tickets, .. } => {
            println!("📋 Catalog ({} ticket types), starting at {step:?}", tickets.len());
            for ticket in &tickets {
                let price = ticket.price.to_string();
                println!(
                    "   #{} {:<8} {price:>12}  {}",
                    ticket.id, ticket.name, ticket.description
                );
            }
        },
        CheckoutAction::CatalogFailed { reason, .. } => {
            println!("⚠️  Catalog unavailable: {reason}");
        },
        _ => {},
    }

    // Steps 1-3: fill in the order
    let user = CurrentUser::new("demo-user", "Demo Visitor").with_email("visitor@zooma.vn");
    for action in [
        CheckoutAction::GoToStep { index: 0 },
        CheckoutAction::SetTicketQuantity {
            id: TicketId::new(1),
            quantity: 2,
        },
        CheckoutAction::SetTicketQuantity {
            id: TicketId::new(2),
            quantity: 1,
        },
        CheckoutAction::NextStep,
        CheckoutAction::SetVisitDate {
            date: chrono::Utc::now().date_naive().succ_opt(),
        },
        CheckoutAction::NextStep,
        CheckoutAction::SetCurrentUser { user: Some(user) },
        CheckoutAction::NextStep,
    ] {
        store.send(action).await?;
    }

    let total = store.state(|s| s.order.total()).await;
    println!("\n🧾 Summary: total {total}");

    // Step 4: confirm
    let outcome = store
        .send_and_wait_for(
            CheckoutAction::NextStep,
            |a| {
                matches!(
                    a,
                    CheckoutAction::CheckoutSucceeded { .. } | CheckoutAction::CheckoutFailed { .. }
                )
            },
            wait,
        )
        .await;

    match outcome {
        Ok(CheckoutAction::CheckoutSucceeded { redirect, .. }) => {
            println!("\n✅ Thank you for your order! Pay at {}", redirect.url);
        },
        _ => {
            for notification in store.state(|s| s.notifications.clone()).await {
                println!("\n❌ {notification}");
            }
        },
    }

    store.send(CheckoutAction::Unmount).await?;
    store.shutdown(config.shutdown_timeout()).await?;

    Ok(())
}
