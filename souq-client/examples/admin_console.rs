//! Minimal console walkthrough of the admin client.
//!
//! Usage:
//!   SOUQ_API_URL=http://localhost:3000 \
//!   SOUQ_EMAIL=admin@example.com SOUQ_PASSWORD=... \
//!   cargo run --example admin_console

use souq_client::{ClientConfig, PageQuery, ProductFilters, ProductsCoordinator, SortBy, SortOrder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_url =
        std::env::var("SOUQ_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let email = std::env::var("SOUQ_EMAIL").unwrap_or_default();
    let password = std::env::var("SOUQ_PASSWORD").unwrap_or_default();

    let client = ClientConfig::new(base_url)
        .with_timeout(15)
        .with_session_path("./.souq-session.json")
        .build();

    if !client.session().is_authenticated() {
        let profile = client.auth.login(&email, &password).await?;
        println!("logged in as {} ({})", profile.user_name, profile.role);
    }

    let categories = client.categories.paginate(PageQuery::new(1, 10)).await?;
    println!("categories ({} total):", categories.total);
    for category in &categories.items {
        println!("  {} - {}", category.id, category.full_display);
    }

    // Screen-style orchestration: apply a price sort, then search over it.
    let coordinator = ProductsCoordinator::new(client.products.clone());
    coordinator
        .set_draft_filters(ProductFilters {
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            ..Default::default()
        })
        .await;
    coordinator.apply_filters().await?;

    let snapshot = coordinator.snapshot().await;
    println!(
        "products page {}/{} ({} total):",
        snapshot.page, snapshot.total_pages, snapshot.total
    );
    for product in &snapshot.items {
        println!(
            "  {} - {} ({} -> {})",
            product.id, product.name, product.price, product.final_price
        );
    }

    Ok(())
}
