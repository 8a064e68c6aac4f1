//! Post listing example: seed a few posts and list them the way a CMS
//! admin screen would
//!
//! Run with `RUST_LOG=listable=debug` to see the compiled plans.

use listable::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("📰 Listable Post Listing Example\n");

    let config = ListingConfig::default_config();
    let pipeline = ListFilterPipeline::from_config(&config, "post")?;
    let store = InMemoryStore::<Post>::new();

    let mut welcome = Post::new("Welcome to the blog");
    welcome.publish(Utc::now());
    welcome.set_top(Some(Utc::now()));
    let welcome = store.create(welcome).await?;

    let mut hello = Post::new("Hello, Rust");
    hello.excerpt = "Saying hello to ownership".to_string();
    hello.publish(Utc::now());
    let hello = store.create(hello).await?;

    let mut notes = Post::new("Notes for later");
    notes.excerpt = "hello again, eventually".to_string();
    store.create(notes).await?;

    let about = Post::page("About");
    store.create(about).await?;

    for _ in 0..3 {
        store.increment_views(hello.id)?;
    }
    store.increment_views(welcome.id)?;

    let requests = [
        ("Published posts", json!({"status": "publish"})),
        ("Drafts mentioning hello", json!({"q": "hello", "status": "draft"})),
        (
            "Most viewed (unknown sort fields ignored)",
            json!({"orders": "unknown_field:asc,views_count:desc"}),
        ),
        ("Pages", json!({"type": "page"})),
    ];

    for (label, raw) in requests {
        let request: FilterRequest = serde_json::from_value(raw)?;
        let page = pipeline.apply_filter(&store, &request).await?;

        println!("📋 {} ({} total)", label, page.pagination.total);
        for post in &page.data {
            let pin = if post.is_top() { "📌" } else { "  " };
            println!(
                "   {} #{} {} [{}] views={}",
                pin, post.id, post.title, post.status, post.views_count
            );
        }
        println!();
    }

    store.soft_delete(hello.id).await?;
    let trashed = pipeline
        .apply_filter(&store, &FilterRequest::new().only_trashed())
        .await?;
    println!("🗑️  Trash holds {} post(s)", trashed.pagination.total);

    Ok(())
}
