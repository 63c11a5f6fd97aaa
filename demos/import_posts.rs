//! Import WordPress blog posts into an in-memory demo sink
//!
//! Usage: cargo run --example import_posts
//!
//! Environment:
//! - `WP_BASE_URL` (required) - source site, e.g. https://blog.example.com
//! - `WP_PER_PAGE` - page size (default: from configuration)
//! - `WP_PAGE` - starting page (default: 1)
//! - `WP_EXPORT_IMAGES` - set to any value to export cached images as a zip
//! - `WP_DRY_RUN` - set to any value to skip persisting into the sink

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wp_import::config::TypeConfig;
use wp_import::{
    Config, ContentSink, HttpSourceClient, ImportOptions, Importer, ObjectKind, RemoteObject,
    SinkContent, SinkError,
};

/// Minimal sink keeping created content in memory, keyed by remote id.
///
/// A real integration would persist into a CMS repository here; the remote-id
/// lookup below is what makes re-imports update instead of duplicate.
struct MemorySink {
    dry_run: bool,
    contents: Mutex<HashMap<String, SinkContent>>,
    next_id: Mutex<i64>,
}

impl MemorySink {
    fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            contents: Mutex::new(HashMap::new()),
            next_id: Mutex::new(0),
        }
    }
}

#[async_trait]
impl ContentSink for MemorySink {
    async fn create_or_update_content(
        &self,
        object: &RemoteObject,
        values: &TypeConfig,
        remote_id: &str,
        _parent_location_id: i64,
        _update: bool,
    ) -> Result<Option<SinkContent>, SinkError> {
        let name = object
            .rendered("title")
            .or_else(|| object.slug())
            .unwrap_or("untitled")
            .to_string();
        let slug = object.str_field(&values.slug_field).unwrap_or_default();
        println!("  {} => {} ({})", remote_id, name, slug);

        if self.dry_run {
            return Ok(Some(SinkContent {
                id: 0,
                name,
                remote_id: remote_id.to_string(),
            }));
        }

        let mut contents = self.contents.lock().expect("sink lock poisoned");
        if let Some(existing) = contents.get_mut(remote_id) {
            existing.name = name;
            return Ok(Some(existing.clone()));
        }

        let mut next_id = self.next_id.lock().expect("sink lock poisoned");
        *next_id += 1;
        let content = SinkContent {
            id: *next_id,
            name,
            remote_id: remote_id.to_string(),
        };
        contents.insert(remote_id.to_string(), content.clone());
        Ok(Some(content))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let base_url = std::env::var("WP_BASE_URL").expect("Set WP_BASE_URL to a WordPress site URL");
    let per_page: Option<u32> = std::env::var("WP_PER_PAGE").ok().and_then(|v| v.parse().ok());
    let page: Option<i32> = std::env::var("WP_PAGE").ok().and_then(|v| v.parse().ok());
    let export_images = std::env::var("WP_EXPORT_IMAGES").is_ok();
    let dry_run = std::env::var("WP_DRY_RUN").is_ok();

    let mut config = Config::default();
    config.source.base_url = base_url.clone();
    config.post.content_type = "blog_post".to_string();
    config.post.parent_location = Some(2);

    println!("Importing posts from {base_url}");

    let client = Arc::new(HttpSourceClient::new()?);
    let sink = Arc::new(MemorySink::new(dry_run));
    let mut importer = Importer::new(client, sink, Arc::new(config), ObjectKind::Post);

    let options = ImportOptions {
        export_images,
        ..ImportOptions::default()
    };
    let result = importer.import(per_page, page, &options).await?;

    println!("Post imported => {}", result.success);
    println!("Done ({} of {} objects)", result.success, result.total);
    Ok(())
}
