//! Configuration types for wp-import

use crate::error::{Error, Result};
use crate::types::ObjectKind;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Source API settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the WordPress site; scheme and host are required
    #[serde(default)]
    pub base_url: String,

    /// Default page size for collection requests (default: 10)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            per_page: default_per_page(),
        }
    }
}

/// Sink mapping settings for one object kind
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Sink content type identifier this kind maps to
    #[serde(default)]
    pub content_type: String,

    /// Field identifier the sink uses for URL slugs (default: "slug")
    #[serde(default = "default_slug_field")]
    pub slug_field: String,

    /// Parent location id under which content of this kind is created
    ///
    /// Required before any content can be mapped; a missing value is a fatal
    /// configuration error, not a per-item failure.
    #[serde(default)]
    pub parent_location: Option<i64>,

    /// Page size override for this kind (falls back to the source default)
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            content_type: String::new(),
            slug_field: default_slug_field(),
            parent_location: None,
            per_page: None,
        }
    }
}

/// Image storage and export settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Root directory for locally cached images (default: "./images")
    #[serde(default = "default_image_root")]
    pub root_dir: PathBuf,

    /// Separator between remote id and base name in image filenames (default: "_")
    #[serde(default = "default_image_separator")]
    pub separator: String,

    /// Directory that receives export archives (default: the system temp dir)
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_image_root(),
            separator: default_image_separator(),
            export_dir: default_export_dir(),
        }
    }
}

impl ImageConfig {
    /// Local image storage directory for the current date (`<root>/<Y/m/d>`)
    ///
    /// Images fetched during a run land in a dated subdirectory so successive
    /// runs never collide.
    #[must_use]
    pub fn local_storage_dir(&self) -> PathBuf {
        self.root_dir
            .join(Local::now().format("%Y/%m/%d").to_string())
    }

    /// Image filename for a remote id: `<remote_id><separator><base_name>`
    #[must_use]
    pub fn image_name(&self, remote_id: &str, base_name: &str) -> String {
        format!("{remote_id}{}{base_name}", self.separator)
    }
}

/// Main configuration for the import pipeline
///
/// Every object kind gets its own mapping section; the source and image
/// sections are shared. All fields carry serde defaults so a partial config
/// file deserializes cleanly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source API settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Blog post mapping
    #[serde(default)]
    pub post: TypeConfig,

    /// Media attachment mapping
    #[serde(default)]
    pub media: TypeConfig,

    /// Category mapping
    #[serde(default)]
    pub category: TypeConfig,

    /// Tag mapping
    #[serde(default)]
    pub tag: TypeConfig,

    /// Author mapping
    #[serde(default)]
    pub user: TypeConfig,

    /// Image storage and export settings
    #[serde(default)]
    pub images: ImageConfig,
}

impl Config {
    /// Mapping settings for one object kind
    #[must_use]
    pub fn kind(&self, kind: ObjectKind) -> &TypeConfig {
        match kind {
            ObjectKind::Post => &self.post,
            ObjectKind::Media => &self.media,
            ObjectKind::Category => &self.category,
            ObjectKind::Tag => &self.tag,
            ObjectKind::User => &self.user,
        }
    }

    /// Effective page size for a kind: the kind's override, else the source
    /// default, floored at 1
    #[must_use]
    pub fn per_page_for(&self, kind: ObjectKind) -> u32 {
        self.kind(kind)
            .per_page
            .unwrap_or(self.source.per_page)
            .max(1)
    }

    /// The base URL, validated and stripped of trailing slashes
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the URL is missing a scheme or host,
    /// raised before any request is attempted.
    pub fn validated_base_url(&self) -> Result<String> {
        let base_url = self.source.base_url.trim();
        let parsed = Url::parse(base_url).map_err(|_| Error::Config {
            message: format!("invalid base URL: {base_url:?}"),
            key: Some("source.base_url".to_string()),
        })?;
        if !parsed.has_host() {
            return Err(Error::Config {
                message: format!("base URL has no host: {base_url:?}"),
                key: Some("source.base_url".to_string()),
            });
        }
        Ok(base_url.trim_end_matches('/').to_string())
    }
}

fn default_per_page() -> u32 {
    10
}

fn default_slug_field() -> String {
    "slug".to_string()
}

fn default_image_root() -> PathBuf {
    PathBuf::from("./images")
}

fn default_image_separator() -> String {
    "_".to_string()
}

fn default_export_dir() -> PathBuf {
    std::env::temp_dir()
}
