//! Shared test helpers: an in-memory recording sink and config/server fixtures.

use crate::config::{Config, TypeConfig};
use crate::error::SinkError;
use crate::sink::ContentSink;
use crate::types::{RemoteObject, SinkContent};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config with the given base URL and parent locations set for every kind.
pub(crate) fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.source.base_url = base_url.to_string();
    config.post.content_type = "blog_post".to_string();
    config.post.parent_location = Some(2);
    config.media.parent_location = Some(43);
    config.category.parent_location = Some(44);
    config.tag.parent_location = Some(45);
    config.user.parent_location = Some(46);
    config
}

/// Mount a collection page response for `resource` at the given page number.
pub(crate) async fn mount_page(
    server: &MockServer,
    resource: &str,
    page: u32,
    body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(format!("/wp-json/wp/v2/{resource}")))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// One recorded `create_or_update_content` call.
pub(crate) struct RecordedCall {
    pub(crate) remote_id: String,
    pub(crate) parent_location_id: i64,
    pub(crate) update: bool,
}

#[derive(Default)]
struct SinkState {
    contents: HashMap<String, SinkContent>,
    next_id: i64,
    creates: u64,
    updates: u64,
    fail_remote_ids: HashSet<String>,
    decline_remote_ids: HashSet<String>,
    calls: Vec<RecordedCall>,
}

/// In-memory sink that records every call and keys content by remote id,
/// so idempotence (update-not-duplicate) is observable from tests.
#[derive(Default)]
pub(crate) struct RecordingSink {
    state: Mutex<SinkState>,
}

impl RecordingSink {
    pub(crate) fn new() -> RecordingSink {
        RecordingSink::default()
    }

    /// Make the sink raise a validation error for this remote id.
    pub(crate) fn fail_on(&self, remote_id: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_remote_ids
            .insert(remote_id.to_string());
    }

    /// Make the sink decline (return `None`) for this remote id.
    pub(crate) fn decline_on(&self, remote_id: &str) {
        self.state
            .lock()
            .unwrap()
            .decline_remote_ids
            .insert(remote_id.to_string());
    }

    pub(crate) fn creates(&self) -> u64 {
        self.state.lock().unwrap().creates
    }

    pub(crate) fn updates(&self) -> u64 {
        self.state.lock().unwrap().updates
    }

    pub(crate) fn remote_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .state
            .lock()
            .unwrap()
            .contents
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub(crate) fn last_call<T>(&self, read: impl FnOnce(&RecordedCall) -> T) -> Option<T> {
        self.state.lock().unwrap().calls.last().map(read)
    }
}

#[async_trait]
impl ContentSink for RecordingSink {
    async fn create_or_update_content(
        &self,
        object: &RemoteObject,
        _values: &TypeConfig,
        remote_id: &str,
        parent_location_id: i64,
        update: bool,
    ) -> Result<Option<SinkContent>, SinkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            remote_id: remote_id.to_string(),
            parent_location_id,
            update,
        });

        if state.fail_remote_ids.contains(remote_id) {
            return Err(SinkError::Validation {
                remote_id: remote_id.to_string(),
                reason: "field payload rejected".to_string(),
            });
        }
        if state.decline_remote_ids.contains(remote_id) {
            return Ok(None);
        }

        let name = object
            .rendered("title")
            .or_else(|| object.str_field("name"))
            .or_else(|| object.slug())
            .unwrap_or("untitled")
            .to_string();

        if let Some(existing) = state.contents.get(remote_id).cloned() {
            state.updates += 1;
            let refreshed = SinkContent { name, ..existing };
            state
                .contents
                .insert(remote_id.to_string(), refreshed.clone());
            return Ok(Some(refreshed));
        }

        state.next_id += 1;
        let content = SinkContent {
            id: 100 + state.next_id,
            name,
            remote_id: remote_id.to_string(),
        };
        state.creates += 1;
        state
            .contents
            .insert(remote_id.to_string(), content.clone());
        Ok(Some(content))
    }
}
