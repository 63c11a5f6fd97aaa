//! Core types for the import pipeline

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Known WordPress object kinds
///
/// Every importable object type is a variant here; the kind determines both
/// the REST resource path on the source side and the configuration section
/// on the sink side. Records of unknown kinds are never constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A blog post (`wp-json/wp/v2/posts`)
    Post,
    /// A media attachment (`wp-json/wp/v2/media`)
    Media,
    /// A category term (`wp-json/wp/v2/categories`)
    Category,
    /// A tag term (`wp-json/wp/v2/tags`)
    Tag,
    /// An author (`wp-json/wp/v2/users`)
    User,
}

impl ObjectKind {
    /// All known kinds, in import dependency order (terms and authors before posts)
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Category,
        ObjectKind::Tag,
        ObjectKind::User,
        ObjectKind::Media,
        ObjectKind::Post,
    ];

    /// Singular datatype name, used in remote ids (`"post-42"`)
    #[must_use]
    pub fn datatype(&self) -> &'static str {
        match self {
            ObjectKind::Post => "post",
            ObjectKind::Media => "media",
            ObjectKind::Category => "category",
            ObjectKind::Tag => "tag",
            ObjectKind::User => "user",
        }
    }

    /// REST collection resource under `wp-json/wp/v2/`
    #[must_use]
    pub fn resource(&self) -> &'static str {
        match self {
            ObjectKind::Post => "posts",
            ObjectKind::Media => "media",
            ObjectKind::Category => "categories",
            ObjectKind::Tag => "tags",
            ObjectKind::User => "users",
        }
    }

    /// Resolve a datatype name back to a kind
    #[must_use]
    pub fn from_datatype(name: &str) -> Option<ObjectKind> {
        ObjectKind::ALL
            .into_iter()
            .find(|kind| kind.datatype() == name)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.datatype())
    }
}

/// One record fetched from the source API, in normalized form
///
/// Immutable once constructed: the raw JSON fields are wrapped untouched and
/// only exposed through accessors. A record without a positive integer `id`
/// is malformed and never becomes a `RemoteObject`.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteObject {
    id: u64,
    kind: ObjectKind,
    fields: Map<String, Value>,
}

impl RemoteObject {
    /// Parse a raw fetch record into a `RemoteObject`
    ///
    /// Returns `None` when the record is not a JSON object or carries no
    /// positive integer `id`. This is the malformed-record signal, distinct
    /// from a fetch failure.
    #[must_use]
    pub fn parse(kind: ObjectKind, raw: Value) -> Option<RemoteObject> {
        let fields = match raw {
            Value::Object(map) => map,
            _ => return None,
        };
        let id = fields.get("id").and_then(Value::as_i64).unwrap_or(0);
        let id = u64::try_from(id).ok().filter(|&id| id > 0)?;
        Some(RemoteObject { id, kind, fields })
    }

    /// The source-side object id (always positive)
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The object kind
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The composite remote id used for idempotent sink lookups (`"<datatype>-<id>"`)
    #[must_use]
    pub fn remote_id(&self) -> String {
        format!("{}-{}", self.kind.datatype(), self.id)
    }

    /// Raw field access
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String field access
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Rendered text of a field carrying WordPress's `{"rendered": "..."}` envelope
    #[must_use]
    pub fn rendered(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|value| value.get("rendered"))
            .and_then(Value::as_str)
    }

    /// The record's URL slug, if present
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.str_field("slug")
    }

    /// All raw fields of the record
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Sort direction for collection requests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Ascending (the source default)
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl Direction {
    /// Query-parameter value for this direction
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// Parse a direction value; anything other than `desc` falls back to ascending
    #[must_use]
    pub fn parse(value: &str) -> Direction {
        if value.eq_ignore_ascii_case("desc") {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }
}

/// Ordering derived from a request's free-form query options
///
/// An absent field means no ordering parameters are sent at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderBy {
    /// Field to order by, if any
    pub field: Option<String>,
    /// Sort direction (ascending unless `desc` was requested)
    pub direction: Direction,
}

impl OrderBy {
    /// Extract ordering from a query map, removing the raw `order`/`orderby`
    /// keys so callers don't double-send them
    pub fn take_from(query: &mut BTreeMap<String, String>) -> OrderBy {
        let field = query.remove("orderby").filter(|field| !field.is_empty());
        let direction = query
            .remove("order")
            .map(|value| Direction::parse(&value))
            .unwrap_or_default();
        OrderBy { field, direction }
    }

    /// Merge the derived ordering back into a query map
    ///
    /// Inserts the normalized pair only when a field is present; unrelated
    /// keys are left untouched.
    pub fn apply(&self, query: &mut BTreeMap<String, String>) {
        if let Some(field) = &self.field {
            query.insert("orderby".to_string(), field.clone());
            query.insert("order".to_string(), self.direction.as_str().to_string());
        }
    }
}

/// Final tally of one import run
#[must_use]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Objects mapped into the sink without error
    pub success: u64,
    /// All records the source returned, including malformed and failed ones
    pub total: u64,
}

/// Handle returned by the sink for created or updated content
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkContent {
    /// Internal content id assigned by the sink
    pub id: i64,
    /// Content name
    pub name: String,
    /// The remote id the content is bound to (`"<datatype>-<id>"`)
    pub remote_id: String,
}

/// One fetched page: parsed objects plus the count of malformed records
///
/// Malformed records (no positive id) still count toward the run's `total`
/// tally, so the page keeps them as a count rather than dropping them
/// silently.
#[derive(Clone, Debug, Default)]
pub struct Page {
    /// Successfully parsed objects, in source order
    pub objects: Vec<RemoteObject>,
    /// Records skipped because they carried no positive id
    pub skipped: usize,
}

impl Page {
    /// Total records the source returned for this page
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.objects.len() + self.skipped
    }

    /// True when the source returned no records at all, which is the page
    /// loop's termination signal
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}
