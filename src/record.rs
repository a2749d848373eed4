//! Raw ad records as returned by the endpoint, and their fixed twelve-field projection.

use serde::Serialize;
use serde_json::{Map, Value};

/// Column order of the export, also used as the header row.
pub const FIELD_NAMES: [&str; 12] = [
    "title",
    "description",
    "industry",
    "country",
    "video_url",
    "cover_image_url",
    "likes",
    "comments",
    "shares",
    "views",
    "posting_time",
    "engagement_rate",
];

/// One untouched ad entry from `data.list`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Field lookup; JSON `null` counts as missing.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RawRecord {
    type Error = Value;

    /// Only JSON objects are records; anything else is handed back.
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Fixed-shape export row. `None` means the source did not carry the field.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExportRow {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub industry: Option<Value>,
    pub country: Option<Value>,
    pub video_url: Option<Value>,
    pub cover_image_url: Option<Value>,
    pub likes: Option<Value>,
    pub comments: Option<Value>,
    pub shares: Option<Value>,
    pub views: Option<Value>,
    pub posting_time: Option<Value>,
    pub engagement_rate: Option<Value>,
}

impl ExportRow {
    pub fn from_record(r: &RawRecord) -> Self {
        let get = |k: &str| r.field(k).cloned();
        Self {
            title: get("title"),
            description: get("description"),
            industry: get("industry"),
            country: get("country"),
            video_url: get("video_url"),
            cover_image_url: get("cover_image_url"),
            likes: get("likes"),
            comments: get("comments"),
            shares: get("shares"),
            views: get("views"),
            posting_time: get("posting_time"),
            engagement_rate: get("engagement_rate"),
        }
    }

    /// Cells in `FIELD_NAMES` order.
    pub fn cells(&self) -> [Option<&Value>; 12] {
        [
            self.title.as_ref(),
            self.description.as_ref(),
            self.industry.as_ref(),
            self.country.as_ref(),
            self.video_url.as_ref(),
            self.cover_image_url.as_ref(),
            self.likes.as_ref(),
            self.comments.as_ref(),
            self.shares.as_ref(),
            self.views.as_ref(),
            self.posting_time.as_ref(),
            self.engagement_rate.as_ref(),
        ]
    }
}

/// Rows in input order; always one row per record.
pub type ExportTable = Vec<ExportRow>;

/// Pure projection of records onto export rows.
pub fn to_table(records: &[RawRecord]) -> ExportTable {
    records.iter().map(ExportRow::from_record).collect()
}
