//! Grouping of the API's flat, `type`-tagged record arrays.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

const TYPE_KEY: &str = "type";
const ERROR_CODE_KEY: &str = "error_code";
const MESSAGE_KEY: &str = "message";

/// Response body as handed to [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Undecoded body text.
    Text(String),
    /// Already decoded JSON.
    Json(Value),
}

impl From<String> for RawResponse {
    fn from(body: String) -> Self {
        RawResponse::Text(body)
    }
}

impl From<&str> for RawResponse {
    fn from(body: &str) -> Self {
        RawResponse::Text(body.to_string())
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        RawResponse::Json(value)
    }
}

/// Grouping key derived from a record's `type` field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    User,
    Bookmark,
    Folder,
    Error,
    Meta,
    /// A string tag outside the known set.
    Other(String),
    /// No `type`, or a `type` that is not a string.
    Untagged,
}

impl RecordKind {
    fn from_tag(tag: Option<Value>) -> Self {
        match tag {
            Some(Value::String(tag)) => match tag.as_str() {
                "user" => RecordKind::User,
                "bookmark" => RecordKind::Bookmark,
                "folder" => RecordKind::Folder,
                "error" => RecordKind::Error,
                "meta" => RecordKind::Meta,
                _ => RecordKind::Other(tag),
            },
            _ => RecordKind::Untagged,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordKind::User => "user",
            RecordKind::Bookmark => "bookmark",
            RecordKind::Folder => "folder",
            RecordKind::Error => "error",
            RecordKind::Meta => "meta",
            RecordKind::Other(tag) => tag,
            RecordKind::Untagged => "untagged",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API entity with its `type` field removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Decode into a typed shape such as [`crate::User`].
    pub fn parse<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.0))?)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Record(fields)
    }
}

/// Records grouped by kind, each group in response order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedResponse {
    groups: BTreeMap<RecordKind, Vec<Record>>,
}

impl NormalizedResponse {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &RecordKind> {
        self.groups.keys()
    }

    pub fn get(&self, kind: &RecordKind) -> Option<&[Record]> {
        self.groups.get(kind).map(Vec::as_slice)
    }

    pub fn take(&mut self, kind: &RecordKind) -> Option<Vec<Record>> {
        self.groups.remove(kind)
    }

    pub fn users(&self) -> &[Record] {
        self.get(&RecordKind::User).unwrap_or_default()
    }

    pub fn bookmarks(&self) -> &[Record] {
        self.get(&RecordKind::Bookmark).unwrap_or_default()
    }

    pub fn folders(&self) -> &[Record] {
        self.get(&RecordKind::Folder).unwrap_or_default()
    }

    /// The first `error` record as `Error::Api`, if the response carries one.
    pub fn api_error(&self) -> Option<Error> {
        self.get(&RecordKind::Error)
            .and_then(|records| records.first())
            .map(|record| Error::Api {
                code: record.get(ERROR_CODE_KEY).and_then(error_code),
                message: record
                    .get(MESSAGE_KEY)
                    .map(message_text)
                    .unwrap_or_default(),
            })
    }

    /// The first record of `kind`. An `error` record takes precedence.
    pub fn single(mut self, kind: RecordKind) -> Result<Record> {
        if let Some(err) = self.api_error() {
            return Err(err);
        }
        self.take(&kind)
            .and_then(|records| records.into_iter().next())
            .ok_or_else(|| Error::UnexpectedResponse(kind.to_string()))
    }

    fn push(&mut self, kind: RecordKind, record: Record) {
        self.groups.entry(kind).or_insert_with(Vec::new).push(record);
    }
}

/// Group a response into typed buckets, or turn a failed call into the most
/// specific error its body allows.
pub fn normalize(outcome: Result<RawResponse>) -> Result<NormalizedResponse> {
    let body = match outcome {
        Ok(body) => body,
        Err(Error::Http { status, data }) => return Err(decode_http_error(status, data)),
        Err(err) => return Err(err),
    };

    let value = match body {
        RawResponse::Text(text) if text.trim().is_empty() => return Err(Error::EmptyResponse),
        RawResponse::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(body = %text, error = %err, "failed to decode response body");
                return Err(Error::MalformedResponse(err.to_string()));
            }
        },
        RawResponse::Json(value) => value,
    };

    let records = match value {
        Value::Null => return Err(Error::EmptyResponse),
        Value::Array(records) => records,
        record @ Value::Object(_) => vec![record],
        other => {
            return Err(Error::MalformedResponse(format!(
                "expected a list of records, found {}",
                other
            )))
        }
    };

    let mut normalized = NormalizedResponse::default();
    for record in records {
        match record {
            Value::Object(mut fields) => {
                let kind = RecordKind::from_tag(fields.remove(TYPE_KEY));
                normalized.push(kind, Record(fields));
            }
            other => {
                return Err(Error::MalformedResponse(format!(
                    "expected a record object, found {}",
                    other
                )))
            }
        }
    }
    Ok(normalized)
}

fn decode_http_error(status: u16, data: String) -> Error {
    let first = match serde_json::from_str::<Value>(&data) {
        Ok(Value::Array(items)) => items.into_iter().next(),
        _ => None,
    };
    match first {
        Some(Value::Object(fields)) if fields.contains_key(MESSAGE_KEY) => Error::Api {
            code: fields.get(ERROR_CODE_KEY).and_then(error_code),
            message: fields.get(MESSAGE_KEY).map(message_text).unwrap_or_default(),
        },
        _ => Error::Http { status, data },
    }
}

fn error_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
