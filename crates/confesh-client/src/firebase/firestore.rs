//! Firestore REST document encoding.
//!
//! Documents carry typed values (`{"stringValue": "..."}`); this module maps
//! them to and from [`Confession`] records.

use crate::{ClientError, ClientResult};

use confesh_core::{Confession, NewConfession, UNKNOWN_AUTHOR};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};

pub(crate) const FIELD_CONTENT: &str = "content";
pub(crate) const FIELD_CREATED_AT: &str = "createdAt";
pub(crate) const FIELD_UPDATED_AT: &str = "updatedAt";
pub(crate) const FIELD_IS_ANONYMOUS: &str = "isAnonymous";
pub(crate) const FIELD_AUTHOR: &str = "author";
pub(crate) const FIELD_AUTHOR_ID: &str = "authorId";

/// One page of a `documents.list` response. An empty collection is `{}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Document {
    /// Full resource name, `projects/{p}/databases/{d}/documents/{collection}/{id}`
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Last segment of the resource name.
    pub fn id(&self) -> ClientResult<&str> {
        self.name
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ClientError::decode(format!("document name '{}' has no id", self.name)))
    }

    /// Map stored fields onto a confession, filling in what older records lack.
    pub fn into_confession(self) -> ClientResult<Confession> {
        let id = self.id()?.to_string();
        let fields = &self.fields;

        let content = string_field(fields, FIELD_CONTENT).unwrap_or_else(|| {
            log::warn!("Document {id} has no content");
            String::new()
        });

        Ok(Confession {
            content,
            created_at: timestamp_field(fields, FIELD_CREATED_AT).unwrap_or_else(Utc::now),
            updated_at: timestamp_field(fields, FIELD_UPDATED_AT),
            is_anonymous: bool_field(fields, FIELD_IS_ANONYMOUS).unwrap_or(false),
            author: string_field(fields, FIELD_AUTHOR)
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            author_id: string_field(fields, FIELD_AUTHOR_ID),
            id: Some(id),
        })
    }
}

/// Body for `documents.createDocument`.
pub(crate) fn encode_new(confession: &NewConfession) -> Value {
    json!({
        "fields": {
            FIELD_CONTENT: string_value(&confession.content),
            FIELD_CREATED_AT: timestamp_value(confession.created_at),
            FIELD_IS_ANONYMOUS: { "booleanValue": confession.is_anonymous },
            FIELD_AUTHOR: string_value(&confession.author),
            FIELD_AUTHOR_ID: string_value(&confession.author_id),
        }
    })
}

/// Body for a `documents.patch` limited to the editable fields.
pub(crate) fn encode_content_update(content: &str, updated_at: DateTime<Utc>) -> Value {
    json!({
        "fields": {
            FIELD_CONTENT: string_value(content),
            FIELD_UPDATED_AT: timestamp_value(updated_at),
        }
    })
}

fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

fn timestamp_value(value: DateTime<Utc>) -> Value {
    json!({ "timestampValue": value.to_rfc3339_opts(SecondsFormat::Micros, true) })
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)?
        .get("stringValue")?
        .as_str()
        .map(String::from)
}

fn bool_field(fields: &Map<String, Value>, name: &str) -> Option<bool> {
    fields.get(name)?.get("booleanValue")?.as_bool()
}

fn timestamp_field(fields: &Map<String, Value>, name: &str) -> Option<DateTime<Utc>> {
    let raw = fields.get(name)?.get("timestampValue")?.as_str()?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparseable {name} timestamp '{raw}': {e}");
            None
        }
    }
}
