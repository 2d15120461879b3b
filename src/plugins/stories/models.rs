use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::error::FormatError;

pub type StoryId = i64;
pub type AuthorId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub author_id: AuthorId,
    // kept as text; parsed per record when formatting
    pub date_published: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: AuthorId,
    pub full_name: String,
}

/// Duration as the media service sends it: usually whole seconds, sometimes a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Seconds(i64),
    Other(serde_json::Value),
}

impl RawDuration {
    pub fn seconds(&self) -> Result<i64, FormatError> {
        match self {
            RawDuration::Seconds(secs) => Ok(*secs),
            RawDuration::Other(serde_json::Value::String(s)) => {
                s.trim().parse::<i64>().map_err(|_| FormatError::Duration(s.clone()))
            }
            RawDuration::Other(other) => Err(FormatError::Duration(other.to_string())),
        }
    }
}

// the feed sends story keys as numbers or as numeric strings
fn story_key<'de, D>(deserializer: D) -> Result<StoryId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Number(StoryId),
        Text(String),
    }

    match Key::deserialize(deserializer)? {
        Key::Number(id) => Ok(id),
        Key::Text(raw) => raw
            .trim()
            .parse::<StoryId>()
            .map_err(|_| serde::de::Error::custom(format!("invalid story key {:?}", raw))),
    }
}

/// One entry of the remote media feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Media {
    #[serde(rename = "story", deserialize_with = "story_key")]
    pub story_id: StoryId,
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(rename = "href", alias = "url")]
    pub url: String,
    #[serde(default, rename = "duration")]
    pub duration_seconds: Option<RawDuration>,
    #[serde(default)]
    pub credit: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMedia {
    pub kind: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub credit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputStory {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub published: Option<String>,
    /// Present only when at least one media entry matched; never an empty list.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub media: Option<Vec<OutputMedia>>,
}
