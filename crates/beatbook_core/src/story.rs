//! News story records as exported by the newsroom.

use crate::Topic;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Date layouts seen in newsroom exports, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// A single news story.
///
/// Missing or `null` text fields read as empty strings. `topic` is absent
/// until the story has been classified. Fields other than the known ones are
/// kept in `extra` and written back out unchanged.
///
/// # Examples
///
/// ```
/// use beatbook_core::Story;
///
/// let story: Story = serde_json::from_str(
///     r#"{"title": "Fire on Route 50", "content": "...", "date": "2024-03-09", "url": "https://example.com/1", "author": "Staff"}"#,
/// ).unwrap();
///
/// assert_eq!(story.title(), "Fire on Route 50");
/// assert!(story.extra().contains_key("author"));
/// assert!(story.parsed_date().is_some());
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct Story {
    /// Headline
    #[serde(default, deserialize_with = "nullable_string")]
    pub(crate) title: String,
    /// Full story text
    #[serde(default, deserialize_with = "nullable_string")]
    pub(crate) content: String,
    /// Publication date as exported
    #[serde(default, deserialize_with = "nullable_string")]
    pub(crate) date: String,
    /// Canonical link
    #[serde(default, deserialize_with = "nullable_string")]
    pub(crate) url: String,
    /// Topic assigned by classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) topic: Option<Topic>,
    /// Any other fields present in the export
    #[serde(flatten)]
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

impl Story {
    /// Creates a new story builder.
    pub fn builder() -> StoryBuilder {
        StoryBuilder::default()
    }

    /// Publication date, if `date` uses a recognised layout.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Files the story under `topic`, replacing any earlier classification.
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = Some(topic);
        self
    }
}

pub(crate) fn parse_date(date: &str) -> Option<NaiveDate> {
    let trimmed = date.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_read_as_empty() {
        let story: Story = serde_json::from_str(r#"{"title": null, "content": "x"}"#).unwrap();
        assert_eq!(story.title(), "");
        assert_eq!(story.content(), "x");
        assert_eq!(story.url(), "");
    }

    #[test]
    fn test_parsed_date_formats() {
        for date in ["2024-03-09", "2024/03/09", "03/09/2024"] {
            let story = Story::builder().date(date).build().unwrap();
            assert_eq!(
                story.parsed_date(),
                NaiveDate::from_ymd_opt(2024, 3, 9),
                "format {date}"
            );
        }
    }

    #[test]
    fn test_topic_is_optional() {
        let story: Story = serde_json::from_str(r#"{"title": "x", "topic": null}"#).unwrap();
        assert!(story.topic().is_none());
        assert!(!serde_json::to_string(&story).unwrap().contains("topic"));

        let story = story.with_topic(Topic::Judiciary);
        let json = serde_json::to_value(&story).unwrap();
        assert_eq!(json["topic"], "Judiciary");
    }

    #[test]
    fn test_unparseable_date() {
        let story = Story::builder().date("last Tuesday").build().unwrap();
        assert!(story.parsed_date().is_none());
    }
}
