//! Stories enriched with extracted entity names.

use crate::{
    EntityCategory, Story, Topic,
    story::{nullable_string, parse_date},
};
use serde::{Deserialize, Deserializer, Serialize};

/// Names extracted from one story, by category.
///
/// Lists keep the order the extractor returned and may contain duplicates.
/// Names are stored exactly as extracted; nothing is trimmed or merged.
///
/// # Examples
///
/// ```
/// use beatbook_core::{EntityCategory, EntityLists};
///
/// let lists: EntityLists = serde_json::from_str(r#"{"people": ["Sheriff Joe Gamble"]}"#).unwrap();
/// assert_eq!(lists.names(EntityCategory::People), ["Sheriff Joe Gamble"]);
/// assert!(lists.names(EntityCategory::Places).is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct EntityLists {
    /// People mentioned
    #[serde(default, deserialize_with = "nullable_list")]
    people: Vec<String>,
    /// Places mentioned
    #[serde(default, deserialize_with = "nullable_list")]
    places: Vec<String>,
    /// Organizations mentioned
    #[serde(default, deserialize_with = "nullable_list")]
    organizations: Vec<String>,
}

impl EntityLists {
    /// Creates a new builder.
    pub fn builder() -> EntityListsBuilder {
        EntityListsBuilder::default()
    }

    /// Names for one category.
    pub fn names(&self, category: EntityCategory) -> &[String] {
        match category {
            EntityCategory::People => &self.people,
            EntityCategory::Places => &self.places,
            EntityCategory::Organizations => &self.organizations,
        }
    }

    /// True when no category holds any name.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.places.is_empty() && self.organizations.is_empty()
    }

    /// Total number of names across categories, duplicates included.
    pub fn len(&self) -> usize {
        self.people.len() + self.places.len() + self.organizations.len()
    }
}

/// A story plus the names extracted from it.
///
/// Serializes as the original story object with `people`, `places` and
/// `organizations` added alongside its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct EnrichedStory {
    /// Headline
    #[serde(default, deserialize_with = "nullable_string")]
    title: String,
    /// Full story text
    #[serde(default, deserialize_with = "nullable_string")]
    content: String,
    /// Publication date as exported
    #[serde(default, deserialize_with = "nullable_string")]
    date: String,
    /// Canonical link
    #[serde(default, deserialize_with = "nullable_string")]
    url: String,
    /// Topic assigned by classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    topic: Option<Topic>,
    /// People mentioned
    #[serde(default, deserialize_with = "nullable_list")]
    people: Vec<String>,
    /// Places mentioned
    #[serde(default, deserialize_with = "nullable_list")]
    places: Vec<String>,
    /// Organizations mentioned
    #[serde(default, deserialize_with = "nullable_list")]
    organizations: Vec<String>,
    /// Fields carried over from the input story
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl EnrichedStory {
    /// Attaches extracted names to a story.
    ///
    /// Entity keys already present on the input story (from an earlier run)
    /// are replaced, not duplicated.
    pub fn new(story: Story, entities: EntityLists) -> Self {
        let Story {
            title,
            content,
            date,
            url,
            topic,
            mut extra,
        } = story;
        for key in ["people", "places", "organizations"] {
            extra.remove(key);
        }
        Self {
            title,
            content,
            date,
            url,
            topic,
            people: entities.people,
            places: entities.places,
            organizations: entities.organizations,
            extra,
        }
    }

    /// Names for one category.
    pub fn names(&self, category: EntityCategory) -> &[String] {
        match category {
            EntityCategory::People => &self.people,
            EntityCategory::Places => &self.places,
            EntityCategory::Organizations => &self.organizations,
        }
    }

    /// Publication date, if `date` uses a recognised layout.
    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        parse_date(&self.date)
    }
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
