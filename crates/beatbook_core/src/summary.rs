//! Ranked entity counts produced by aggregation.

use crate::EntityCategory;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One distinct name and how many times it was mentioned.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    derive_getters::Getters,
    derive_more::Display,
)]
#[display("{} ({})", name, count)]
pub struct EntityCount {
    /// Name exactly as extracted
    name: String,
    /// Number of mentions across all stories
    count: usize,
}

impl EntityCount {
    /// Creates a new entry.
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Name-to-count mapping kept in ranked order.
///
/// Serializes as a JSON object whose keys appear in ranking order, and reads
/// back in the order the keys appear in the file.
///
/// # Examples
///
/// ```
/// use beatbook_core::{EntityCount, RankedCounts};
///
/// let ranked = RankedCounts::from(vec![EntityCount::new("Easton", 7), EntityCount::new("Oxford", 3)]);
/// let json = serde_json::to_string(&ranked).unwrap();
/// assert_eq!(json, r#"{"Easton":7,"Oxford":3}"#);
///
/// let back: RankedCounts = serde_json::from_str(&json).unwrap();
/// assert_eq!(back, ranked);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_more::From)]
pub struct RankedCounts(Vec<EntityCount>);

impl RankedCounts {
    /// Entries in ranked order.
    pub fn entries(&self) -> &[EntityCount] {
        &self.0
    }

    /// Count recorded for `name`, if it made the cut.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.count)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no name made the cut.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in ranked order.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityCount> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RankedCounts {
    type Item = &'a EntityCount;
    type IntoIter = std::slice::Iter<'a, EntityCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for RankedCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.name, &entry.count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RankedCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RankedVisitor;

        impl<'de> Visitor<'de> for RankedVisitor {
            type Value = RankedCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of entity names to mention counts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, count)) = access.next_entry::<String, usize>()? {
                    entries.push(EntityCount { name, count });
                }
                Ok(RankedCounts(entries))
            }
        }

        deserializer.deserialize_map(RankedVisitor)
    }
}

/// Per-category ranked counts plus the number of stories analyzed.
///
/// `topics` counts classified stories per topic. It is left out of the file
/// when no story was classified.
///
/// # Examples
///
/// ```
/// use beatbook_core::EntitySummary;
///
/// let summary: EntitySummary = serde_json::from_str(
///     r#"{"total_stories": 2, "people": {"A": 3}, "places": {}, "organizations": {}}"#,
/// ).unwrap();
/// assert_eq!(*summary.total_stories(), 2);
/// assert_eq!(summary.people().get("A"), Some(3));
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
)]
pub struct EntitySummary {
    /// Number of enriched records analyzed
    total_stories: usize,
    /// Ranked people
    #[serde(default)]
    people: RankedCounts,
    /// Ranked places
    #[serde(default)]
    places: RankedCounts,
    /// Ranked organizations
    #[serde(default)]
    organizations: RankedCounts,
    /// Stories per topic, ranked
    #[serde(default, skip_serializing_if = "RankedCounts::is_empty")]
    topics: RankedCounts,
}

impl EntitySummary {
    /// Assembles a summary from already-ranked categories.
    pub fn new(
        total_stories: usize,
        people: RankedCounts,
        places: RankedCounts,
        organizations: RankedCounts,
    ) -> Self {
        Self {
            total_stories,
            people,
            places,
            organizations,
            topics: RankedCounts::default(),
        }
    }

    /// Attaches ranked topic counts.
    pub fn with_topics(mut self, topics: RankedCounts) -> Self {
        self.topics = topics;
        self
    }

    /// Ranked counts for one category.
    pub fn ranked(&self, category: EntityCategory) -> &RankedCounts {
        match category {
            EntityCategory::People => &self.people,
            EntityCategory::Places => &self.places,
            EntityCategory::Organizations => &self.organizations,
        }
    }
}
