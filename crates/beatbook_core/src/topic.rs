//! Story topics.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::IntoEnumIterator;

/// The fixed set of topics a story can be filed under.
///
/// Serialized as the display label. Reading a label that is not an exact
/// match goes through [`Topic::from_response`], so hand-edited or older
/// files still load.
///
/// # Examples
///
/// ```
/// use beatbook_core::Topic;
///
/// assert_eq!(Topic::PoliceAndCrime.label(), "Police & Crime");
/// assert_eq!(Topic::from_response("  \"judiciary\"\n"), Topic::Judiciary);
/// assert_eq!(Topic::from_response("I'm not sure."), Topic::Other);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum Topic {
    /// Schools, school boards, colleges
    Education,
    /// Hospitals, public health
    Health,
    /// Arrests, investigations, crime reports
    #[strum(serialize = "Police & Crime")]
    PoliceAndCrime,
    /// Councils, commissions, town government
    #[strum(serialize = "Local government")]
    LocalGovernment,
    /// Courts, trials, sentencing
    Judiciary,
    /// Fire, EMS, emergency management, crashes
    #[strum(serialize = "Public Safety")]
    PublicSafety,
    /// Campaigns and elections
    Election,
    /// The bay, watermen, environment
    Chesapeake,
    /// Restaurants, farms, food
    Food,
    /// Festivals, arts, community groups
    #[strum(serialize = "Community Events & Culture")]
    CommunityEventsAndCulture,
    /// Film, television, streaming
    #[strum(serialize = "Movies & Shows")]
    MoviesAndShows,
    /// School and local sports
    Sports,
    /// Churches and faith communities
    Religion,
    /// Death notices
    Obituaries,
    /// Anything else, and anything unclassified
    #[default]
    Other,
}

impl Topic {
    /// Display label, also used in files and prompts.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Map a free-form tool response onto a topic.
    ///
    /// Tried in order, comparing case-insensitively:
    /// 1. The response, stripped of whitespace and quotes, equals a label
    /// 2. The response contains a label
    /// 3. A word of the response equals a word of a label
    ///
    /// Anything else is [`Topic::Other`]. Labels are checked in declaration
    /// order at each step.
    pub fn from_response(response: &str) -> Self {
        let cleaned = response
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'')
            .trim()
            .to_lowercase();

        if let Some(topic) = Self::iter().find(|t| t.label().to_lowercase() == cleaned) {
            return topic;
        }

        if let Some(topic) = Self::iter().find(|t| cleaned.contains(&t.label().to_lowercase())) {
            return topic;
        }

        let words: Vec<&str> = cleaned
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| !word.is_empty())
            .collect();

        Self::iter()
            .find(|topic| {
                let label = topic.label().to_lowercase();
                label
                    .split_whitespace()
                    .filter(|word| word.chars().any(char::is_alphanumeric))
                    .any(|word| words.iter().any(|w| *w == word))
            })
            .unwrap_or_default()
    }
}

impl Serialize for Topic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_response(&label))
    }
}
