//! Entity categories.

use serde::{Deserialize, Serialize};

/// The three kinds of names extracted from stories.
///
/// The serialized form is the JSON key used for the category in both the
/// enriched story records and the summary file.
///
/// # Examples
///
/// ```
/// use beatbook_core::EntityCategory;
/// use strum::IntoEnumIterator;
///
/// let keys: Vec<_> = EntityCategory::iter().map(|c| c.key()).collect();
/// assert_eq!(keys, ["people", "places", "organizations"]);
/// assert_eq!(format!("{}", EntityCategory::Organizations), "Organizations");
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
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    /// Named individuals
    People,
    /// Geographic locations, addresses, facilities
    Places,
    /// Agencies, institutions, companies
    Organizations,
}

impl EntityCategory {
    /// JSON key for this category.
    pub fn key(&self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Places => "places",
            Self::Organizations => "organizations",
        }
    }
}
