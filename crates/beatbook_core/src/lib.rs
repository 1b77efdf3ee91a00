//! Core data types for the Beatbook pipeline.
//!
//! These are the records handed between stages through files on disk:
//! stories in, enriched stories between extraction and aggregation, and
//! the ranked entity summary between aggregation and generation. Stories may
//! also carry a [`Topic`] assigned by classification.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod enriched;
mod request;
mod story;
mod summary;
mod topic;

pub use category::EntityCategory;
pub use enriched::{EnrichedStory, EntityLists, EntityListsBuilder};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use story::{Story, StoryBuilder};
pub use summary::{EntityCount, EntitySummary, RankedCounts};
pub use topic::Topic;
