//! Frequency aggregation stage.

use crate::{load_enriched, write_json};
use beatbook_core::{EnrichedStory, EntityCategory, EntityCount, EntitySummary, RankedCounts};
use beatbook_error::BeatbookResult;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Minimum mention count for a name to appear in the summary.
pub const MENTION_THRESHOLD: usize = 3;

/// Count mentions per category and keep names with at least `threshold`.
///
/// Every occurrence counts, including repeats within one story. Names are
/// compared exactly as stored. Each category is ordered by count descending,
/// then by name ascending.
///
/// Classified stories are also counted per topic. Topics are ranked the same
/// way but are not subject to the threshold.
///
/// # Examples
///
/// ```
/// use beatbook_core::{EnrichedStory, EntityLists, Story};
/// use beatbook_pipeline::{aggregate, MENTION_THRESHOLD};
///
/// let story = |people: &[&str]| {
///     let lists = EntityLists::builder()
///         .people(people.iter().map(|p| p.to_string()).collect::<Vec<_>>())
///         .build()
///         .unwrap();
///     EnrichedStory::new(Story::default(), lists)
/// };
///
/// let summary = aggregate(&[story(&["A", "B"]), story(&["A", "B", "A"])], MENTION_THRESHOLD);
/// assert_eq!(*summary.total_stories(), 2);
/// assert_eq!(summary.people().get("A"), Some(3));
/// assert_eq!(summary.people().get("B"), None);
/// ```
pub fn aggregate(stories: &[EnrichedStory], threshold: usize) -> EntitySummary {
    EntitySummary::new(
        stories.len(),
        rank_names(stories, EntityCategory::People, threshold),
        rank_names(stories, EntityCategory::Places, threshold),
        rank_names(stories, EntityCategory::Organizations, threshold),
    )
    .with_topics(rank_topics(stories))
}

fn rank_names(
    stories: &[EnrichedStory],
    category: EntityCategory,
    threshold: usize,
) -> RankedCounts {
    let names = stories
        .iter()
        .flat_map(|story| story.names(category))
        .map(String::as_str);
    let ranked = rank(names, threshold);
    debug!(%category, kept = ranked.len(), "Ranked names");
    ranked
}

fn rank_topics(stories: &[EnrichedStory]) -> RankedCounts {
    let topics = stories
        .iter()
        .filter_map(|story| *story.topic())
        .map(|topic| topic.label());
    let ranked = rank(topics, 1);
    debug!(topics = ranked.len(), "Ranked topics");
    ranked
}

/// Tally `names`, keep counts of at least `threshold` and order them by
/// count descending, then name ascending.
fn rank<'a>(names: impl Iterator<Item = &'a str>, threshold: usize) -> RankedCounts {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }

    let mut entries: Vec<EntityCount> = counts
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(name, count)| EntityCount::new(name, count))
        .collect();
    entries.sort_by(|a, b| b.count().cmp(a.count()).then_with(|| a.name().cmp(b.name())));
    RankedCounts::from(entries)
}

/// Read enriched records from `input`, aggregate them and write the
/// summary to `output`.
///
/// # Errors
///
/// Returns an error if either file cannot be read or written.
#[instrument(
    skip_all,
    fields(input = %input.display(), output = %output.display(), threshold = threshold)
)]
pub async fn aggregate_file(
    input: &Path,
    output: &Path,
    threshold: usize,
) -> BeatbookResult<EntitySummary> {
    let stories = load_enriched(input).await?;
    let summary = aggregate(&stories, threshold);
    write_json(output, &summary).await?;

    info!(
        stories = summary.total_stories(),
        people = summary.people().len(),
        places = summary.places().len(),
        organizations = summary.organizations().len(),
        topics = summary.topics().len(),
        "Wrote entity summary"
    );
    Ok(summary)
}
