//! Prompt text sent to the external tool.

use beatbook_core::{EntityCategory, EntitySummary, RankedCounts, Topic};
use chrono::NaiveDate;
use strum::IntoEnumIterator;

/// Topics listed in the dataset section of the beat book prompt.
pub const TOP_TOPICS: usize = 5;

const BEATBOOK_INSTRUCTIONS: &str = "INSTRUCTIONS:
1. Open with a short, friendly introduction to the beat.
2. Describe the main themes of the coverage, leaning on the topic counts when given.
3. Add a \"Who's Who\" section built from the key people above.
4. Add an \"Organizations to Know\" section and a section on key places.
5. Use only the information given here. Do not invent names, facts or figures.

BEAT BOOK:
";

/// Prompt asking for the entities in one story.
///
/// The response is expected to be a JSON object with `people`, `places` and
/// `organizations` string arrays.
pub fn extraction_prompt(title: &str, content: &str) -> String {
    format!(
        r#"Extract the named entities from the news story below.

Return ONLY a JSON object with exactly these keys:
{{"people": [...], "places": [...], "organizations": [...]}}

- people: named individuals, with title or role when the story gives one
  (e.g. "Chief John Smith, Easton Police Department")
- places: towns, counties, roads and facilities (e.g. "Easton, Maryland")
- organizations: agencies, departments, courts, companies and groups, using
  full official names when possible

Use an empty array for a category with no entries. Do not add commentary.

TITLE: {title}

CONTENT:
{content}
"#
    )
}

/// Prompt asking which single [`Topic`] a story belongs to.
///
/// The expected answer is one topic label and nothing else.
pub fn classification_prompt(title: &str, content: &str) -> String {
    let labels: Vec<&str> = Topic::iter().map(Topic::label).collect();
    format!(
        "File the news story below under exactly ONE of these topics:\n\
         {topics}\n\
         \n\
         Pick the topic the story is mainly about.\n\
         Reply with the topic name only, with no explanation or punctuation.\n\
         \n\
         TITLE: {title}\n\
         \n\
         CONTENT:\n\
         {content}\n",
        topics = labels.join(", "),
    )
}

/// Everything the beat book prompt is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct BeatbookPromptParts<'a> {
    /// Coverage area
    pub beat: &'a str,
    /// Ranked entity tables and topic counts
    pub summary: &'a EntitySummary,
    /// Sample headlines, in file order
    pub headlines: &'a [&'a str],
    /// Earliest and latest parseable story date
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

/// Prompt asking for the beat book itself.
pub fn beatbook_prompt(parts: &BeatbookPromptParts<'_>) -> String {
    let mut sections = vec![
        format!(
            "You are helping a reporter who is new to {}. Write a practical beat book \
             in markdown that introduces the coverage area, the people and organizations \
             that appear most often, and the places where news happens.\n",
            parts.beat
        ),
        dataset_section(parts),
    ];

    sections.extend(
        EntityCategory::iter()
            .map(|category| entity_section(category, parts.summary.ranked(category))),
    );

    if !parts.headlines.is_empty() {
        let lines: String = parts
            .headlines
            .iter()
            .map(|headline| format!("- {}\n", headline))
            .collect();
        sections.push(format!("SAMPLE HEADLINES:\n{}", lines));
    }

    sections.push(BEATBOOK_INSTRUCTIONS.to_string());
    sections.join("\n")
}

fn dataset_section(parts: &BeatbookPromptParts<'_>) -> String {
    let mut lines = vec![format!(
        "- {} stories analyzed",
        parts.summary.total_stories()
    )];

    if let Some((first, last)) = parts.date_range {
        lines.push(format!("- Date range: {} to {}", first, last));
    }

    let topics = parts.summary.topics();
    if !topics.is_empty() {
        let top: Vec<String> = topics
            .iter()
            .take(TOP_TOPICS)
            .map(ToString::to_string)
            .collect();
        lines.push(format!("- Top topics: {}", top.join(", ")));
    }

    format!("DATASET:\n{}\n", lines.join("\n"))
}

fn entity_section(category: EntityCategory, ranked: &RankedCounts) -> String {
    let lines: String = if ranked.is_empty() {
        "- (none above the mention threshold)\n".to_string()
    } else {
        ranked
            .iter()
            .map(|entry| format!("- {} ({} mentions)\n", entry.name(), entry.count()))
            .collect()
    };
    format!("{}:\n{}", heading(category), lines)
}

fn heading(category: EntityCategory) -> &'static str {
    match category {
        EntityCategory::People => "KEY PEOPLE (most frequently mentioned)",
        EntityCategory::Places => "KEY PLACES",
        EntityCategory::Organizations => "KEY ORGANIZATIONS",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatbook_core::EntityCount;

    #[test]
    fn test_extraction_prompt_embeds_story() {
        let prompt = extraction_prompt("Barn fire in Cordova", "Firefighters responded...");
        assert!(prompt.contains("TITLE: Barn fire in Cordova"));
        assert!(prompt.contains("Firefighters responded..."));
        assert!(prompt.contains(r#"{"people": [...], "places": [...], "organizations": [...]}"#));
    }

    #[test]
    fn test_classification_prompt_lists_every_topic() {
        let prompt = classification_prompt("School board votes", "The board met...");
        for topic in Topic::iter() {
            assert!(prompt.contains(topic.label()), "{topic}");
        }
        assert!(prompt.contains("Police & Crime, Local government"));
        assert!(prompt.contains("TITLE: School board votes"));
        assert!(prompt.ends_with("CONTENT:\nThe board met...\n"));
    }

    #[test]
    fn test_beatbook_prompt_sections() {
        let summary = EntitySummary::new(
            42,
            RankedCounts::from(vec![EntityCount::new("Sheriff Joe Gamble", 9)]),
            RankedCounts::default(),
            RankedCounts::from(vec![EntityCount::new("Easton Police Department", 12)]),
        );
        let headlines = ["Crash on Route 50", "Arrest in Oxford"];
        let prompt = beatbook_prompt(&BeatbookPromptParts {
            beat: "public safety in Talbot County",
            summary: &summary,
            headlines: &headlines,
            date_range: NaiveDate::from_ymd_opt(2024, 1, 2)
                .zip(NaiveDate::from_ymd_opt(2024, 6, 30)),
        });

        assert!(prompt.contains("new to public safety in Talbot County"));
        assert!(prompt.contains("DATASET:\n- 42 stories analyzed\n- Date range: 2024-01-02 to 2024-06-30\n\n"));
        assert!(prompt.contains("- Sheriff Joe Gamble (9 mentions)"));
        assert!(prompt.contains("KEY PLACES:\n- (none above the mention threshold)\n\nKEY ORGANIZATIONS"));
        assert!(prompt.contains("- Easton Police Department (12 mentions)"));
        assert!(prompt.contains("SAMPLE HEADLINES:\n- Crash on Route 50\n- Arrest in Oxford\n\n"));
        assert!(prompt.contains("Do not invent"));
        assert!(prompt.ends_with("BEAT BOOK:\n"));
        assert!(!prompt.contains("Top topics"));
    }

    #[test]
    fn test_beatbook_prompt_lists_top_topics() {
        let topics: Vec<EntityCount> = [
            ("Police & Crime", 9),
            ("Judiciary", 6),
            ("Public Safety", 5),
            ("Education", 2),
            ("Health", 1),
            ("Sports", 1),
        ]
        .into_iter()
        .map(|(name, count)| EntityCount::new(name, count))
        .collect();
        let summary = EntitySummary::default().with_topics(RankedCounts::from(topics));

        let prompt = beatbook_prompt(&BeatbookPromptParts {
            beat: "this beat",
            summary: &summary,
            headlines: &[],
            date_range: None,
        });

        assert!(prompt.contains(
            "- Top topics: Police & Crime (9), Judiciary (6), Public Safety (5), Education (2), Health (1)\n"
        ));
        assert!(!prompt.contains("Sports (1)"));
    }

    #[test]
    fn test_beatbook_prompt_without_dates_or_headlines() {
        let summary = EntitySummary::default();
        let prompt = beatbook_prompt(&BeatbookPromptParts {
            beat: "this beat",
            summary: &summary,
            headlines: &[],
            date_range: None,
        });
        assert!(!prompt.contains("Date range"));
        assert!(!prompt.contains("SAMPLE HEADLINES"));
        assert!(prompt.contains("- 0 stories analyzed"));
    }
}
