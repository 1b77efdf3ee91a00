use beatbook_core::{
    EnrichedStory, EntityCategory, EntityCount, EntityLists, EntitySummary, RankedCounts, Story,
    Topic,
};
use serde_json::json;

#[test]
fn test_enriched_story_serializes_flat() -> anyhow::Result<()> {
    let story: Story = serde_json::from_value(json!({
        "title": "Water rescue off Tilghman Island",
        "content": "...",
        "date": "2024-07-04",
        "url": "https://example.com/rescue",
        "byline": "Staff"
    }))?;
    let entities = EntityLists::builder()
        .people(vec!["Capt. Ray Jones".to_string(), "Capt. Ray Jones".to_string()])
        .places(vec!["Tilghman Island".to_string()])
        .build()?;

    let enriched = EnrichedStory::new(story, entities);
    let value = serde_json::to_value(&enriched)?;

    assert_eq!(
        value,
        json!({
            "title": "Water rescue off Tilghman Island",
            "content": "...",
            "date": "2024-07-04",
            "url": "https://example.com/rescue",
            "byline": "Staff",
            "people": ["Capt. Ray Jones", "Capt. Ray Jones"],
            "places": ["Tilghman Island"],
            "organizations": []
        })
    );
    assert_eq!(enriched.names(EntityCategory::People).len(), 2);

    let back: EnrichedStory = serde_json::from_value(value)?;
    assert_eq!(back, enriched);
    Ok(())
}

#[test]
fn test_summary_preserves_key_order() -> anyhow::Result<()> {
    let summary = EntitySummary::new(
        12,
        RankedCounts::from(vec![
            EntityCount::new("Zimmerman", 9),
            EntityCount::new("Abbott", 4),
        ]),
        RankedCounts::default(),
        RankedCounts::from(vec![EntityCount::new("Talbot County Sheriff's Office", 5)]),
    );

    let text = serde_json::to_string_pretty(&summary)?;
    let zimmerman = text.find("Zimmerman").unwrap_or(usize::MAX);
    let abbott = text.find("Abbott").unwrap_or(usize::MAX);
    assert!(zimmerman < abbott, "{text}");

    let back: EntitySummary = serde_json::from_str(&text)?;
    assert_eq!(back, summary);
    assert_eq!(back.people().entries()[0], EntityCount::new("Zimmerman", 9));
    assert_eq!(
        back.ranked(EntityCategory::Organizations).get("Talbot County Sheriff's Office"),
        Some(5)
    );
    Ok(())
}

#[test]
fn test_summary_requires_total() {
    let result = serde_json::from_str::<EntitySummary>(r#"{"people": {"A": 3}}"#);
    assert!(result.is_err());
}

#[test]
fn test_summary_rejects_non_numeric_counts() {
    let result = serde_json::from_str::<EntitySummary>(
        r#"{"total_stories": 1, "people": {"A": "three"}}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_summary_topics_only_written_when_present() -> anyhow::Result<()> {
    let plain = EntitySummary::new(
        1,
        RankedCounts::default(),
        RankedCounts::default(),
        RankedCounts::default(),
    );
    let value = serde_json::to_value(&plain)?;
    assert_eq!(
        value,
        json!({"total_stories": 1, "people": {}, "places": {}, "organizations": {}})
    );

    let classified = plain.with_topics(RankedCounts::from(vec![
        EntityCount::new(Topic::PoliceAndCrime.label(), 4),
        EntityCount::new(Topic::Judiciary.label(), 1),
    ]));
    let text = serde_json::to_string(&classified)?;
    assert!(text.ends_with(r#""topics":{"Police & Crime":4,"Judiciary":1}}"#), "{text}");

    let back: EntitySummary = serde_json::from_str(&text)?;
    assert_eq!(back.topics().get("Police & Crime"), Some(4));
    Ok(())
}
