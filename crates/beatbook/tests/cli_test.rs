#![cfg(unix)]

// End-to-end runs of the binary with `sh` standing in for the LLM tool.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const STORIES: &str = r#"[
  {"title": "Crash on Route 50", "content": "...", "date": "2024-02-01", "url": "u1"},
  {"title": "Budget hearing", "content": "...", "date": "2024-02-03", "url": "u2"},
  {"title": "Fire in Trappe", "content": "...", "date": "2024-02-05", "url": "u3"}
]"#;

/// Writes a ./beatbook.toml that runs `script` with `sh -c`.
fn configure(dir: &Path, script: &str) -> anyhow::Result<()> {
    let config = format!(
        "[llm]\nprogram = \"sh\"\nargs = [\"-c\", {}]\n",
        toml_string(script)
    );
    std::fs::write(dir.join("beatbook.toml"), config)?;
    Ok(())
}

fn toml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn beatbook(dir: &Path, args: &[&str]) -> anyhow::Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_beatbook"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("LLM_MODEL")
        .env_remove("RUST_LOG")
        .output()?)
}

#[test]
fn test_full_pipeline() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("stories.json"), STORIES)?;
    configure(
        dir.path(),
        r#"cat > /dev/null; echo '{"people": ["Sheriff Joe Gamble"], "places": ["Easton"]}'"#,
    )?;

    let out = beatbook(dir.path(), &["extract", "--input", "stories.json"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let enriched = std::fs::read_to_string(dir.path().join("enriched_stories.json"))?;
    assert_eq!(enriched.matches("Sheriff Joe Gamble").count(), 3);

    let out = beatbook(dir.path(), &["aggregate"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let summary = std::fs::read_to_string(dir.path().join("entity_summary.json"))?;
    let summary: serde_json::Value = serde_json::from_str(&summary)?;
    assert_eq!(summary["total_stories"], 3);
    assert_eq!(summary["people"]["Sheriff Joe Gamble"], 3);
    assert_eq!(summary["places"]["Easton"], 3);

    let out = beatbook(dir.path(), &["generate", "--beat", "public safety"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let book = std::fs::read_to_string(dir.path().join("beatbook.md"))?;
    assert_eq!(
        book,
        "{\"people\": [\"Sheriff Joe Gamble\"], \"places\": [\"Easton\"]}\n"
    );
    Ok(())
}

#[test]
fn test_prompt_only_prints_prompt() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("stories.json"), STORIES)?;
    configure(dir.path(), "exit 9")?;

    let out = beatbook(dir.path(), &["extract", "-i", "stories.json", "--dry-run"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let out = beatbook(dir.path(), &["aggregate"])?;
    assert!(out.status.success());

    let out = beatbook(dir.path(), &["generate", "--prompt-only", "--beat", "Talbot County"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let prompt = String::from_utf8(out.stdout)?;
    assert!(prompt.contains("Talbot County"));
    assert!(prompt.contains("- 3 stories analyzed"));
    assert!(prompt.contains("- Crash on Route 50"));
    assert!(!dir.path().join("beatbook.md").exists());
    Ok(())
}

#[test]
fn test_failed_generation_exits_non_zero_without_artifact() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("stories.json"), STORIES)?;
    configure(dir.path(), "cat > /dev/null; echo 'Error: No key found' >&2; exit 1")?;

    // Extraction tolerates the failing tool
    let out = beatbook(dir.path(), &["extract", "-i", "stories.json"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let out = beatbook(dir.path(), &["aggregate"])?;
    assert!(out.status.success());

    let out = beatbook(dir.path(), &["generate"])?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("No key found"));
    assert!(!dir.path().join("beatbook.md").exists());
    Ok(())
}

#[test]
fn test_classify_topics_reach_summary_and_prompt() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("stories.json"), STORIES)?;
    configure(dir.path(), "cat > /dev/null; echo Judiciary")?;

    let out = beatbook(dir.path(), &["extract", "-i", "stories.json", "--dry-run"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let out = beatbook(dir.path(), &["classify"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let enriched = std::fs::read_to_string(dir.path().join("enriched_stories.json"))?;
    let enriched: serde_json::Value = serde_json::from_str(&enriched)?;
    assert_eq!(enriched[2]["topic"], "Judiciary");
    assert_eq!(enriched[2]["people"], serde_json::json!([]));

    let out = beatbook(dir.path(), &["aggregate"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let summary = std::fs::read_to_string(dir.path().join("entity_summary.json"))?;
    let summary: serde_json::Value = serde_json::from_str(&summary)?;
    assert_eq!(summary["topics"]["Judiciary"], 3);

    let out = beatbook(dir.path(), &["generate", "--prompt-only"])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let prompt = String::from_utf8(out.stdout)?;
    assert!(prompt.contains("- Top topics: Judiciary (3)"));
    assert!(prompt.contains("- Date range: 2024-02-01 to 2024-02-05"));
    Ok(())
}
