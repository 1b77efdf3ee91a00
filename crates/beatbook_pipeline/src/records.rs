//! Reading and writing the files that connect pipeline stages.

use beatbook_core::{EnrichedStory, EntitySummary, Story};
use beatbook_error::{
    BeatbookError, BeatbookResult, InputFormatError, IoError, IoErrorKind, JsonError,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, instrument};

/// Keys under which newsroom exports nest their story arrays.
const WRAPPER_KEYS: [&str; 2] = ["stories", "articles"];

/// Load raw stories.
///
/// Accepts a top-level array, or an object holding the array under
/// `stories` or `articles`.
///
/// # Errors
///
/// `IoError` if the file cannot be read, `JsonError` if it is not valid JSON
/// or a record is malformed, `InputFormatError` for any other shape.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_stories(path: &Path) -> BeatbookResult<Vec<Story>> {
    let value: Value = read_json(path).await?;
    let stories = stories_from_value(value)?;
    debug!(stories = stories.len(), "Loaded stories");
    Ok(stories)
}

/// Extract the story array from a parsed input document.
///
/// # Errors
///
/// `InputFormatError` if the document holds no story array, `JsonError` if
/// a record is not a JSON object.
///
/// # Examples
///
/// ```
/// use beatbook_pipeline::stories_from_value;
/// use serde_json::json;
///
/// let stories = stories_from_value(json!({"articles": [{"title": "Budget vote"}]})).unwrap();
/// assert_eq!(stories[0].title(), "Budget vote");
///
/// assert!(stories_from_value(json!({"title": "not a collection"})).is_err());
/// ```
pub fn stories_from_value(value: Value) -> BeatbookResult<Vec<Story>> {
    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut map) => {
            let key = WRAPPER_KEYS
                .iter()
                .find(|key| matches!(map.get(**key), Some(Value::Array(_))))
                .ok_or_else(|| {
                    InputFormatError::new(format!(
                        "expected a story array or an object with a {} array",
                        WRAPPER_KEYS.join(" or ")
                    ))
                })?;
            debug!(key, "Reading stories from wrapper object");
            match map.remove(*key) {
                Some(Value::Array(records)) => records,
                _ => Vec::new(),
            }
        }
        other => {
            return Err(InputFormatError::new(format!(
                "expected a story array, found {}",
                json_type(&other)
            ))
            .into());
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<Story>(record).map_err(|e| {
                BeatbookError::from(JsonError::new(format!("story {}: {}", index, e)))
            })
        })
        .collect()
}

/// Load the enriched record set written by the extractor.
///
/// # Errors
///
/// `IoError` if the file cannot be read, `JsonError` if it is not an array
/// of enriched records.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_enriched(path: &Path) -> BeatbookResult<Vec<EnrichedStory>> {
    let records: Vec<EnrichedStory> = read_json(path).await?;
    debug!(stories = records.len(), "Loaded enriched stories");
    Ok(records)
}

/// Load the ranked summary written by the aggregator.
///
/// # Errors
///
/// `IoError` if the file cannot be read, `JsonError` if it is not a summary.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_summary(path: &Path) -> BeatbookResult<EntitySummary> {
    read_json(path).await
}

/// Write a value as pretty-printed JSON, replacing the file atomically.
///
/// # Errors
///
/// `JsonError` if serialization fails, `IoError` if the file cannot be written.
pub async fn write_json<T>(path: &Path, value: &T) -> BeatbookResult<()>
where
    T: Serialize + ?Sized,
{
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(format!("Failed to serialize {}: {}", path.display(), e)))?;
    text.push('\n');
    write_text_atomic(path, &text).await
}

/// Write text to `path` through a temporary file in the same directory.
///
/// Readers see either the previous file or the complete new one. Parent
/// directories are created as needed.
///
/// # Errors
///
/// `IoError` if the directory, temporary file or rename fails. The
/// temporary file is removed on failure.
#[instrument(skip_all, fields(path = %path.display(), bytes = text.len()))]
pub async fn write_text_atomic(path: &Path, text: &str) -> BeatbookResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            IoError::new(IoErrorKind::CreateDir(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            IoError::new(IoErrorKind::Write(format!(
                "{}: not a file path",
                path.display()
            )))
        })?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    if let Err(e) = tokio::fs::write(&temp_path, text).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(IoError::new(IoErrorKind::Write(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
        .into());
    }

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(IoError::new(IoErrorKind::Rename(format!(
            "{} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
        .into());
    }

    debug!("Wrote file");
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> BeatbookResult<T> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        IoError::new(IoErrorKind::Read(format!("{}: {}", path.display(), e)))
    })?;
    serde_json::from_slice(&data)
        .map_err(|e| JsonError::new(format!("{}: {}", path.display(), e)).into())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
