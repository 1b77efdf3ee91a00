//! Locating JSON inside free-form tool responses.
//!
//! Tools wrap their JSON in markdown fences, prepend chatter, or trail off
//! with a stray fence. [`extract_json`] walks every plausible candidate and
//! keeps the first one that actually parses, so a broken fence never hides a
//! good object further on.

use beatbook_error::{BeatbookResult, JsonError};
use serde_json::Value;

const FENCE: &str = "```";

/// Find the JSON document in a tool response.
///
/// Candidates are tried in order and the first that parses wins:
/// 1. The whole response, trimmed
/// 2. The body of each markdown code fence (```json ... ``` or ``` ... ```),
///    including an unterminated final fence
/// 3. Each balanced `{ ... }` span, starting from every `{` in turn
///
/// # Errors
///
/// Returns `JsonError` if no candidate parses.
///
/// # Examples
///
/// ```
/// use beatbook_pipeline::extract_json;
///
/// let response = "Here are the entities:\n\
///     \n\
///     ```json\n\
///     {\"people\": [\"Chief Alan Lowrey\"]}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("Alan Lowrey"));
///
/// // A trailing fence with nothing in it does not stop the object being found
/// let json = extract_json("{\"places\": [\"Oxford\"]}\n```").unwrap();
/// assert_eq!(json, "{\"places\": [\"Oxford\"]}");
/// ```
pub fn extract_json(response: &str) -> BeatbookResult<String> {
    let mut candidates = std::iter::once(response.trim())
        .chain(fenced_blocks(response))
        .chain(
            response
                .match_indices('{')
                .filter_map(|(start, _)| balanced_object(&response[start..])),
        );

    if let Some(json) = candidates.find(|candidate| is_json(candidate)) {
        return Ok(json.to_string());
    }

    tracing::debug!(
        response_length = response.len(),
        "No parseable JSON in tool response"
    );
    Err(JsonError::new(format!(
        "No JSON found in response (length: {})",
        response.len()
    ))
    .into())
}

fn is_json(candidate: &str) -> bool {
    !candidate.is_empty() && serde_json::from_str::<Value>(candidate).is_ok()
}

/// Bodies of every code fence, in order.
///
/// An info string directly after the opening fence (`json`, `JSON`, ...) is
/// skipped. A fence that is never closed yields the rest of the response.
fn fenced_blocks(response: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = response;

    while let Some(open) = rest.find(FENCE) {
        let after = &rest[open + FENCE.len()..];
        let body_start = after
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after.len());
        let body = &after[body_start..];

        match body.find(FENCE) {
            Some(close) => {
                blocks.push(body[..close].trim());
                rest = &body[close + FENCE.len()..];
            }
            None => {
                blocks.push(body.trim());
                break;
            }
        }
    }

    blocks
}

/// The `{ ... }` span opening at the start of `text`, if its braces balance.
///
/// Braces inside string literals are ignored.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Deserialize a JSON document into `T`.
///
/// # Errors
///
/// Returns `JsonError` carrying the serde message and a short preview of the
/// input.
///
/// # Examples
///
/// ```
/// use beatbook_pipeline::parse_json;
/// use beatbook_core::EntityLists;
///
/// let lists: EntityLists = parse_json(r#"{"places": ["Trappe, Maryland"]}"#).unwrap();
/// assert_eq!(lists.places().len(), 1);
/// ```
pub fn parse_json<T>(json: &str) -> BeatbookResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json).map_err(|e| {
        let preview: String = json.chars().take(100).collect();
        tracing::debug!(error = %e, preview = %preview, "JSON did not match the expected shape");
        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}
