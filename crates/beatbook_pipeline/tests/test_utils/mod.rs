//! Test utilities for pipeline tests.
//!
//! Provides a scripted text generator and story fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use beatbook_core::{EnrichedStory, EntityLists, GenerateRequest, GenerateResponse, Story};
use beatbook_error::{BeatbookError, BeatbookResult, GenerationError, GenerationErrorKind};
use beatbook_interface::TextGenerator;
use std::sync::{Arc, Mutex};

/// A single scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(GenerationErrorKind),
}

/// Text generator that replays a fixed sequence of responses.
///
/// Calls past the end of the sequence fail with a spawn error.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    responses: Vec<MockResponse>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockGenerator {
    /// Replays `responses` in order.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Succeeds with each text in order.
    pub fn new_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new_sequence(
            texts
                .into_iter()
                .map(|text| MockResponse::Success(text.into()))
                .collect(),
        )
    }

    /// Always fails with `error`.
    pub fn new_error(error: GenerationErrorKind) -> Self {
        Self::new_sequence(vec![MockResponse::Error(error)])
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, req: &GenerateRequest) -> BeatbookResult<GenerateResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(req.clone());
            requests.len() - 1
        };

        match self.responses.get(index) {
            Some(MockResponse::Success(text)) => Ok(GenerateResponse::new(text.clone())),
            Some(MockResponse::Error(kind)) => {
                Err(BeatbookError::from(GenerationError::new(kind.clone())))
            }
            None => Err(BeatbookError::from(GenerationError::new(
                GenerationErrorKind::Spawn {
                    program: "mock".to_string(),
                    message: format!(
                        "Mock sequence exhausted (call {} beyond {} responses)",
                        index + 1,
                        self.responses.len()
                    ),
                },
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> Option<&str> {
        None
    }
}

/// A story with the given title and content.
pub fn story(title: &str, content: &str) -> Story {
    Story::builder()
        .title(title)
        .content(content)
        .date("2024-03-09")
        .url(format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")))
        .build()
        .expect("valid story")
}

/// An enriched story naming only people.
pub fn with_people(title: &str, people: &[&str]) -> EnrichedStory {
    let lists = EntityLists::builder()
        .people(people.iter().map(|p| p.to_string()).collect::<Vec<_>>())
        .build()
        .expect("valid entity lists");
    EnrichedStory::new(story(title, ""), lists)
}
