use std::sync::Arc;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::llm::CompletionBackend;
use engine::keywords::{merge_keywords, parse_suggestions, statistical_keywords};

const KEYWORD_MAX_TOKENS: u32 = 100;
const KEYWORD_TEMPERATURE: f32 = 0.5;

/// Derives search keywords from a free-text description
pub struct KeywordExtractor {
    llm: Arc<dyn CompletionBackend>,
    max_keywords: usize,
}

impl KeywordExtractor {
    pub fn new(llm: Arc<dyn CompletionBackend>, max_keywords: usize) -> Self {
        KeywordExtractor { llm, max_keywords }
    }

    /// AI suggestions first, then statistical tokens. A failed AI call only
    /// matters when the statistical pass finds nothing either.
    pub async fn extract(&self, text: &str) -> Result<Vec<String>, PipelineError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let prompt = format!(
            "Extract the most important keywords from this text for video content creation: {}",
            text
        );
        let suggested = match self
            .llm
            .complete(&prompt, KEYWORD_MAX_TOKENS, KEYWORD_TEMPERATURE)
            .await
        {
            Ok(reply) => Ok(parse_suggestions(&reply)),
            Err(e) => {
                warn!("[Keywords] AI suggestion failed, using statistical tokens only: {:#}", e);
                Err(e)
            }
        };

        let statistical = statistical_keywords(text);
        let suggested = match suggested {
            Ok(s) => s,
            Err(e) if statistical.is_empty() => {
                return Err(PipelineError::Extraction(format!(
                    "AI suggestion failed ({}) and the text has no usable tokens",
                    e
                )));
            }
            Err(_) => Vec::new(),
        };

        let keywords = merge_keywords(suggested, statistical, self.max_keywords);
        info!("[Keywords] Extracted {} keywords: {:?}", keywords.len(), keywords);
        Ok(keywords)
    }
}
