use std::sync::Arc;
use tracing::warn;

use crate::llm::CompletionBackend;

const SCRIPT_MAX_TOKENS: u32 = 250;
const SCRIPT_TEMPERATURE: f32 = 0.7;

pub struct ScriptGenerator {
    llm: Arc<dyn CompletionBackend>,
}

impl ScriptGenerator {
    pub fn new(llm: Arc<dyn CompletionBackend>) -> Self {
        ScriptGenerator { llm }
    }

    /// Short narration for the video. Never fails: the description itself is
    /// the narration whenever the AI backend errors or returns nothing.
    pub async fn generate(&self, description: &str) -> String {
        let prompt = format!(
            "Create a short, engaging narration script for a video about: {}. \
             The script should be concise and suitable for a 1-2 minute video.",
            description
        );

        match self.llm.complete(&prompt, SCRIPT_MAX_TOKENS, SCRIPT_TEMPERATURE).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => {
                warn!("[Script] AI returned an empty narration, using description");
                description.to_string()
            }
            Err(e) => {
                warn!("[Script] Narration generation failed, using description: {:#}", e);
                description.to_string()
            }
        }
    }
}
