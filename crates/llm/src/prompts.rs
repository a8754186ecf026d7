//! Prompt templates for voicemail summarization

/// System instruction sent with every summary request
pub const SYSTEM_PROMPT: &str = r#"You are a professional voicemail summarizer. Your task is to create a concise, well-structured summary of voicemail content while preserving all critical information such as:
- Caller's name and contact information
- Urgent matters or deadlines
- Action items or requests
- Important dates, times, or numbers
- Business-related details

Format your response as a clear, organized summary with key points highlighted."#;

/// User message wrapping the transcript
pub fn user_prompt(transcript: &str) -> String {
    format!(
        "Please summarize this voicemail transcript while keeping all critical information:\n\n{}",
        transcript
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_transcript() {
        let prompt = user_prompt("Hi, this is Dana, call 555-0100.");
        assert!(prompt.starts_with("Please summarize this voicemail transcript"));
        assert!(prompt.ends_with("\n\nHi, this is Dana, call 555-0100."));
    }

    #[test]
    fn test_system_prompt_names_critical_fields() {
        for needle in ["contact information", "deadlines", "Action items", "dates, times", "Business"] {
            assert!(SYSTEM_PROMPT.contains(needle), "missing {needle}");
        }
    }
}
