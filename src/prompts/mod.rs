//! Prompts for script generation
//!
//! Builds the system and user messages sent to the provider for a
//! `(topic, language)` request.

/// Builds the system prompt for the given output language
///
/// # Examples
///
/// ```
/// use clipscribe::prompts::build_system_prompt;
///
/// let prompt = build_system_prompt("Indonesian");
/// assert!(prompt.contains("ONLY in Indonesian"));
/// ```
pub fn build_system_prompt(language: &str) -> String {
    format!(
        "You are a creative short-form video creator who specializes in subtle, authentic \
content frameworks. You create content that doesn't feel like marketing or hard-selling. \
You must write ONLY in {language}, no mixing of languages."
    )
}

/// Builds the user prompt asking for a script on `topic`
///
/// # Examples
///
/// ```
/// use clipscribe::prompts::build_user_prompt;
///
/// let prompt = build_user_prompt("home coffee", "English");
/// assert!(prompt.contains("home coffee"));
/// assert!(prompt.contains("GENTLE INVITATION"));
/// ```
pub fn build_user_prompt(topic: &str, language: &str) -> String {
    format!(
        r#"Create a subtle, authentic framework and script for a short vertical video (<60s) on the topic: {topic}. Write EXCLUSIVELY in {language} - do not mix languages or use any words from other languages.

The output should feel natural and not overly promotional. Include:

1. CONTENT APPROACH: A thoughtful, authentic way to present the topic that feels relatable
2. NARRATIVE FLOW: How the video naturally progresses
3. TALKING POINTS: Key ideas to mention in a conversational way
4. VISUALS: Subtle visual elements that enhance without overwhelming
5. AUTHENTIC HOOKS: Natural ways to capture interest
6. GENTLE INVITATION: A soft call-to-action that feels like a genuine suggestion

Focus on authenticity and subtlety rather than hard-selling or overly structured marketing approaches. The content should feel like a natural conversation or storytelling."#
    )
}
