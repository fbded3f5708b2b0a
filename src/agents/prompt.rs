//! Prompt template for mind map generation.

pub const MIND_MAP_PROMPT: &str = r#"You are an expert at creating hierarchical mind maps from educational content. Your task is to analyze the given text and create a clear, well-structured mind map in JSON format.

Instructions:
1. Identify the main topic/concept from the text
2. Break down the content into major subtopics
3. For each subtopic, identify key points and supporting details
4. Organize the information in a hierarchical structure
5. Ensure the structure is balanced and logical
6. Keep node names concise but descriptive
7. Include important relationships between concepts

The response MUST be a valid JSON object with exactly this structure:
{
    "root": "Main Topic",
    "branches": [
        {
            "name": "Subtopic 1",
            "branches": [
                {"name": "Key Point 1.1"},
                {"name": "Key Point 1.2"}
            ]
        }
    ]
}

Text to analyze:
"#;

/// Template, a newline, then the document text verbatim.
///
/// Callers reject blank text before building a prompt.
pub fn build_prompt(text: &str) -> String {
    let mut prompt = String::with_capacity(MIND_MAP_PROMPT.len() + 1 + text.len());
    prompt.push_str(MIND_MAP_PROMPT);
    prompt.push('\n');
    prompt.push_str(text);
    prompt
}
