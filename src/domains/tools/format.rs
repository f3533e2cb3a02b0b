//! Human-readable rendering of Tavily responses.

use crate::domains::tavily::types::TavilyResponse;

/// Render a response as the single text block returned to the caller.
///
/// When an answer is present it leads, followed by a source list; the
/// detailed section always follows. Empty strings count as absent, both for
/// the answer and for raw content.
pub fn format_response(response: &TavilyResponse) -> String {
    let mut output: Vec<String> = Vec::new();

    if let Some(answer) = response.answer.as_deref().filter(|a| !a.is_empty()) {
        output.push(format!("Answer: {}", answer));
        output.push("\nSources:".to_string());
        for result in &response.results {
            output.push(format!("- {}: {}", result.title, result.url));
        }
        output.push(String::new());
    }

    output.push("Detailed Results:".to_string());
    for result in &response.results {
        output.push(format!("\nTitle: {}", result.title));
        output.push(format!("URL: {}", result.url));
        output.push(format!("Content: {}", result.content));
        if let Some(raw) = result.raw_content.as_deref().filter(|r| !r.is_empty()) {
            output.push(format!("Raw Content: {}", raw));
        }
    }

    output.join("\n")
}
