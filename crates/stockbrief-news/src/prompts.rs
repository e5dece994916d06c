//! Prompt text for the summarization calls.

use crate::types::NewsItem;

pub(crate) const SYSTEM_PROMPT: &str = "You are a financial news analyst. \
Provide clear, concise, and objective analysis of stock-related news.";

/// Format one article as a prompt block: title, best-effort metadata, body.
fn item_block(item: &NewsItem) -> String {
    let mut block = format!("Title: {}", item.title);
    if let Some(publisher) = &item.publisher {
        block.push_str(&format!("\nPublisher: {publisher}"));
    }
    block.push_str(&format!(
        "\nPublished: {}",
        item.published_at.format("%Y-%m-%d %H:%M UTC")
    ));
    block.push_str(&format!("\nContent: {}", item.content));
    block
}

/// Stage-one prompt: structured extraction for a single article.
pub(crate) fn item_analysis_prompt(item: &NewsItem) -> String {
    format!(
        "Analyze the following news article and extract:\n\
         1. Key company events\n\
         2. Market impact\n\
         3. Product developments\n\n\
         {}\n\n\
         Analysis:",
        item_block(item)
    )
}

/// Stage-two prompt: one objective paragraph over the collected analyses.
pub(crate) fn rollup_prompt(analyses: &str) -> String {
    format!(
        "Based on the following news analyses, provide a single objective \
         paragraph summarizing the overall situation for the company:\n\n\
         {analyses}\n\n\
         Summary:"
    )
}

/// Single-stage prompt: all articles in one instructional block.
pub(crate) fn single_stage_prompt(items: &[NewsItem]) -> String {
    let content = items
        .iter()
        .map(item_block)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Please provide a concise summary of the following stock-related \
         news:\n\n{content}\n\nSummary:"
    )
}
