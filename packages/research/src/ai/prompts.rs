//! Prompt text for the planner and the summarizer.

/// System prompt for query planning.
pub const PLANNER_SYSTEM: &str = "You are a research assistant that plans web searches.

Given a research topic, propose 3 to 5 distinct web search queries that together cover it.
Order them from most to least important. Prefer specific phrasing over generic keywords.

Also explain in a few sentences how the queries split up the topic.
Respond with JSON containing `queries` (array of strings) and `thought` (string).";

/// System prompt for article summarization.
pub const SUMMARIZER_SYSTEM: &str = "You are a research summarization assistant.

Write a clear, accurate summary of the article from its title and content:
- Keep only the most important and informative points that match the title.
- Use bullet points for facts, arguments, or steps; otherwise a short paragraph of 3-5 sentences.
- No introductions such as \"In summary\" or \"This article talks about\".
- Neutral, plain language a non-expert can follow. Summarize only what the content says.
- Aim for roughly 10-20% of the original length.

Respond with JSON containing `summary` (string).";

/// User message for planning.
pub fn planner_user(topic: &str) -> String {
    format!("Research topic: {}", topic.trim())
}

/// User message for summarization.
pub fn summarizer_user(title: &str, body: &str) -> String {
    format!("Title: {}\n\nContent:\n\"\"\"\n{}\n\"\"\"", title, body)
}
