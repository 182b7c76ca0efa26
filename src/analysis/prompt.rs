use strum::IntoEnumIterator;

use super::models::{ResultSet, RiskBand};
use crate::utils::safe_truncate;


pub const SYSTEM_PROMPT: &str =
    "You are a fraud detection expert providing objective analysis based on available evidence.";


pub fn negative_query_text(name: &str) -> String {
    format!("{name} scam fraud controversy reviews complaints")
}


pub fn positive_query_text(name: &str) -> String {
    format!("{name} legitimate business verified credentials")
}

/// One `[Source i]` block per result in merged order, bodies cut to `snippet_chars` characters.
pub fn build_content_summary(results: &ResultSet, snippet_chars: usize) -> String {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let title = result.title.as_deref().unwrap_or_default();
            let text = result
                .text
                .as_deref()
                .map(|t| safe_truncate(t, snippet_chars))
                .unwrap_or_default();
            format!("[Source {}]: {}\n{}", index + 1, title, text)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}


fn scoring_guidelines() -> String {
    RiskBand::iter()
        .map(|band| {
            let (low, high) = band.range();
            format!("- {low}-{high}: {}", band.guidance())
        })
        .collect::<Vec<_>>()
        .join("\n")
}


pub fn build_analysis_prompt(name: &str, content_summary: &str) -> String {
    let guidelines = scoring_guidelines();

    format!(
        r#"You are an expert fraud analyst. Analyze the following information about "{name}" and provide a scammer probability assessment.

Information gathered:
{content_summary}

Provide your analysis in the following JSON format:
{{
  "scammerScore": <number between 0-100>,
  "summary": "<2-3 sentence overview>",
  "reasons": ["<reason 1>", "<reason 2>", "<reason 3>", "<reason 4>"]
}}

Scoring guidelines:
{guidelines}

Be objective and base your score on the evidence found. Include both positive and negative findings in your reasoning."#
    )
}
