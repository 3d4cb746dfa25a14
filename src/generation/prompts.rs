//! Prompt construction per generation variant
//!
//! Each prompt embeds the caller's fields verbatim and spells out the exact
//! JSON shape expected back, since the adapter returns the parsed output
//! without further schema checks.

use crate::models::{FlowchartRequest, FormRequest, ImageRequest, SearchRequest, SummaryRequest};

/// Separator used when listing data sources inside a prompt
pub const DATA_SOURCE_DELIMITER: &str = ", ";

const JSON_ONLY: &str =
    "Respond with a single JSON object only. Do not wrap it in markdown or add commentary.";

#[must_use]
pub fn flowchart_prompt(request: &FlowchartRequest) -> String {
    format!(
        r#"You are an expert business process analyst. Design a flowchart for the process described below.

Process description: {description}

{JSON_ONLY}
The object must have this shape:
{{
  "title": string,
  "nodes": [{{ "id": string, "label": string, "type": "start" | "process" | "decision" | "end" }}],
  "edges": [{{ "from": string, "to": string, "label": string (optional) }}]
}}
Every edge must reference node ids that exist in "nodes"."#,
        description = request.description,
    )
}

#[must_use]
pub fn image_prompt(request: &ImageRequest) -> String {
    format!(
        r#"You are an art director preparing an illustration brief for a business application.

Image request: {prompt}

{JSON_ONLY}
The object must have this shape:
{{
  "title": string,
  "renderPrompt": string,
  "altText": string,
  "style": string,
  "aspectRatio": "1:1" | "4:3" | "16:9" | "9:16"
}}"#,
        prompt = request.prompt,
    )
}

#[must_use]
pub fn search_prompt(request: &SearchRequest) -> String {
    format!(
        r#"You translate natural-language questions into structured search filters over business records.

Question: {query}
Available data sources: {sources}

{JSON_ONLY}
The object must have this shape:
{{
  "conditions": [{{ "field": string, "operator": "=" | "!=" | ">" | "<" | ">=" | "<=" | "contains", "value": string | number | boolean }}],
  "logic": "AND" | "OR"
}}
Only use fields that plausibly exist in the listed data sources."#,
        query = request.query,
        sources = request.data_sources.join(DATA_SOURCE_DELIMITER),
    )
}

#[must_use]
pub fn form_prompt(request: &FormRequest) -> String {
    format!(
        r#"You are a form designer for business software. Create a form schema for the purpose described below.

Form purpose: {description}

{JSON_ONLY}
The object must have this shape:
{{
  "title": string,
  "description": string,
  "fields": [{{
    "name": string,
    "label": string,
    "type": "text" | "email" | "number" | "date" | "select" | "checkbox" | "textarea",
    "required": boolean,
    "options": [string] (only for "select")
  }}]
}}"#,
        description = request.description,
    )
}

#[must_use]
pub fn summary_prompt(request: &SummaryRequest) -> String {
    format!(
        r#"You write concise executive summaries for a business productivity suite.

Topic: {topic}

{JSON_ONLY}
The object must have this shape:
{{
  "title": string,
  "summary": string,
  "keyPoints": [string]
}}"#,
        topic = request.topic,
    )
}
