//! Field-presence validation for the generation endpoints

use serde_json::Value;
use thiserror::Error;

use super::core::{extract_required_text, extract_required_text_list};
use crate::models::{FlowchartRequest, FormRequest, ImageRequest, SearchRequest, SummaryRequest};

/// A required field was missing or blank
///
/// The display text is the exact message returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Description is required.")]
    MissingDescription,

    #[error("Prompt is required.")]
    MissingPrompt,

    #[error("Query and dataSources are required.")]
    MissingQueryOrDataSources,

    #[error("Topic is required.")]
    MissingTopic,
}

/// Turns parsed request bodies into validated generation requests
pub struct GenerationValidator;

impl GenerationValidator {
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDescription`] if `description` is absent or blank
    pub fn flowchart(data: &Value) -> Result<FlowchartRequest, ValidationError> {
        let description = extract_required_text(data, "description")
            .ok_or(ValidationError::MissingDescription)?;
        Ok(FlowchartRequest { description })
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::MissingPrompt`] if `prompt` is absent or blank
    pub fn image(data: &Value) -> Result<ImageRequest, ValidationError> {
        let prompt = extract_required_text(data, "prompt").ok_or(ValidationError::MissingPrompt)?;
        Ok(ImageRequest { prompt })
    }

    /// Both `query` and a non-empty `dataSources` list are required
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingQueryOrDataSources`] if either is absent
    pub fn search(data: &Value) -> Result<SearchRequest, ValidationError> {
        let query = extract_required_text(data, "query");
        let data_sources = extract_required_text_list(data, "dataSources");
        match (query, data_sources) {
            (Some(query), Some(data_sources)) => Ok(SearchRequest {
                query,
                data_sources,
            }),
            _ => Err(ValidationError::MissingQueryOrDataSources),
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDescription`] if `description` is absent or blank
    pub fn form(data: &Value) -> Result<FormRequest, ValidationError> {
        let description = extract_required_text(data, "description")
            .ok_or(ValidationError::MissingDescription)?;
        Ok(FormRequest { description })
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::MissingTopic`] if `topic` is absent or blank
    pub fn summary(data: &Value) -> Result<SummaryRequest, ValidationError> {
        let topic = extract_required_text(data, "topic").ok_or(ValidationError::MissingTopic)?;
        Ok(SummaryRequest { topic })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_match_response_bodies() {
        assert_eq!(
            ValidationError::MissingDescription.to_string(),
            "Description is required."
        );
        assert_eq!(ValidationError::MissingPrompt.to_string(), "Prompt is required.");
        assert_eq!(
            ValidationError::MissingQueryOrDataSources.to_string(),
            "Query and dataSources are required."
        );
        assert_eq!(ValidationError::MissingTopic.to_string(), "Topic is required.");
    }

    #[test]
    fn test_flowchart_and_form_need_description() {
        assert_eq!(
            GenerationValidator::flowchart(&json!({})),
            Err(ValidationError::MissingDescription)
        );
        assert_eq!(
            GenerationValidator::form(&json!({ "description": "" })),
            Err(ValidationError::MissingDescription)
        );
        assert_eq!(
            GenerationValidator::flowchart(&json!({ "description": "user signup flow" })),
            Ok(FlowchartRequest {
                description: "user signup flow".to_string()
            })
        );
    }

    #[test]
    fn test_search_requires_both_fields() {
        for body in [
            json!({ "query": "unpaid invoices" }),
            json!({ "query": "unpaid invoices", "dataSources": [] }),
            json!({ "dataSources": ["invoices"] }),
            json!({ "query": "  ", "dataSources": ["invoices"] }),
            json!({ "query": "unpaid invoices", "dataSources": ["invoices", 2024] }),
        ] {
            assert_eq!(
                GenerationValidator::search(&body),
                Err(ValidationError::MissingQueryOrDataSources)
            );
        }

        let request = GenerationValidator::search(
            &json!({ "query": "unpaid invoices", "dataSources": ["invoices", "clients"] }),
        )
        .unwrap();
        assert_eq!(request.data_sources, vec!["invoices", "clients"]);
    }

    #[test]
    fn test_image_and_summary() {
        assert_eq!(
            GenerationValidator::image(&Value::Null),
            Err(ValidationError::MissingPrompt)
        );
        assert_eq!(
            GenerationValidator::summary(&json!({ "topic": 12 })),
            Err(ValidationError::MissingTopic)
        );
        assert!(GenerationValidator::summary(&json!({ "topic": "Q3 revenue" })).is_ok());
    }
}
