//! Generation request and result shapes
//!
//! Requests reaching these types have already passed field validation; the
//! adapter treats every field as present and non-empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Structured model output, returned to the caller verbatim
pub type GenerationResult = Map<String, Value>;

/// The structured-output tasks the adapter knows how to prompt for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationVariant {
    Flowchart,
    Image,
    Search,
    Form,
    Summary,
}

impl GenerationVariant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Image => "image",
            Self::Search => "search",
            Self::Form => "form",
            Self::Summary => "summary",
        }
    }

    /// Sampling temperature used for this variant
    ///
    /// Syntactically constrained outputs (search filters) run cooler than
    /// open-ended ones (image direction).
    #[must_use]
    pub const fn temperature(self) -> f32 {
        match self {
            Self::Search => 0.3,
            Self::Flowchart => 0.4,
            Self::Form | Self::Summary => 0.5,
            Self::Image => 0.7,
        }
    }
}

impl fmt::Display for GenerationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowchartRequest {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub data_sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRequest {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub topic: String,
}

/// A validated generation request of any variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Flowchart(FlowchartRequest),
    Image(ImageRequest),
    Search(SearchRequest),
    Form(FormRequest),
    Summary(SummaryRequest),
}

impl GenerationRequest {
    #[must_use]
    pub const fn variant(&self) -> GenerationVariant {
        match self {
            Self::Flowchart(_) => GenerationVariant::Flowchart,
            Self::Image(_) => GenerationVariant::Image,
            Self::Search(_) => GenerationVariant::Search,
            Self::Form(_) => GenerationVariant::Form,
            Self::Summary(_) => GenerationVariant::Summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_variants_run_cooler_than_generative_ones() {
        assert!(GenerationVariant::Search.temperature() < GenerationVariant::Form.temperature());
        assert!(GenerationVariant::Summary.temperature() < GenerationVariant::Image.temperature());
        assert!((GenerationVariant::Search.temperature() - 0.3).abs() < f32::EPSILON);
        assert!((GenerationVariant::Form.temperature() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_search_request_uses_camel_case_data_sources() {
        let request: SearchRequest = serde_json::from_value(serde_json::json!({
            "query": "unpaid invoices",
            "dataSources": ["invoices", "clients"]
        }))
        .unwrap();
        assert_eq!(request.data_sources, vec!["invoices", "clients"]);
    }

    #[test]
    fn test_request_variant() {
        let request = GenerationRequest::Summary(SummaryRequest {
            topic: "quarterly revenue".to_string(),
        });
        assert_eq!(request.variant(), GenerationVariant::Summary);
        assert_eq!(request.variant().to_string(), "summary");
    }
}
