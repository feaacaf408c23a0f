//! Wire types for the research backend

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /search/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search_term: String,
}

/// Answer plus the papers it was drawn from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub references: Vec<Reference>,
    /// Opaque payload, echoed back on chat requests.
    #[serde(default)]
    pub arxiv_results: Value,
}

/// Body of `POST /chat/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    pub url: String,
    pub parsed_arxiv_results: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub message: String,
}

/// Citation record for a source paper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Authors,
    #[serde(default, deserialize_with = "null_as_default")]
    pub llm_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Author list as the backend sends it.
///
/// Depending on where the paper came from this is either a preformatted
/// string or a list of names (bare or `{ "name": ... }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Authors {
    Text(String),
    List(Vec<Author>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Record { name: String },
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Author::Name(name) | Author::Record { name } => name,
        }
    }
}

impl Default for Authors {
    fn default() -> Self {
        Authors::Text(String::new())
    }
}

impl Authors {
    pub fn is_empty(&self) -> bool {
        match self {
            Authors::Text(text) => text.trim().is_empty(),
            Authors::List(list) => list.iter().all(|a| a.name().trim().is_empty()),
        }
    }
}

impl fmt::Display for Authors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authors::Text(text) => f.write_str(text.trim()),
            Authors::List(list) => {
                let names: Vec<&str> = list
                    .iter()
                    .map(|a| a.name().trim())
                    .filter(|n| !n.is_empty())
                    .collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_ignores_extra_fields() {
        let raw = json!({
            "question": "what limits LLMs?",
            "answer": "Context length (Smith, 2023).",
            "context": "...",
            "contexts": {"2301.00001v1": ["a", "b", "c"]},
            "references": [{
                "url": "http://arxiv.org/abs/2301.00001v1",
                "title": "Long Context",
                "authors": "Smith, J.",
                "llm_summary": "Discusses context windows.",
                "journal": "arXiv"
            }],
            "arxiv_results": {"http://arxiv.org/abs/2301.00001v1": {"key": "Smith, 2023"}}
        });

        let parsed: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.answer, "Context length (Smith, 2023).");
        assert_eq!(parsed.references.len(), 1);
        assert_eq!(parsed.references[0].journal.as_deref(), Some("arXiv"));
        assert_eq!(
            parsed.arxiv_results["http://arxiv.org/abs/2301.00001v1"]["key"],
            "Smith, 2023"
        );
    }

    #[test]
    fn test_reference_missing_fields_default() {
        let parsed: Reference =
            serde_json::from_value(json!({"url": "http://arxiv.org/abs/1"})).unwrap();
        assert_eq!(parsed.url, "http://arxiv.org/abs/1");
        assert!(parsed.title.is_empty());
        assert!(parsed.authors.is_empty());
        assert!(parsed.journal.is_none());
    }

    #[test]
    fn test_null_reference_fields_keep_the_rest_of_the_response() {
        let raw = json!({
            "answer": "Both papers agree.",
            "references": [
                {
                    "url": "http://arxiv.org/abs/1",
                    "title": "First",
                    "authors": "A. Author",
                    "llm_summary": "One."
                },
                {
                    "url": "http://arxiv.org/abs/2",
                    "title": null,
                    "authors": null,
                    "llm_summary": null,
                    "journal": null
                }
            ],
            "arxiv_results": {}
        });

        let parsed: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.answer, "Both papers agree.");
        assert_eq!(parsed.references.len(), 2);
        assert_eq!(parsed.references[0].authors.to_string(), "A. Author");

        let second = &parsed.references[1];
        assert_eq!(second.url, "http://arxiv.org/abs/2");
        assert!(second.title.is_empty());
        assert!(second.authors.is_empty());
        assert!(second.llm_summary.is_empty());
        assert!(second.journal.is_none());
    }

    #[test]
    fn test_null_url_and_references() {
        let reference: Reference =
            serde_json::from_value(json!({"url": null, "title": "Untitled source"})).unwrap();
        assert!(reference.url.is_empty());
        assert_eq!(reference.title, "Untitled source");

        let parsed: SearchResponse =
            serde_json::from_value(json!({"answer": "No papers.", "references": null})).unwrap();
        assert!(parsed.references.is_empty());
    }

    #[test]
    fn test_authors_display_variants() {
        let text: Authors = serde_json::from_value(json!("Ada Lovelace, Alan Turing")).unwrap();
        assert_eq!(text.to_string(), "Ada Lovelace, Alan Turing");

        let names: Authors = serde_json::from_value(json!(["Ada Lovelace", "Alan Turing"])).unwrap();
        assert_eq!(names.to_string(), "Ada Lovelace, Alan Turing");

        let records: Authors =
            serde_json::from_value(json!([{"name": "Ada Lovelace"}, {"name": " "}, {"name": "Alan Turing"}]))
                .unwrap();
        assert_eq!(records.to_string(), "Ada Lovelace, Alan Turing");
    }

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            question: "What dataset?".into(),
            url: "http://arxiv.org/abs/1".into(),
            parsed_arxiv_results: json!({"http://arxiv.org/abs/1": {"summary": "s"}}),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "question": "What dataset?",
                "url": "http://arxiv.org/abs/1",
                "parsed_arxiv_results": {"http://arxiv.org/abs/1": {"summary": "s"}}
            })
        );
    }
}
