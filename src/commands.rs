//! Command-line parsing and headless output
//!
//! Without arguments the GUI starts; the other commands talk to the backend
//! directly and print to stdout.

use crate::backend::types::SearchResponse;
use crate::ui::reference_card::display_title;

/// Parsed command from process arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the window
    Gui,
    /// Ask a question without the window: search <question...>
    Search { question: String },
    /// Check that the backend answers
    Status,
    Help,
    /// Known command used wrongly
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    /// Parse arguments (without the program name)
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let Some(first) = args.first() else {
            return Command::Gui;
        };

        match first.as_ref().to_lowercase().as_str() {
            "search" | "ask" | "s" => {
                let question = args[1..]
                    .iter()
                    .map(|a| a.as_ref())
                    .collect::<Vec<_>>()
                    .join(" ");
                let question = question.trim();
                if question.is_empty() {
                    Command::Usage("Usage: arxiv-agent search <question>")
                } else {
                    Command::Search {
                        question: question.to_string(),
                    }
                }
            }
            "status" | "health" => Command::Status,
            "help" | "--help" | "-h" => Command::Help,
            _ => Command::Unknown(first.as_ref().to_string()),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"ArXiv Agent - answers research questions from arXiv papers

Usage: arxiv-agent [command]

Commands:
  (none)               Open the window
  search <question>    Ask a question and print the answer with references
  status               Check whether the backend is reachable
  help                 Show this help message

Environment:
  ARXIV_AGENT_BACKEND_URL   Backend base URL (default http://127.0.0.1:8000)
  ARXIV_AGENT_TIMEOUT_SECS  Request timeout in seconds
  RUST_LOG                  Log filter, e.g. arxiv_agent=debug"#
    }
}

/// Plain-text rendering of a search result for the terminal
pub fn render_report(response: &SearchResponse) -> String {
    let mut out = String::new();
    out.push_str("Answer\n======\n");
    out.push_str(response.answer.trim());
    out.push('\n');

    if response.references.is_empty() {
        return out;
    }

    out.push_str("\nReferences\n==========\n");
    for (i, reference) in response.references.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", i + 1, display_title(reference)));
        if !reference.authors.is_empty() {
            out.push_str(&format!("    {}\n", reference.authors));
        }
        if let Some(journal) = reference.journal.as_deref().filter(|j| !j.trim().is_empty()) {
            out.push_str(&format!("    {}\n", journal.trim()));
        }
        if !reference.url.is_empty() {
            out.push_str(&format!("    {}\n", reference.url));
        }
        if !reference.llm_summary.is_empty() {
            out.push_str(&format!("    {}\n", reference.llm_summary.trim()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_no_args_is_gui() {
        let args: [&str; 0] = [];
        assert_eq!(Command::parse(&args), Command::Gui);
    }

    #[test]
    fn test_parse_search_joins_words() {
        match Command::parse(&["search", "what", "limits", "LLMs?"]) {
            Command::Search { question } => assert_eq!(question, "what limits LLMs?"),
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_without_question() {
        assert!(matches!(Command::parse(&["search", "  "]), Command::Usage(_)));
    }

    #[test]
    fn test_parse_status_and_help() {
        assert_eq!(Command::parse(&["STATUS"]), Command::Status);
        assert_eq!(Command::parse(&["--help"]), Command::Help);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Command::parse(&["frobnicate"]),
            Command::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn test_render_report_lists_references() {
        let response: SearchResponse = serde_json::from_value(json!({
            "answer": "Scaling helps (Kaplan, 2020).",
            "references": [{
                "url": "http://arxiv.org/abs/2001.08361v1",
                "title": "Scaling Laws for Neural Language Models",
                "authors": [{"name": "Jared Kaplan"}, {"name": "Sam McCandlish"}],
                "llm_summary": "Loss follows a power law."
            }],
            "arxiv_results": {}
        }))
        .unwrap();

        let report = render_report(&response);
        assert!(report.starts_with("Answer\n======\nScaling helps (Kaplan, 2020).\n"));
        assert!(report.contains("[1] Scaling Laws for Neural Language Models\n"));
        assert!(report.contains("    Jared Kaplan, Sam McCandlish\n"));
        assert!(report.contains("    http://arxiv.org/abs/2001.08361v1\n"));
    }

    #[test]
    fn test_render_report_without_references() {
        let response: SearchResponse =
            serde_json::from_value(json!({"answer": "I cannot answer.", "references": []})).unwrap();
        assert!(!render_report(&response).contains("References"));
    }
}
