//! Structured analysis extracted from model output
//!
//! Models frequently wrap the requested JSON in prose or code fences, so
//! parsing is deliberately tolerant of surrounding text while staying
//! strict about the fields themselves.

use serde::{Deserialize, Deserializer};

use reviewpulse_types::Sentiment;

use super::client::GroqError;

/// The four enrichment fields derived from one review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewAnalysis {
    /// Sentiment classification
    pub sentiment: Sentiment,
    /// One-sentence summary
    pub summary: String,
    /// Reply text for the end user
    pub response: String,
    /// Concrete follow-up items
    pub action_items: Vec<String>,
}

#[derive(Deserialize)]
struct RawAnalysis {
    sentiment: String,
    summary: String,
    response: String,
    #[serde(default, deserialize_with = "string_or_list")]
    action_items: Vec<String>,
}

/// Accept `action_items` as either a JSON array or a single newline- or
/// bullet-separated string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    let items = match StringOrList::deserialize(deserializer)? {
        StringOrList::Many(items) => items,
        StringOrList::One(text) => text.lines().map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().trim_start_matches(['-', '*']).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

impl ReviewAnalysis {
    /// Parse the model's reply text.
    ///
    /// The first JSON object found in the text is decoded; a reply
    /// without a decodable object, or with a sentiment outside the known
    /// labels, fails the whole analysis.
    pub fn from_model_output(text: &str) -> Result<Self, GroqError> {
        let json = extract_json_object(text)
            .ok_or_else(|| GroqError::MalformedOutput("no JSON object in reply".to_string()))?;

        let raw: RawAnalysis = serde_json::from_str(json)
            .map_err(|e| GroqError::MalformedOutput(e.to_string()))?;

        let sentiment = Sentiment::parse(&raw.sentiment).ok_or_else(|| {
            GroqError::MalformedOutput(format!("unknown sentiment label: {}", raw.sentiment))
        })?;

        Ok(Self {
            sentiment,
            summary: raw.summary.trim().to_string(),
            response: raw.response.trim().to_string(),
            action_items: raw.action_items,
        })
    }
}

/// Slice out the outermost `{...}` span of the text, if any
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
