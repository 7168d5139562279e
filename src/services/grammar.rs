use crate::{Config, Match};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::time::Duration;

/// Client for a LanguageTool-compatible `/v2/check` endpoint.
pub struct GrammarClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    language: String,
    max_suggestions: usize,
}

// Every field is optional: the service contract only promises a JSON object
// per match, and a match we cannot anchor is dropped, not an error.
#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    message: Option<String>,
    offset: Option<usize>,
    length: Option<usize>,
    #[serde(default)]
    replacements: Vec<RawReplacement>,
    rule: Option<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawReplacement {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    id: Option<String>,
}

impl GrammarClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: config.grammar_endpoint.clone(),
            language: config.language.clone(),
            max_suggestions: config.max_suggestions,
        })
    }

    /// Check `text` and return the usable matches, in service order.
    pub fn check(&self, text: &str) -> Result<Vec<Match>> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Checking grammar...");

        let response = self
            .http
            .post(&self.endpoint)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .context("Failed to reach grammar service")?;

        if !response.status().is_success() {
            pb.finish_and_clear();
            anyhow::bail!("Grammar service returned HTTP {}", response.status());
        }

        let body: CheckResponse = response
            .json()
            .context("Failed to parse grammar service response")?;
        pb.finish_and_clear();

        Ok(self.convert(body.matches))
    }

    fn convert(&self, raw: Vec<RawMatch>) -> Vec<Match> {
        raw.into_iter()
            .filter_map(|m| {
                // a match without both anchors has no span to annotate
                let offset = m.offset?;
                let length = m.length?;
                let mut replacements: Vec<String> = m
                    .replacements
                    .into_iter()
                    .filter_map(|r| r.value)
                    .collect();
                replacements.truncate(self.max_suggestions);

                Some(Match {
                    offset,
                    length,
                    message: m.message.unwrap_or_default(),
                    replacements,
                    rule: m.rule.and_then(|r| r.id),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GrammarClient {
        GrammarClient::new(&Config::default()).unwrap()
    }

    fn parse(json: &str) -> CheckResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_full_match() {
        let body = parse(
            r#"{"matches":[{"message":"Possible typo","offset":0,"length":4,
                "replacements":[{"value":"Hello"},{"value":"Help"}],
                "rule":{"id":"MORFOLOGIK_RULE"}}]}"#,
        );
        let matches = client().convert(body.matches);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].offset, 0);
        assert_eq!(matches[0].length, 4);
        assert_eq!(matches[0].replacements, vec!["Hello", "Help"]);
        assert_eq!(matches[0].rule.as_deref(), Some("MORFOLOGIK_RULE"));
    }

    #[test]
    fn match_without_offset_is_dropped() {
        let body = parse(r#"{"matches":[{"message":"m","length":4}]}"#);
        assert!(client().convert(body.matches).is_empty());
    }

    #[test]
    fn match_without_length_is_dropped() {
        let body = parse(r#"{"matches":[{"message":"m","offset":2}]}"#);
        assert!(client().convert(body.matches).is_empty());
    }

    #[test]
    fn missing_fields_default_cleanly() {
        let body = parse(r#"{"matches":[{"offset":1,"length":2}]}"#);
        let matches = client().convert(body.matches);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].message, "");
        assert!(matches[0].replacements.is_empty());
        assert!(matches[0].rule.is_none());
    }

    #[test]
    fn empty_body_yields_no_matches() {
        let body = parse(r#"{}"#);
        assert!(client().convert(body.matches).is_empty());
    }

    #[test]
    fn replacements_are_capped_at_max_suggestions() {
        let values: Vec<String> = (0..10).map(|i| format!(r#"{{"value":"s{}"}}"#, i)).collect();
        let json = format!(
            r#"{{"matches":[{{"offset":0,"length":1,"replacements":[{}]}}]}}"#,
            values.join(",")
        );
        let matches = client().convert(parse(&json).matches);
        assert_eq!(matches[0].replacements.len(), Config::default().max_suggestions);
    }
}
