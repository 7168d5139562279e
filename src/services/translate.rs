use anyhow::{Context, Result};
use std::time::Duration;

/// Sentinel meaning "translation disabled".
pub const NO_TRANSLATION: &str = "none";

/// Target languages offered by the `langs` subcommand and the translate
/// picker. Codes are what the gtx endpoint expects.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("hi", "Hindi"),
    ("mr", "Marathi"),
    ("bn", "Bengali"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("de", "German"),
    ("fr", "French"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("sv", "Swedish"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("es", "Spanish"),
    ("ar", "Arabic"),
];

const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

pub struct TranslateClient {
    http: reqwest::blocking::Client,
}

impl TranslateClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }

    /// Translate `text` into `target`, returning `None` when translation is
    /// disabled or the service response carries no usable chunk.
    pub fn translate(&self, text: &str, target: &str) -> Result<Option<String>> {
        if target.is_empty() || target == NO_TRANSLATION {
            return Ok(None);
        }

        let response = self
            .http
            .get(TRANSLATE_ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .context("Failed to reach translation service")?;

        if !response.status().is_success() {
            anyhow::bail!("Translation service returned HTTP {}", response.status());
        }

        let body: serde_json::Value = response
            .json()
            .context("Failed to parse translation response")?;
        Ok(extract_translation(&body))
    }
}

// The gtx payload nests the translated sentence at [0][0][0].
fn extract_translation(body: &serde_json::Value) -> Option<String> {
    body.get(0)?
        .get(0)?
        .get(0)?
        .as_str()
        .map(|s| s.to_string())
}

/// Whether `code` is a known translation target (or the disabled sentinel).
pub fn is_known_language(code: &str) -> bool {
    code == NO_TRANSLATION || LANGUAGES.iter().any(|(c, _)| *c == code)
}
