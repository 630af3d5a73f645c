//! Bot configuration: instant FAQs, nudge texts and conversation knobs.
//!
//! Loaded once at startup from a JSON file and shared read-only afterwards.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ContextorError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_LEAD_NUDGE_THRESHOLD: u32 = 2;
pub const DEFAULT_MEMORY_WINDOW: usize = 10;
pub const DEFAULT_CONTACT_NUDGE: &str = "Feel free to call us or visit our office!";
pub const DEFAULT_LEAD_NUDGE: &str = "I notice you have several questions. Would you like to share your contact details so our team can provide personalized assistance?";

/// One instant-answer entry. Keywords are stored lower-cased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaqEntry {
    pub category: String,
    pub keywords: Vec<String>,
    pub answer: String,
    pub source: String,
}

/// Nudge texts. `None` or an empty string means "no nudge".
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Nudges {
    pub application_ready: Option<String>,
    pub document_help: Option<String>,
    pub contact: Option<String>,
    pub lead_capture: Option<String>,
}

impl Default for Nudges {
    fn default() -> Self {
        Self {
            application_ready: None,
            document_help: None,
            contact: Some(DEFAULT_CONTACT_NUDGE.to_string()),
            lead_capture: Some(DEFAULT_LEAD_NUDGE.to_string()),
        }
    }
}

impl Nudges {
    /// Nudge attached to an instant FAQ answer of the given category.
    pub fn for_category(&self, category: &str) -> Option<&str> {
        let text = match category {
            "eligibility" => self.application_ready.as_deref(),
            "documents_required" => self.document_help.as_deref(),
            "contact" => self.contact.as_deref(),
            _ => None,
        };
        non_empty(text)
    }

    /// Nudge attached once per session when the question counter hits the threshold.
    pub fn lead(&self) -> Option<&str> {
        non_empty(self.lead_capture.as_deref())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|t| !t.trim().is_empty())
}

/// Immutable bot configuration passed into the assistant at construction.
#[derive(Clone, Debug)]
pub struct BotConfig {
    /// FAQ entries in file order; matching is first-hit in this order.
    pub faqs: Vec<FaqEntry>,
    pub nudges: Nudges,
    /// Question number (1-based, per session) that receives the lead nudge.
    pub lead_nudge_threshold: u32,
    /// Question/answer exchanges kept in each session's memory.
    pub memory_window: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            faqs: Vec::new(),
            nudges: Nudges::default(),
            lead_nudge_threshold: DEFAULT_LEAD_NUDGE_THRESHOLD,
            memory_window: DEFAULT_MEMORY_WINDOW,
        }
    }
}

#[derive(Deserialize)]
struct RawBotConfig {
    #[serde(default)]
    quick_faqs: Map<String, Value>,
    #[serde(default)]
    nudges: Nudges,
    lead_nudge_threshold: Option<u32>,
    memory_window: Option<usize>,
}

#[derive(Deserialize)]
struct RawFaq {
    #[serde(default)]
    keywords: Vec<String>,
    answer: String,
    #[serde(default)]
    source: String,
}

impl BotConfig {
    /// Reads `BOT_CONFIG_PATH` (default `config.json`) and loads it.
    pub fn from_env() -> Result<Self, ContextorError> {
        let path = std::env::var("BOT_CONFIG_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load(Path::new(&path))
    }

    /// Loads the configuration from a JSON file.
    ///
    /// # Errors
    /// [`ContextorError::Config`] if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, ContextorError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ContextorError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let cfg = Self::parse(&raw, path)?;
        info!(
            path = ?path,
            faqs = cfg.faqs.len(),
            threshold = cfg.lead_nudge_threshold,
            window = cfg.memory_window,
            "bot config loaded"
        );
        Ok(cfg)
    }

    /// Parses configuration JSON; `origin` is only used in error messages.
    pub fn parse(json: &str, origin: &Path) -> Result<Self, ContextorError> {
        let err = |reason: String| ContextorError::Config {
            path: PathBuf::from(origin),
            reason,
        };

        let raw: RawBotConfig = serde_json::from_str(json).map_err(|e| err(e.to_string()))?;

        let mut faqs = Vec::with_capacity(raw.quick_faqs.len());
        for (category, value) in raw.quick_faqs {
            let faq: RawFaq = serde_json::from_value(value)
                .map_err(|e| err(format!("quick_faqs.{category}: {e}")))?;
            let keywords: Vec<String> = faq
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            debug!(%category, keywords = keywords.len(), "faq entry");
            faqs.push(FaqEntry {
                category,
                keywords,
                answer: faq.answer,
                source: faq.source,
            });
        }

        let memory_window = raw.memory_window.unwrap_or(DEFAULT_MEMORY_WINDOW);
        if memory_window == 0 {
            return Err(err("memory_window must be > 0".into()));
        }

        Ok(Self {
            faqs,
            nudges: raw.nudges,
            lead_nudge_threshold: raw
                .lead_nudge_threshold
                .unwrap_or(DEFAULT_LEAD_NUDGE_THRESHOLD),
            memory_window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "quick_faqs": {
            "processing_fee": {"keywords": ["Processing Fee", "fee"], "answer": "1%", "source": "Pricing Sheet"},
            "eligibility": {"keywords": ["eligible"], "answer": "Age 21-60", "source": "Policy"},
            "contact": {"keywords": ["phone"], "answer": "Call 123", "source": "Office"}
        },
        "nudges": {"application_ready": "Ready to apply?", "document_help": ""},
        "lead_nudge_threshold": 3
    }"#;

    #[test]
    fn keeps_file_order_and_lowercases_keywords() {
        let cfg = BotConfig::parse(SAMPLE, Path::new("inline")).unwrap();
        let cats: Vec<&str> = cfg.faqs.iter().map(|f| f.category.as_str()).collect();
        assert_eq!(cats, vec!["processing_fee", "eligibility", "contact"]);
        assert_eq!(cfg.faqs[0].keywords, vec!["processing fee", "fee"]);
        assert_eq!(cfg.lead_nudge_threshold, 3);
        assert_eq!(cfg.memory_window, DEFAULT_MEMORY_WINDOW);
    }

    #[test]
    fn category_nudges_and_defaults() {
        let cfg = BotConfig::parse(SAMPLE, Path::new("inline")).unwrap();
        assert_eq!(cfg.nudges.for_category("eligibility"), Some("Ready to apply?"));
        assert_eq!(cfg.nudges.for_category("documents_required"), None);
        assert_eq!(cfg.nudges.for_category("contact"), Some(DEFAULT_CONTACT_NUDGE));
        assert_eq!(cfg.nudges.for_category("processing_fee"), None);
        assert_eq!(cfg.nudges.lead(), Some(DEFAULT_LEAD_NUDGE));
    }

    #[test]
    fn empty_object_is_a_valid_config() {
        let cfg = BotConfig::parse("{}", Path::new("inline")).unwrap();
        assert!(cfg.faqs.is_empty());
        assert_eq!(cfg.lead_nudge_threshold, DEFAULT_LEAD_NUDGE_THRESHOLD);
    }

    #[test]
    fn missing_file_and_bad_entries_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = BotConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ContextorError::Config { .. }));

        let bad = r#"{"quick_faqs": {"x": {"keywords": ["a"]}}}"#;
        let err = BotConfig::parse(bad, Path::new("inline")).unwrap_err();
        assert!(err.to_string().contains("quick_faqs.x"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(BotConfig::load(&path).unwrap().faqs.len(), 3);
    }
}
