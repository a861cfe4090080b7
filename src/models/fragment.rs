use serde::{Deserialize, Serialize};

/// Recognition confidence reported by the upstream extractor.
/// Used only as a validation hint, never as a gate by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
    #[default]
    Unknown,
}

impl Confidence {
    pub fn cf_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(Self::High),
            "low" => Some(Self::Low),
            "unknown" | "" => Some(Self::Unknown),
            _ => None,
        }
    }

}

/// Document-level context (year/month the sheet covers), used to complete
/// partial dates such as a bare day-of-month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContext {
    pub year: i32,
    pub month: u32,
}

/// One `(label, text)` pair as delivered by a record source.
/// The label identifies the row the fragment came from; the text is the raw
/// recognized cell content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFragment {
    pub label: String,
    pub text: String,
    #[serde(default)]
    pub context: Option<DocumentContext>,
    #[serde(default)]
    pub confidence: Confidence,
}

impl RawFragment {
    pub fn new(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            text: text.to_string(),
            context: None,
            confidence: Confidence::Unknown,
        }
    }

    pub fn with_context(mut self, year: i32, month: u32) -> Self {
        self.context = Some(DocumentContext { year, month });
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    /// Provenance string stored on the entries derived from this fragment.
    pub fn provenance(&self) -> String {
        format!("{}: {}", self.label, self.text)
    }
}
