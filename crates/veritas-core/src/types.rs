use serde::{Deserialize, Serialize};

/// Which output format the analysis model is asked for.
///
/// Only `"party"` selects the JSON scoring format. Every other value of the
/// `mode` form field — the default `"free"` included, as well as strings we
/// have never seen — takes the plain-text path. Unknown modes are not an
/// error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisMode {
    Standard,
    Party,
}

impl AnalysisMode {
    /// Parse the `mode` form field.
    pub fn from_field(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("party") {
            Self::Party
        } else {
            Self::Standard
        }
    }
}

/// The binary classification the show delivers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Truth,
    Deception,
    #[default]
    Unknown,
}

impl Verdict {
    /// Parse a verdict label from model output, case-insensitively.
    /// Anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "TRUTH" => Self::Truth,
            "DECEPTION" => Self::Deception,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Truth => "TRUTH",
            Self::Deception => "DECEPTION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Party-mode scoring criteria, each in `[0.0, 10.0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaScores {
    pub deception: f64,
    pub conviction: f64,
    pub creativity: f64,
    pub detail: f64,
    pub entertainment: f64,
}

impl CriteriaScores {
    pub fn total(&self) -> f64 {
        self.deception + self.conviction + self.creativity + self.detail + self.entertainment
    }
}

/// Normalized analysis output.
///
/// Invariant: `verdict` and `confidence` are always populated — parsing
/// degrades to `Unknown`/50 rather than failing, and `raw_text` always
/// carries the literal model output.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisVerdict {
    pub verdict: Verdict,
    /// Confidence percentage in `[0, 100]`.
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<CriteriaScores>,
    /// Sum of the party-mode scores; 0.0 outside party mode or when absent.
    pub total_score: f64,
    pub breakdown: String,
    pub signals: String,
    pub explanation: String,
    pub tip: String,
    pub raw_text: String,
}

impl Default for AnalysisVerdict {
    fn default() -> Self {
        Self {
            verdict: Verdict::Unknown,
            confidence: 50,
            scores: None,
            total_score: 0.0,
            breakdown: String::new(),
            signals: String::new(),
            explanation: String::new(),
            tip: String::new(),
            raw_text: String::new(),
        }
    }
}

/// Result of transcribing an audio recording.
#[derive(Clone, Debug)]
pub struct TranscriptionResult {
    /// The transcribed text.
    pub text: String,
    /// Duration of the audio in seconds.
    pub duration_seconds: f64,
}
