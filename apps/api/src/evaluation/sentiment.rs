//! Answer sentiment — polarity in [-1, 1] plus a coarse label.
//!
//! `LexiconSentiment` is the built-in analyzer: word polarities averaged over the
//! sentiment-bearing words of the text, with negators flipping and damping the
//! next sentiment word and intensifiers scaling it.

use serde::{Deserialize, Serialize};

/// Polarity strictly above this is positive, strictly below its negation is negative.
pub const SENTIMENT_THRESHOLD: f64 = 0.3;

/// Negation flips and damps the following sentiment word.
const NEGATION_FACTOR: f64 = -0.5;

/// How many neutral tokens a pending negator/intensifier survives.
const MODIFIER_WINDOW: usize = 3;

pub trait SentimentScorer: Send + Sync {
    /// Analyzer output for non-blank text. May fall outside [-1, 1].
    fn raw_polarity(&self, text: &str) -> f64;

    /// Blank text is neutral by definition and never reaches the analyzer.
    fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let p = self.raw_polarity(text);
        if p.is_finite() {
            p.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > SENTIMENT_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -SENTIMENT_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub polarity: f64,
    pub label: SentimentLabel,
}

pub fn read_sentiment(scorer: &dyn SentimentScorer, text: &str) -> SentimentReading {
    let polarity = scorer.polarity(text);
    SentimentReading {
        polarity,
        label: SentimentLabel::from_polarity(polarity),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LexiconSentiment
// ────────────────────────────────────────────────────────────────────────────

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("clean", 0.37),
    ("comfortable", 0.4),
    ("confident", 0.5),
    ("easy", 0.43),
    ("effective", 0.6),
    ("efficient", 0.5),
    ("elegant", 0.5),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fantastic", 0.4),
    ("favorite", 0.5),
    ("fun", 0.3),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("improved", 0.4),
    ("interesting", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("powerful", 0.3),
    ("proud", 0.8),
    ("reliable", 0.4),
    ("robust", 0.4),
    ("smooth", 0.4),
    ("solid", 0.3),
    ("strong", 0.43),
    ("success", 0.3),
    ("successful", 0.75),
    ("successfully", 0.75),
    ("wonderful", 1.0),
    // negative
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("buggy", -0.5),
    ("complicated", -0.4),
    ("confused", -0.4),
    ("confusing", -0.4),
    ("difficult", -0.5),
    ("disappointing", -0.6),
    ("error-prone", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.3),
    ("frustrated", -0.7),
    ("frustrating", -0.7),
    ("hard", -0.29),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("messy", -0.4),
    ("painful", -0.7),
    ("poor", -0.4),
    ("problematic", -0.5),
    ("sad", -0.5),
    ("slow", -0.3),
    ("struggle", -0.4),
    ("struggled", -0.4),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("unfortunately", -0.5),
    ("unreliable", -0.5),
    ("unsure", -0.3),
    ("useless", -0.5),
    ("weak", -0.375),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("slightly", 0.5),
    ("so", 1.2),
    ("somewhat", 0.7),
    ("very", 1.3),
];

const NEGATORS: &[&str] = &["not", "no", "never", "cannot", "without", "hardly", "nor"];

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    fn word_polarity(word: &str) -> Option<f64> {
        LEXICON.iter().find(|(w, _)| *w == word).map(|(_, p)| *p)
    }

    fn intensity(word: &str) -> Option<f64> {
        INTENSIFIERS.iter().find(|(w, _)| *w == word).map(|(_, i)| *i)
    }

    fn is_negator(word: &str) -> bool {
        NEGATORS.contains(&word) || word.ends_with("n't")
    }
}

impl SentimentScorer for LexiconSentiment {
    fn raw_polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        let tokens = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
            .map(|t| t.trim_matches(|c| c == '\'' || c == '-'))
            .filter(|t| !t.is_empty());

        let mut scores = Vec::new();
        let mut negated = false;
        let mut intensity = 1.0;
        let mut since_modifier = 0;

        for token in tokens {
            if Self::is_negator(token) {
                negated = true;
                since_modifier = 0;
                continue;
            }
            if let Some(i) = Self::intensity(token) {
                intensity *= i;
                since_modifier = 0;
                continue;
            }
            match Self::word_polarity(token) {
                Some(p) => {
                    let mut value = p * intensity;
                    if negated {
                        value *= NEGATION_FACTOR;
                    }
                    scores.push(value);
                    negated = false;
                    intensity = 1.0;
                }
                None => {
                    since_modifier += 1;
                    if since_modifier > MODIFIER_WINDOW {
                        negated = false;
                        intensity = 1.0;
                    }
                }
            }
        }

        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        }
    }
}
