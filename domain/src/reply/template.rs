//! Reply templates for triage responses

use crate::prediction::entities::Prediction;
use crate::symptom::set::SymptomSet;

/// Number of predictions named in a summary reply
pub const SUMMARY_SIZE: usize = 3;

/// Below this top confidence the summary asks for more detail
pub const LOW_CONFIDENCE: f64 = 0.3;
const MODERATE_CONFIDENCE: f64 = 0.5;
const HIGH_CONFIDENCE: f64 = 0.8;

/// Which template a reply was rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    UrgentCare,
    Clarify,
    Summary,
}

/// Templates for every reply the service can produce
pub struct ReplyTemplate;

impl ReplyTemplate {
    /// Greeting returned when a session starts
    pub fn greeting() -> &'static str {
        "Hello! I'm your medical symptom checker. Please describe your symptoms, and I'll try to help. \
Note: This is not a replacement for professional medical advice."
    }

    /// Acknowledgement returned when a session starts
    pub fn session_started() -> &'static str {
        "Chat session started successfully"
    }

    /// Acknowledgement returned when a session ends
    pub fn session_ended() -> &'static str {
        "Chat session ended successfully"
    }

    /// Urgent-care message; always takes precedence over predictions
    pub fn urgent_care() -> &'static str {
        "🚨 EMERGENCY: Your symptoms may indicate a serious condition. \
Please seek immediate medical attention or call emergency services!"
    }

    /// Asked when no known symptom could be matched
    pub fn clarifying_question(symptoms: &SymptomSet) -> String {
        let mut reply = String::from(
            "I couldn't match your description to symptoms I know. \
Could you describe what you are feeling in more detail, for example \"fever, cough, headache\"?",
        );
        if !symptoms.unknown().is_empty() {
            let terms = symptoms
                .unknown()
                .iter()
                .map(|t| format!("\"{}\"", t))
                .collect::<Vec<_>>()
                .join(", ");
            reply.push_str(&format!(" I didn't recognize: {}.", terms));
        }
        reply
    }

    /// Summary of the top predictions.
    ///
    /// `serious` marks the top condition as one that warrants prompt care.
    pub fn prediction_summary(predictions: &[Prediction], serious: bool) -> String {
        let Some(best) = predictions.first() else {
            return Self::clarifying_question(&SymptomSet::new());
        };
        let disease = &best.disease;
        let confidence = best.confidence;

        let mut reply = if confidence >= HIGH_CONFIDENCE {
            format!(
                "Based on your symptoms, this could be {}. \
Please consult a healthcare provider for proper diagnosis and treatment.",
                disease
            )
        } else if confidence >= MODERATE_CONFIDENCE {
            format!(
                "Your symptoms might suggest {}, but I recommend getting a professional medical opinion for accurate diagnosis.",
                disease
            )
        } else if confidence >= LOW_CONFIDENCE {
            format!(
                "Possible condition: {}. However, I'm not very confident about this assessment. \
Please consult a healthcare provider.",
                disease
            )
        } else {
            format!(
                "I need more specific symptoms to provide a better assessment. \
The closest match so far is {}, but the evidence is weak. \
Please describe your symptoms in more detail, or consult a healthcare provider.",
                disease
            )
        };

        if predictions.len() > 1 {
            let others = predictions
                .iter()
                .take(SUMMARY_SIZE)
                .map(|p| format!("{} ({}%)", p.disease, p.percent()))
                .collect::<Vec<_>>()
                .join(", ");
            reply.push_str(&format!(" Top matches: {}.", others));
        }

        if serious {
            reply.push_str(" This condition can become serious, so please seek care promptly.");
        }

        reply
    }

    /// Pick the template for an assessment
    pub fn select(is_emergency: bool, predictions: &[Prediction]) -> ReplyKind {
        if is_emergency {
            ReplyKind::UrgentCare
        } else if predictions.is_empty() {
            ReplyKind::Clarify
        } else {
            ReplyKind::Summary
        }
    }

    /// Render the reply for an assessment
    pub fn compose(
        is_emergency: bool,
        predictions: &[Prediction],
        symptoms: &SymptomSet,
        serious: bool,
    ) -> String {
        match Self::select(is_emergency, predictions) {
            ReplyKind::UrgentCare => Self::urgent_care().to_string(),
            ReplyKind::Clarify => Self::clarifying_question(symptoms),
            ReplyKind::Summary => Self::prediction_summary(predictions, serious),
        }
    }
}
