//! Console output formatter for triage results

use colored::Colorize;
use triage_application::{HandleMessageOutput, HealthOutput, HistoryOutput, PredictOutput};
use triage_domain::{DomainError, Prediction, Role, SessionInfo};

use crate::api::dto::PredictResponse;

/// Formats triage results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a chat reply, optionally with the symptoms that were recognized
    pub fn format_reply(output: &HandleMessageOutput, show_symptoms: bool) -> String {
        let mut text = String::new();

        if output.is_emergency {
            text.push_str(&format!("{}\n", "!! URGENT !!".red().bold()));
        }
        text.push_str(&format!("{} {}\n", "bot:".green().bold(), output.reply));

        if show_symptoms {
            if !output.symptoms.is_empty() {
                text.push_str(&format!(
                    "{} {}\n",
                    "Recognized:".dimmed(),
                    output.symptoms.join(", ")
                ));
            }
            if !output.unrecognized.is_empty() {
                text.push_str(&format!(
                    "{} {}\n",
                    "Not recognized:".dimmed(),
                    output.unrecognized.join(", ")
                ));
            }
        }

        text
    }

    /// Ranked predictions as an indented list
    pub fn format_predictions(predictions: &[Prediction]) -> String {
        if predictions.is_empty() {
            return format!("  {}\n", "(no matching conditions)".dimmed());
        }

        predictions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                format!(
                    "  {}. {:<28} {:>3}%  {}\n",
                    i + 1,
                    p.disease.bold(),
                    p.percent(),
                    format!("[{}]", p.source.as_str()).dimmed()
                )
            })
            .collect()
    }

    /// Stateless prediction result
    pub fn format_predict(output: &PredictOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Symptom Check"));
        text.push('\n');
        text.push_str(&format!("{} {}\n", "Symptoms:".cyan().bold(), output.symptoms));

        text.push_str(&Self::section_header("Possible conditions"));
        text.push_str(&Self::format_predictions(&output.predictions));

        text.push_str(&Self::section_header("Recommendation"));
        if output.is_emergency {
            text.push_str(&format!("{}\n", output.recommendation.red().bold()));
        } else {
            text.push_str(&format!("{}\n", output.recommendation));
        }

        text.push_str(&Self::footer());
        text
    }

    /// Stateless prediction as JSON
    pub fn format_predict_json(output: &PredictOutput) -> String {
        serde_json::to_string_pretty(&PredictResponse::from(output.clone()))
            .unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_history(history: &HistoryOutput) -> String {
        if history.turns.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }

        let mut text = String::new();
        for turn in &history.turns {
            let speaker = match turn.role {
                Role::User => "you:".cyan().bold(),
                Role::Bot => "bot:".green().bold(),
            };
            text.push_str(&format!(
                "{} {} {}\n",
                turn.timestamp.format("%H:%M:%S").to_string().dimmed(),
                speaker,
                turn.text
            ));
            if let Some(predictions) = &turn.predictions
                && !predictions.is_empty()
            {
                text.push_str(&Self::format_predictions(predictions));
            }
        }
        text
    }

    pub fn format_info(info: &SessionInfo) -> String {
        format!(
            "{} {}\n{} {}\n{} {}\n{} {}\n{} {:.1}\n",
            "Session:".cyan().bold(),
            info.session_id,
            "Created:".cyan().bold(),
            info.created_at.to_rfc3339(),
            "Last activity:".cyan().bold(),
            info.last_activity.to_rfc3339(),
            "Messages:".cyan().bold(),
            info.turn_count,
            "Age (minutes):".cyan().bold(),
            info.age_minutes
        )
    }

    pub fn format_health(health: &HealthOutput) -> String {
        let mut sources = vec!["dataset".to_string()];
        sources.extend(health.secondary_sources.iter().cloned());
        format!(
            "{} {}\n{} {}\n{} {}\n{} {}\n",
            "Diseases:".cyan().bold(),
            health.diseases,
            "Emergency symptoms:".cyan().bold(),
            health.emergency_symptoms,
            "Active sessions:".cyan().bold(),
            health.active_sessions,
            "Sources:".cyan().bold(),
            sources.join(", ")
        )
    }

    pub fn format_error(err: &DomainError) -> String {
        format!("{} {}", "Error:".red().bold(), err)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
