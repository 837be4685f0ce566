//! REPL (Read-Eval-Print Loop) for interactive triage chat

use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::{debug, info};
use triage_application::ConversationOrchestrator;
use triage_domain::SessionId;

/// What the loop should do after a line has been handled
#[derive(Debug, Clone, PartialEq)]
pub enum ReplAction {
    /// Print the text and keep reading
    Continue(String),
    /// Print the text and exit
    Quit(String),
}

/// Interactive chat REPL
pub struct ChatRepl {
    orchestrator: ConversationOrchestrator,
    config: ReplConfig,
    session: Option<SessionId>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(orchestrator: ConversationOrchestrator) -> Self {
        Self {
            orchestrator,
            config: ReplConfig::default(),
            session: None,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Currently open session, if any
    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.resolved_history_file();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();
        let greeting = self.open_session().await;
        println!("{}\n", greeting);

        loop {
            match rl.readline("you> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match self.execute(line).await {
                        ReplAction::Continue(text) => println!("{}", text),
                        ReplAction::Quit(text) => {
                            println!("{}", text);
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", self.close_session().await);
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Handle one input line: a slash command or a message for the bot
    pub async fn execute(&mut self, line: &str) -> ReplAction {
        if line.starts_with('/') {
            return self.handle_command(line).await;
        }
        ReplAction::Continue(self.send_message(line).await)
    }

    async fn handle_command(&mut self, line: &str) -> ReplAction {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "/quit" | "/exit" | "/q" => ReplAction::Quit(self.close_session().await),
            "/help" | "/h" | "/?" => ReplAction::Continue(Self::help_text()),
            "/new" => {
                let _ = self.close_session().await;
                ReplAction::Continue(self.open_session().await)
            }
            "/end" => ReplAction::Continue(self.close_session().await),
            "/history" => ReplAction::Continue(self.show_history().await),
            "/info" => ReplAction::Continue(self.show_info().await),
            "/health" => {
                let health = self.orchestrator.health().await;
                ReplAction::Continue(ConsoleFormatter::format_health(&health))
            }
            "/predict" => ReplAction::Continue(self.predict(arg)),
            _ => ReplAction::Continue(format!(
                "Unknown command: {}\nType /help for available commands",
                cmd
            )),
        }
    }

    async fn open_session(&mut self) -> String {
        let started = self.orchestrator.start_session().await;
        info!("REPL opened session {}", started.session_id);
        self.session = Some(started.session_id);
        started.greeting
    }

    async fn close_session(&mut self) -> String {
        let Some(id) = self.session.take() else {
            return "Bye!".to_string();
        };
        match self.orchestrator.end_session(&id).await {
            Ok(ended) => ended.message,
            Err(e) => {
                debug!("Session {} already gone: {}", id, e);
                "Bye!".to_string()
            }
        }
    }

    async fn send_message(&mut self, text: &str) -> String {
        let Some(id) = self.session.clone() else {
            return "No open session. Type /new to start one.".to_string();
        };

        match self.orchestrator.handle_message(&id, text).await {
            Ok(output) => ConsoleFormatter::format_reply(&output, self.config.show_symptoms),
            Err(e) if e.is_session_not_found() => {
                self.session = None;
                "Your session has expired. Type /new to start a new one.".to_string()
            }
            Err(e) => ConsoleFormatter::format_error(&e),
        }
    }

    async fn show_history(&self) -> String {
        let Some(id) = &self.session else {
            return "No open session.".to_string();
        };
        match self.orchestrator.history(id).await {
            Ok(history) => ConsoleFormatter::format_history(&history),
            Err(e) => ConsoleFormatter::format_error(&e),
        }
    }

    async fn show_info(&self) -> String {
        let Some(id) = &self.session else {
            return "No open session.".to_string();
        };
        match self.orchestrator.session_info(id).await {
            Ok(info) => ConsoleFormatter::format_info(&info),
            Err(e) => ConsoleFormatter::format_error(&e),
        }
    }

    fn predict(&self, symptoms: &str) -> String {
        match self.orchestrator.predict_standalone(symptoms) {
            Ok(output) => ConsoleFormatter::format_predict(&output),
            Err(e) => ConsoleFormatter::format_error(&e),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Symptom Triage - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("This assistant is not a substitute for professional medical advice.");
        println!("{}", Self::help_text());
    }

    fn help_text() -> String {
        [
            "",
            "Commands:",
            "  /help, /h, /?        - Show this help",
            "  /history             - Show this conversation",
            "  /info                - Show session details",
            "  /predict <symptoms>  - One-off check without the session",
            "  /health              - Show knowledge base status",
            "  /new                 - End this session and start another",
            "  /end                 - End this session",
            "  /quit, /exit, /q     - Exit chat",
            "",
        ]
        .join("\n")
    }
}
