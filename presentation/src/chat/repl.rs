//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use colored::Colorize;
use pdraft_application::{
    GenerateDocumentUseCase, GenerateError, GenerateInput, GenerationProgress, HistoryService,
    SessionManager, SessionNotifier, SettingsService,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// Interactive chat REPL
///
/// One command per line. A document request is written as
/// `title :: description`; everything starting with `/` is a command.
pub struct ChatRepl {
    sessions: SessionManager,
    settings: SettingsService,
    history: HistoryService,
    generator: GenerateDocumentUseCase,
    notifier: Arc<dyn SessionNotifier>,
    show_progress: bool,
    /// Entry ids from the last `/history` listing, for `/delete <n>`.
    last_listing: Vec<String>,
}

impl ChatRepl {
    pub fn new(
        sessions: SessionManager,
        settings: SettingsService,
        history: HistoryService,
        generator: GenerateDocumentUseCase,
        notifier: Arc<dyn SessionNotifier>,
    ) -> Self {
        Self {
            sessions,
            settings,
            history,
            generator,
            notifier,
            show_progress: true,
            last_listing: Vec::new(),
        }
    }

    /// Set whether to show progress spinners
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Where readline input history is persisted between sessions.
    fn history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("pdraft").join("history.txt"))
    }

    /// Run the interactive REPL until `/quit` or EOF.
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load input history
        let history_path = Self::history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(&line, &mut rl).await? {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(&line);

                    self.process_request(&line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save input history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            pdraft - Chat Mode               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Write a request as: title :: description");
        println!();
        println!("Commands:");
        println!("  /login [email]   - Sign in to your account");
        println!("  /signup [email]  - Create an account");
        println!("  /guest           - Continue without an account");
        println!("  /help            - Show all commands");
        println!("  /quit            - Exit");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    async fn handle_command(&mut self, line: &str, rl: &mut DefaultEditor) -> RlResult<bool> {
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return Ok(true);
            }
            "/help" | "/h" | "/?" => self.print_help(),
            "/login" => self.login(rest, rl).await?,
            "/signup" => self.signup(rest, rl).await?,
            "/guest" => {
                self.sessions.enter_as_guest();
                self.last_listing.clear();
            }
            "/logout" => {
                self.sessions.sign_out();
                self.last_listing.clear();
            }
            "/balance" => match self.sessions.context() {
                Some(ctx) => println!("{}", ConsoleFormatter::format_balance(ctx.session().credits())),
                None => println!("{}", "Not signed in.".dimmed()),
            },
            "/transcript" => match self.sessions.context() {
                Some(ctx) => println!("{}", ConsoleFormatter::format_transcript(ctx.transcript())),
                None => println!("{}", "Not signed in.".dimmed()),
            },
            "/clear" => {
                if let Some(ctx) = self.sessions.context_mut() {
                    ctx.clear_transcript();
                    println!("{}", "Transcript cleared.".dimmed());
                } else {
                    println!("{}", "Not signed in.".dimmed());
                }
            }
            "/settings" => self.settings_command(rest).await,
            "/history" => self.list_history().await,
            "/delete" => self.delete_entry(rest).await,
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }

        Ok(false)
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /login [email]            - Sign in to your account");
        println!("  /signup [email]           - Create an account");
        println!("  /guest                    - Continue without an account");
        println!("  /logout                   - Sign out and clear the transcript");
        println!("  /balance                  - Show the credit balance");
        println!("  /transcript               - Show the conversation so far");
        println!("  /clear                    - Clear the conversation");
        println!("  /settings                 - Show generation settings");
        println!("  /settings set <key> <v>   - Change a setting");
        println!("  /settings reset           - Restore default settings");
        println!("  /history                  - List your documents");
        println!("  /delete <n>               - Delete document n from the last listing");
        println!("  /quit, /exit, /q          - Exit chat");
        println!();
        println!("Anything else is a document request: title :: description");
        println!();
    }

    async fn login(&mut self, arg: &str, rl: &mut DefaultEditor) -> RlResult<()> {
        let Some(email) = read_or_prompt(arg, rl, "Email: ")? else {
            return Ok(());
        };
        let Some(password) = prompt_line(rl, "Password: ")? else {
            return Ok(());
        };

        if let Err(e) = self.sessions.sign_in(&email, &password).await {
            eprintln!("{} {}", "Sign-in failed:".red(), e);
        }
        self.last_listing.clear();
        Ok(())
    }

    async fn signup(&mut self, arg: &str, rl: &mut DefaultEditor) -> RlResult<()> {
        let Some(email) = read_or_prompt(arg, rl, "Email: ")? else {
            return Ok(());
        };
        let Some(password) = prompt_line(rl, "Password: ")? else {
            return Ok(());
        };
        let Some(confirm) = prompt_line(rl, "Confirm password: ")? else {
            return Ok(());
        };

        if let Err(e) = self.sessions.sign_up(&email, &password, &confirm).await {
            eprintln!("{} {}", "Sign-up failed:".red(), e);
        }
        self.last_listing.clear();
        Ok(())
    }

    async fn settings_command(&mut self, rest: &str) {
        let current = self.settings.load(self.sessions.context()).await;

        if rest.is_empty() {
            print!("{}", ConsoleFormatter::format_settings(&current));
            return;
        }

        if rest == "reset" {
            let defaults = self.settings.reset();
            match self.settings.save(&defaults, self.sessions.context()).await {
                Ok(()) => print!("{}", ConsoleFormatter::format_settings(&defaults)),
                Err(e) => eprintln!("{} {}", "Could not save settings:".red(), e),
            }
            return;
        }

        let Some((key, value)) = rest
            .strip_prefix("set")
            .map(str::trim)
            .and_then(|kv| kv.split_once(char::is_whitespace))
        else {
            println!("Usage: /settings [set <key> <value> | reset]");
            return;
        };
        let value = value.trim();

        let mut updated = current;
        match key {
            "font-style" => updated.font_style = value.to_string(),
            "font-size" => updated.font_size = value.to_string(),
            "language" => updated.language = value.to_string(),
            "document-type" => updated.document_type = value.to_string(),
            "max-tokens" => match value.parse() {
                Ok(n) => updated.max_tokens = n,
                Err(_) => {
                    println!("max-tokens must be a number, got '{}'", value);
                    return;
                }
            },
            _ => {
                println!(
                    "Unknown setting '{}'. Keys: font-style, font-size, language, document-type, max-tokens",
                    key
                );
                return;
            }
        }

        match self.settings.save(&updated, self.sessions.context()).await {
            Ok(()) => print!("{}", ConsoleFormatter::format_settings(&updated)),
            Err(e) => eprintln!("{} {}", "Could not save settings:".red(), e),
        }
    }

    async fn list_history(&mut self) {
        let Some(ctx) = self.sessions.context() else {
            println!("{}", "Not signed in.".dimmed());
            return;
        };

        match self.history.list(ctx).await {
            Ok(view) => {
                self.last_listing = view.entries().iter().map(|e| e.id.clone()).collect();
                print!("{}", ConsoleFormatter::format_history(&view));
            }
            Err(e) => eprintln!("{} {}", "Could not load history:".red(), e),
        }
    }

    async fn delete_entry(&mut self, arg: &str) {
        let Some(ctx) = self.sessions.context() else {
            println!("{}", "Not signed in.".dimmed());
            return;
        };

        let index = match arg.parse::<usize>() {
            Ok(n) if n >= 1 && n <= self.last_listing.len() => n - 1,
            _ => {
                println!("Usage: /delete <n>  (run /history first)");
                return;
            }
        };

        let id = self.last_listing[index].clone();
        match self.history.remove(ctx, &id).await {
            Ok(()) => {
                self.last_listing.remove(index);
                println!("{}", "Deleted.".dimmed());
            }
            Err(e) => eprintln!("{} {}", "Could not delete entry:".red(), e),
        }
    }

    /// Run one generation for a `title :: description` line.
    async fn process_request(&mut self, line: &str) {
        if !self.sessions.has_session() {
            println!(
                "{}",
                "Sign in first: /login, /signup, or /guest to continue without an account."
                    .yellow()
            );
            return;
        }

        let Some((title, description)) = line.split_once("::") else {
            println!("Write a request as: title :: description");
            return;
        };

        let settings = self.settings.load(self.sessions.context()).await;
        let input = GenerateInput::new(title.trim(), description.trim(), settings);

        let progress: Box<dyn GenerationProgress> = if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };

        let Some(ctx) = self.sessions.context_mut() else {
            return;
        };
        let result = self
            .generator
            .execute(input, ctx, self.notifier.as_ref(), progress.as_ref())
            .await;

        match result {
            Ok(output) => {
                println!();
                println!("{} {}", "PDF ready:".green().bold(), output.pdf_url.underline());
                println!("  {} {} credits", "Cost:".dimmed(), output.cost);
                let is_guest = self
                    .sessions
                    .context()
                    .map(|c| c.session().is_guest())
                    .unwrap_or(false);
                if !output.saved && !is_guest {
                    println!("{}", "Note: this document could not be saved to history.".yellow());
                }
                println!();
            }
            Err(GenerateError::Validation(e)) => {
                println!("{}", e.to_string().yellow());
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
    }
}

/// Read one line with the given prompt. `None` means the user backed out
/// (Ctrl-C / Ctrl-D).
fn prompt_line(rl: &mut DefaultEditor, prompt: &str) -> RlResult<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Use the inline argument when given, otherwise prompt for it.
fn read_or_prompt(arg: &str, rl: &mut DefaultEditor, prompt: &str) -> RlResult<Option<String>> {
    if arg.is_empty() {
        prompt_line(rl, prompt)
    } else {
        Ok(Some(arg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_history_lives_under_the_app_data_dir() {
        let path = ChatRepl::history_path().unwrap();
        assert!(path.to_string_lossy().contains("pdraft"));
        assert!(path.ends_with("history.txt"));
    }
}
