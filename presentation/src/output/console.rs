//! Console output formatting for transcripts, history, and settings

use colored::Colorize;
use pdraft_application::SessionNotifier;
use pdraft_domain::{HistoryView, Message, Role, Settings, Transcript};

/// Formats domain objects for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one transcript message.
    pub fn format_message(message: &Message) -> String {
        let mut output = String::new();

        match message.role {
            Role::User => {
                output.push_str(&format!("{}\n", "You".cyan().bold()));
            }
            Role::Assistant => {
                output.push_str(&format!("{}\n", "pdraft".green().bold()));
            }
        }
        output.push_str(&Self::indent(&message.text, "  "));
        output.push('\n');

        if let Some(url) = &message.pdf_url {
            output.push_str(&format!("  {} {}\n", "PDF:".bold(), url.underline()));
        }

        output
    }

    /// Format the whole transcript, oldest first.
    pub fn format_transcript(transcript: &Transcript) -> String {
        if transcript.is_empty() {
            return format!("{}\n", "No messages yet.".dimmed());
        }
        transcript
            .messages()
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a history listing, newest first, numbered for `/delete`.
    pub fn format_history(view: &HistoryView) -> String {
        if view.is_unavailable() {
            return format!(
                "{}\n",
                "History is not available in guest mode. Sign in to keep your documents.".yellow()
            );
        }

        let entries = view.entries();
        if entries.is_empty() {
            return format!("{}\n", "No documents yet.".dimmed());
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Your documents".cyan().bold()));
        for (i, entry) in entries.iter().enumerate() {
            output.push_str(&format!(
                "  {} {} {}\n",
                format!("{}.", i + 1).bold(),
                entry.title,
                format!("({})", entry.created_at.format("%Y-%m-%d %H:%M")).dimmed()
            ));
            output.push_str(&format!("     {}\n", entry.pdf_url.dimmed()));
        }
        output
    }

    /// Format the current settings record.
    pub fn format_settings(settings: &Settings) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Settings".cyan().bold()));
        output.push_str(&format!("  font-style:    {}\n", settings.font_style));
        output.push_str(&format!("  font-size:     {}\n", settings.font_size));
        output.push_str(&format!("  language:      {}\n", settings.language));
        output.push_str(&format!("  document-type: {}\n", settings.document_type));
        output.push_str(&format!("  max-tokens:    {}\n", settings.max_tokens));
        output
    }

    /// Format a credit balance, e.g. `250,000 credits`.
    pub fn format_balance(credits: u64) -> String {
        format!("{} credits", group_thousands(credits))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Prints session transitions and balance changes to the console.
pub struct ConsoleNotifier;

impl SessionNotifier for ConsoleNotifier {
    fn on_signed_in(&self, display_name: &str, credits: u64) {
        println!(
            "{} {} ({})",
            "Signed in as".green(),
            display_name.bold(),
            ConsoleFormatter::format_balance(credits)
        );
    }

    fn on_signed_out(&self) {
        println!("{}", "Signed out.".dimmed());
    }

    fn on_balance_changed(&self, credits: u64) {
        println!(
            "{} {}",
            "Balance:".dimmed(),
            ConsoleFormatter::format_balance(credits)
        );
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            output.push(',');
        }
        output.push(c);
    }
    output
}
