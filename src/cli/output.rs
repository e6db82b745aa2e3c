use crate::core::Notification;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Formats command output for the terminal or as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    /// Create a formatter; `no_color` disables ANSI colours process-wide
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{}", message.green());
        }
    }

    /// Errors always go to stderr, JSON mode included
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.json {
            eprintln!("{} {}", "Warning:".yellow().bold(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    /// Print a JSON value
    pub fn json(&self, value: &serde_json::Value) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print any serializable value as JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print notifications one per line, newest first
    pub fn print_notifications(&self, notifications: &[Notification]) {
        if notifications.is_empty() {
            self.info("No notifications");
            return;
        }

        for notification in notifications {
            let marker = if notification.read {
                " ".normal()
            } else {
                "●".blue().bold()
            };
            println!(
                "{} {}  {}  {}  {}",
                marker,
                notification.id.to_string().dimmed(),
                notification.timestamp.format("%Y-%m-%d %H:%M"),
                format!("[{}]", notification.kind).cyan(),
                notification.title
            );
        }
    }

    /// Print one notification in full
    pub fn print_notification(&self, notification: &Notification) {
        println!("{}", notification.title.bold());
        println!("  ID:      {}", notification.id);
        println!("  Type:    {}", notification.kind);
        println!(
            "  Time:    {}",
            notification.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!(
            "  Status:  {}",
            if notification.read {
                "read".normal()
            } else {
                "unread".yellow()
            }
        );
        if !notification.message.is_empty() {
            println!();
            println!("  {}", notification.message);
        }
        if let Some(data) = &notification.data {
            println!();
            println!("  Data:    {data}");
        }
    }
}
