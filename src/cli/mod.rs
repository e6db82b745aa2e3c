//! Command-line interface
//!
//! The CLI is the owning application of a `NotificationStore`: it builds the
//! store once per invocation, wires the file blob store and terminal alerts,
//! and maps each sub-command onto a store operation.

pub mod handlers;
mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};

/// Notification inbox for the bus-ticketing portals
#[derive(Parser, Debug)]
#[command(name = "bus-notifier", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the persisted notifications
    #[arg(long, global = true, env = "BUS_NOTIFIER_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Config file (toml, yaml or json)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notifications, newest first
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,

        /// Show at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one notification
    Show { id: String },

    /// Print the number of unread notifications
    Count,

    /// Add a notification
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        message: String,

        /// ticket_created, booking_confirmed, general or any custom tag
        #[arg(long = "type", default_value = "general")]
        kind: String,

        /// JSON payload carried with the notification
        #[arg(long)]
        data: Option<String>,
    },

    /// Mark a notification as read
    Read { id: String },

    /// Mark every notification as read
    ReadAll,

    /// Delete a notification
    Delete { id: String },

    /// Delete every notification
    Clear,

    /// Export notifications
    Export {
        /// json or yaml
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Receive push messages (one JSON object per line on stdin)
    Listen {
        /// User whose topic to subscribe to
        #[arg(long)]
        user: Option<String>,
    },

    /// Validate a sign-up field
    Validate {
        /// name, email, password, nid or phone
        field: String,

        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["bus-notifier", "list", "--unread", "-l", "5"]);
        assert!(matches!(
            cli.command,
            Commands::List {
                unread: true,
                limit: Some(5)
            }
        ));

        let cli = Cli::parse_from([
            "bus-notifier",
            "--json",
            "add",
            "--title",
            "T1",
            "--type",
            "ticket_created",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Add {
                title,
                message,
                kind,
                data,
            } => {
                assert_eq!(title, "T1");
                assert_eq!(message, "");
                assert_eq!(kind, "ticket_created");
                assert!(data.is_none());
            },
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::parse_from(["bus-notifier", "read-all", "--data-dir", "/tmp/x"]);
        assert!(matches!(cli.command, Commands::ReadAll));
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
