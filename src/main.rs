//! bus-notifier - Notification inbox CLI
//!
//! This is the main entry point for the bus-notifier CLI application.
//! It handles command-line argument parsing and dispatches to the appropriate
//! command handlers.

use bus_notifier::cli::handlers::{
    HandlerContext, handle_add_command, handle_clear_command, handle_count_command,
    handle_delete_command, handle_export_command, handle_list_command, handle_listen_command,
    handle_read_all_command, handle_read_command, handle_show_command, handle_validate_command,
};
use bus_notifier::cli::{Cli, Commands, OutputFormatter};
use bus_notifier::error::{NotifierError, Result};
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

/// Main entry point for the bus-notifier CLI
///
/// Parses command-line arguments and executes the requested command.
/// Handles errors gracefully and provides helpful error messages to users.
fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Configure output formatter based on flags
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    // Execute the command and handle errors
    if let Err(e) = run(cli, formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
///
/// # Errors
///
/// Returns any error that occurs during command execution
fn run(cli: Cli, formatter: OutputFormatter) -> Result<()> {
    init_logging(cli.verbose);

    // Validation needs no store
    if let Commands::Validate { field, value } = &cli.command {
        return handle_validate_command(field, value, &formatter);
    }

    let mut ctx = HandlerContext::new(cli.data_dir.as_deref(), cli.config.as_deref(), formatter)?;
    dispatch_command(cli.command, &mut ctx)
}

/// Log to stderr: debug level with `--verbose`, otherwise whatever `RUST_LOG` asks for
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch_command(command: Commands, ctx: &mut HandlerContext) -> Result<()> {
    match command {
        Commands::List { unread, limit } => handle_list_command(unread, limit, ctx),
        Commands::Show { id } => handle_show_command(&id, ctx),
        Commands::Count => handle_count_command(ctx),
        Commands::Add {
            title,
            message,
            kind,
            data,
        } => handle_add_command(&title, &message, &kind, data.as_deref(), ctx),
        Commands::Read { id } => handle_read_command(&id, ctx),
        Commands::ReadAll => handle_read_all_command(ctx),
        Commands::Delete { id } => handle_delete_command(&id, ctx),
        Commands::Clear => handle_clear_command(ctx),
        Commands::Export { format, output } => {
            handle_export_command(&format, output.as_deref(), ctx)
        },
        Commands::Listen { user } => handle_listen_command(user, ctx),
        Commands::Validate { field, value } => {
            handle_validate_command(&field, &value, &ctx.formatter)
        },
    }
}

/// Handle errors and display them to the user
///
/// This function formats errors in a user-friendly way, including:
/// - The main error message
/// - Any suggestions for fixing the error
/// - Additional context in verbose mode
fn handle_error(error: &NotifierError, formatter: &OutputFormatter) {
    // Display the main error message
    formatter.error(&error.user_message());

    // Display suggestions if available
    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        eprintln!("\nSuggestions:");
        for suggestion in &suggestions {
            eprintln!("  • {suggestion}");
        }
    }

    // In JSON mode, output error as JSON
    if formatter.is_json() {
        let _ = formatter.json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "error_type": format!("{:?}", error),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        }));
    }

    // In verbose mode, show the full error chain
    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
