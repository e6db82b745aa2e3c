//! Listen command handler
//!
//! Stands in for a push service client: each line on stdin is one JSON
//! `PushMessage`. The store is initialised the same way a portal does at
//! start-up (alert permission, transport start, topic subscriptions) and every
//! delivered message is added until stdin closes.

use super::common::HandlerContext;
use crate::error::{NotifierError, Result};
use crate::transport::{self, PushMessage, PushSender};
use serde_json::json;
use std::io::{self, BufRead};
use std::thread;

/// Handle the listen command
pub fn handle_listen_command(user: Option<String>, ctx: &mut HandlerContext) -> Result<()> {
    let user_id = user.or_else(|| ctx.config.transport.user_id.clone());
    let (sender, mut push_transport) = transport::channel();

    let topics = transport::initialize(
        &mut ctx.store,
        &mut push_transport,
        user_id.as_deref(),
        &ctx.config.transport,
    );
    if topics.is_empty() {
        ctx.warning("No topics subscribed; only untagged messages will be received");
    } else {
        ctx.info(&format!("Listening on: {}", topics.join(", ")));
    }

    let reader = thread::spawn(move || forward_lines(io::stdin().lock(), &sender));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let ingested = runtime.block_on(transport::pump(&mut ctx.store, &mut push_transport));

    let skipped = reader
        .join()
        .map_err(|_| NotifierError::custom("stdin reader thread panicked"))?;

    if ctx.formatter.is_json() {
        return ctx.formatter.json(&json!({
            "topics": topics,
            "ingested": ingested,
            "skipped": skipped,
            "unread_count": ctx.store.get_unread_count(),
        }));
    }

    ctx.success(&format!("✅ Received {ingested} notifications"));
    if skipped > 0 {
        ctx.warning(&format!("Skipped {skipped} malformed lines"));
    }
    Ok(())
}

/// Send each JSON line from `input` to the transport
///
/// Returns the number of lines that could not be parsed.
fn forward_lines(input: impl BufRead, sender: &PushSender) -> usize {
    let mut skipped = 0;
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read input: {}", e);
                break;
            },
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<PushMessage>(&line) {
            Ok(message) => {
                if sender.send(message).is_err() {
                    break;
                }
            },
            Err(e) => {
                tracing::warn!("Skipping malformed push message: {}", e);
                skipped += 1;
            },
        }
    }
    skipped
}
