//! Handlers mapping one-to-one onto store operations

use super::common::{HandlerContext, parsing};
use crate::core::NewNotificationBuilder;
use crate::error::{NotifierError, Result};
use serde_json::json;

/// Handle the list command
pub fn handle_list_command(unread: bool, limit: Option<usize>, ctx: &HandlerContext) -> Result<()> {
    let notifications: Vec<_> = ctx
        .store
        .get_notifications()
        .into_iter()
        .filter(|n| !unread || n.is_unread())
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if ctx.formatter.is_json() {
        return ctx.formatter.json(&json!({
            "notifications": notifications,
            "unread_count": ctx.store.get_unread_count(),
        }));
    }

    ctx.formatter.print_notifications(&notifications);
    ctx.info(&format!(
        "\n{} notifications, {} unread",
        ctx.store.len(),
        ctx.store.get_unread_count()
    ));
    Ok(())
}

/// Handle the show command
pub fn handle_show_command(id: &str, ctx: &HandlerContext) -> Result<()> {
    let notification = ctx
        .store
        .get_notification(id)
        .ok_or_else(|| NotifierError::NotificationNotFound { id: id.to_string() })?;

    if ctx.formatter.is_json() {
        return ctx.formatter.print_json(&notification);
    }
    ctx.formatter.print_notification(&notification);
    Ok(())
}

/// Handle the count command
pub fn handle_count_command(ctx: &HandlerContext) -> Result<()> {
    let unread = ctx.store.get_unread_count();
    if ctx.formatter.is_json() {
        return ctx.formatter.json(&json!({
            "unread_count": unread,
            "total": ctx.store.len(),
        }));
    }

    println!("{unread}");
    Ok(())
}

/// Handle the add command
pub fn handle_add_command(
    title: &str,
    message: &str,
    kind: &str,
    data: Option<&str>,
    ctx: &mut HandlerContext,
) -> Result<()> {
    parsing::validate_title(title)?;
    if kind.trim().is_empty() {
        return Err(NotifierError::InvalidInput(
            "Notification type cannot be empty".to_string(),
        ));
    }

    let mut builder = NewNotificationBuilder::new()
        .title(title)
        .message(message)
        .kind(kind);
    if let Some(payload) = parsing::parse_data(data)? {
        builder = builder.data(payload);
    }

    let notification = ctx.store.add_notification(builder.build());

    if ctx.formatter.is_json() {
        return ctx.formatter.print_json(&notification);
    }
    ctx.success(&format!(
        "✅ Added notification '{}' ({})",
        notification.title, notification.id
    ));
    Ok(())
}

/// Handle the read command
pub fn handle_read_command(id: &str, ctx: &mut HandlerContext) -> Result<()> {
    if !ctx.store.mark_as_read(id) {
        if ctx.store.get_notification(id).is_none() {
            return Err(NotifierError::NotificationNotFound { id: id.to_string() });
        }
        ctx.info(&format!("Notification {id} was already read"));
    } else {
        ctx.success(&format!("✅ Marked {id} as read"));
    }

    if ctx.formatter.is_json() {
        return ctx.formatter.json(&json!({
            "id": id,
            "read": true,
            "unread_count": ctx.store.get_unread_count(),
        }));
    }
    Ok(())
}

/// Handle the read-all command
pub fn handle_read_all_command(ctx: &mut HandlerContext) -> Result<()> {
    let marked = ctx.store.get_unread_count();
    ctx.store.mark_all_as_read();

    if ctx.formatter.is_json() {
        return ctx.formatter.json(&json!({ "marked": marked, "unread_count": 0 }));
    }
    ctx.success(&format!("✅ Marked {marked} notifications as read"));
    Ok(())
}

/// Handle the delete command
pub fn handle_delete_command(id: &str, ctx: &mut HandlerContext) -> Result<()> {
    if !ctx.store.delete_notification(id) {
        return Err(NotifierError::NotificationNotFound { id: id.to_string() });
    }

    if ctx.formatter.is_json() {
        return ctx.formatter.json(&json!({ "deleted": id, "remaining": ctx.store.len() }));
    }
    ctx.success(&format!("✅ Deleted notification {id}"));
    Ok(())
}

/// Handle the clear command
pub fn handle_clear_command(ctx: &mut HandlerContext) -> Result<()> {
    let removed = ctx.store.len();
    ctx.store.clear_all();

    if ctx.formatter.is_json() {
        return ctx.formatter.json(&json!({ "removed": removed }));
    }
    ctx.success(&format!("✅ Cleared {removed} notifications"));
    Ok(())
}
