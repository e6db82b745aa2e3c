//! Local user-visible alerts
//!
//! The store raises an alert for every added notification once the user has
//! granted permission. Alert failures never affect the store's state.

use crate::core::Notification;
use crate::error::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Answer to an alert permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPermission {
    /// Not asked yet
    #[default]
    Default,
    Granted,
    Denied,
}

impl AlertPermission {
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Alert shown for a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
    /// Repeat alerts with the same tag may replace each other
    pub tag: String,
}

impl From<&Notification> for Alert {
    fn from(notification: &Notification) -> Self {
        Self {
            title: notification.title.clone(),
            body: notification.message.clone(),
            tag: notification.id.to_string(),
        }
    }
}

/// Platform facility for showing alerts
pub trait Alerter: Send {
    /// Current permission state, without prompting
    fn permission(&self) -> AlertPermission;

    /// Ask the platform for permission to show alerts
    fn request_permission(&mut self) -> Result<AlertPermission>;

    fn show(&self, alert: &Alert) -> Result<()>;
}

/// Alerter that never shows anything
#[derive(Debug, Default)]
pub struct NoopAlerter;

impl Alerter for NoopAlerter {
    fn permission(&self) -> AlertPermission {
        AlertPermission::Denied
    }

    fn request_permission(&mut self) -> Result<AlertPermission> {
        Ok(AlertPermission::Denied)
    }

    fn show(&self, _alert: &Alert) -> Result<()> {
        Ok(())
    }
}

/// Alerter printing a bell line to stderr
#[derive(Debug)]
pub struct TerminalAlerter {
    enabled: bool,
    permission: AlertPermission,
}

impl TerminalAlerter {
    /// `enabled` decides what a permission request answers
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            permission: AlertPermission::Default,
        }
    }

    fn render(alert: &Alert) -> String {
        if alert.body.is_empty() {
            format!("🔔 {}", alert.title.bold())
        } else {
            format!("🔔 {}: {}", alert.title.bold(), alert.body)
        }
    }
}

impl Alerter for TerminalAlerter {
    fn permission(&self) -> AlertPermission {
        self.permission
    }

    fn request_permission(&mut self) -> Result<AlertPermission> {
        self.permission = if self.enabled {
            AlertPermission::Granted
        } else {
            AlertPermission::Denied
        };
        Ok(self.permission)
    }

    fn show(&self, alert: &Alert) -> Result<()> {
        eprintln!("{}", Self::render(alert));
        Ok(())
    }
}
