use crate::core::{Notification, NotificationId};
use chrono::{DateTime, Utc};

/// Issues timestamp-derived notification ids
///
/// Each id is the creation time in milliseconds, bumped past the last issued
/// id and past any id already held by the store, so two adds within the same
/// millisecond still get distinct ids.
///
/// Loaded data can hold ids at the top of the `i64` range. Once no numeric id
/// is left above them, ids fall back to `<millis>-<n>`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_issued: i64,
    overflow: u64,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self {
            last_issued: 0,
            overflow: 0,
        }
    }

    /// Continue after the highest numeric id in `existing`
    pub fn reseed(&mut self, existing: &[Notification]) {
        self.last_issued = existing
            .iter()
            .filter_map(|n| n.id.as_millis())
            .max()
            .unwrap_or(0)
            .max(self.last_issued);
    }

    /// Next id for a notification created at `now`
    pub fn next_id(&mut self, now: DateTime<Utc>, existing: &[Notification]) -> NotificationId {
        let millis = now.timestamp_millis();
        if let Some(candidate) = self.next_numeric(millis, existing) {
            self.last_issued = candidate;
            return NotificationId::new(candidate.to_string());
        }

        tracing::warn!("Numeric notification ids exhausted, using suffixed ids");
        loop {
            let id = format!("{millis}-{}", self.overflow);
            self.overflow = self.overflow.wrapping_add(1);
            if !existing.iter().any(|n| n.id.as_str() == id) {
                return NotificationId::new(id);
            }
        }
    }

    fn next_numeric(&self, millis: i64, existing: &[Notification]) -> Option<i64> {
        let mut candidate = millis.max(self.last_issued.checked_add(1)?);
        while existing
            .iter()
            .any(|n| n.id.as_millis() == Some(candidate))
        {
            candidate = candidate.checked_add(1)?;
        }
        Some(candidate)
    }
}
