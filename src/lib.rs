//! bus-notifier - Client-side notification store for the bus-ticketing portals
//!
//! This crate provides the notification inbox shared by the Admin, Driver and
//! Passenger portals:
//! - A process-local store with read/unread tracking and newest-first order
//! - Persistence of the whole list to a pluggable key-value blob store
//! - Subscriptions notifying UI listeners after every change
//! - A push transport boundary and local alerts
//! - Sign-up field validators shared by the portals' forms

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Side effects
//!
//! Every mutation updates the in-memory list, persists it and then notifies
//! subscribers, in that order. Persistence and alert failures are logged and
//! never propagated: the in-memory list stays authoritative for the session.
//!
//! # Example
//!
//! ```rust,ignore
//! use bus_notifier::core::{NewNotification, NotificationType};
//! use bus_notifier::storage::FileBlobStore;
//! use bus_notifier::store::NotificationStore;
//!
//! let mut store = NotificationStore::new(FileBlobStore::new(".bus-notifier"));
//! store.load_notifications();
//!
//! let subscription = store.subscribe(|list| println!("{} notifications", list.len()));
//! let added = store.add_notification(NewNotification::new(
//!     "Ticket created",
//!     "Dhaka to Chattogram, seat C2",
//!     NotificationType::TicketCreated,
//! ));
//! store.mark_as_read(added.id.as_str());
//! subscription.unsubscribe();
//! ```

pub mod alert;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod store;
pub mod transport;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{NotifierError, Result};
pub use store::NotificationStore;
