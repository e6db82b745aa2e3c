//! Command handlers

mod common;
mod export;
mod listen;
mod notifications;
mod validate;

pub use common::{HandlerContext, parsing};
pub use export::{ExportFormat, handle_export_command};
pub use listen::handle_listen_command;
pub use notifications::{
    handle_add_command, handle_clear_command, handle_count_command, handle_delete_command,
    handle_list_command, handle_read_all_command, handle_read_command, handle_show_command,
};
pub use validate::handle_validate_command;
