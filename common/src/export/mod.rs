//! Export core modules shared by the CLI renderer and file writers.

pub mod links;
pub mod text;

pub use links::{explorer_link, telegram_link};
pub use text::{usernames_to_lines, wallets_to_lines};
