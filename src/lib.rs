/// roster-tui - Team roster client (TUI Edition)
///
/// Renders the team roster served by the site API, shows member profiles in
/// accessible modal dialogs and sends bounded-length messages to a member.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
