//! CLI command implementations.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the MCP server over stdio |
//! | `check` | Resolve one id or URL against the configured root scope |
//!
//! # Example Usage
//!
//! ```bash
//! # Run as MCP server
//! pagegate serve
//!
//! # Ask whether a page is inside the allowed scope
//! pagegate check 1a2b3c4d-5e6f-7a8b-9c0d-1e2f3a4b5c6d
//! pagegate check https://www.notion.so/Team-Home-1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d
//! ```

mod check;
mod serve;

pub use check::CheckCommand;
pub use serve::ServeCommand;
