//! # CLI Layer
//!
//! This is **one possible UI client** for cardbox, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! Each invocation is one pass through the dialog: `add` and `edit` open the
//! coordinator's dialog, fill the form from flags, and submit; `delete` goes
//! through the confirmation gate with a stdin prompt.
//!
//! ## Structure
//!
//! - `setup`: clap argument definitions
//! - `commands`: context setup and per-command handlers
//! - `render`: list and card rendering, message printing
//! - `styles`: the named terminal styles
//! - `templates`: minijinja templates for the `outstanding` renderer

mod commands;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
