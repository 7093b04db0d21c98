//! # Cardbox Architecture
//!
//! Cardbox is a **UI-agnostic card manager library**. Cards are small records
//! (title, description, category, optional image) kept as one JSON array in a
//! single slot of a key-value store. The `cardbox` binary is one client; a
//! browser or desktop front end would drive the same types.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders list views, prompts on stdin   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View Coordinator (view.rs)                                 │
//! │  - Idle / Editing dialog state, confirmation gate           │
//! │  - Drives the form mapper (form.rs) for add and edit        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Card Repository (repo.rs)                                  │
//! │  - Owns the ordered collection, assigns ids                 │
//! │  - Writes through on every mutation                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (persist.rs) over Storage (store/)             │
//! │  - JSON text in one slot, seed cards when unreadable        │
//! │  - SlotStore trait: FsSlots (production), MemSlots (tests)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Outside `cli/`, code never prints, never exits the process and never reads
//! stdin. Things a host provides are traits: [`store::SlotStore`] for storage,
//! [`blob::BlobHost`] for turning uploaded images into displayable
//! references, [`view::Confirm`] for the delete prompt.
//!
//! ## Module Overview
//!
//! - [`model`]: `Card`, `CardDraft`, `Category`
//! - [`store`]: slot storage abstraction and implementations
//! - [`persist`]: card collection <-> slot text, seed cards
//! - [`repo`]: the card repository
//! - [`form`]: form fields to validated drafts, image precedence
//! - [`blob`]: image blobs and the hosts that reference them
//! - [`view`]: dialog coordination, list view models, command results
//! - [`config`]: configuration file
//! - [`logging`]: tracing subscriber setup
//! - [`error`]: error types

pub mod blob;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod persist;
pub mod repo;
pub mod store;
pub mod view;
