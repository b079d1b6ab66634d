//! # Zealot Architecture
//!
//! Zealot is a **UI-agnostic note store**: notes, folders that group them, and
//! a persistence bridge that mirrors both to a small key-value medium (a
//! directory of JSON files, or anything else implementing
//! [`store::KeyValueStorage`]). The bundled CLI is one client of the library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints results, owns stdout/stderr     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Dispatches commands, writes changed collections back     │
//! │  - Derived read views                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                            │
//!                 ▼                            ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Commands (commands/*.rs)     │ │  Persistence (persist.rs) │
//! │  - Pure mutations of state    │ │  - Snapshot per key       │
//! │  - Invariants, no I/O         │ │  - validate.rs on load    │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                 │                            │
//!                 ▼                            ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  State (state.rs, session.rs) │ │  Storage (store/)         │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - Note ids and folder ids are unique within their collection.
//! - A note's `folder_id` is `None` (unfiled) or names an existing folder.
//!   Deleting a folder moves its notes to unfiled in the same command.
//! - `updated_at >= created_at`, and every mutation strictly advances
//!   `updated_at`.
//! - Nothing read from storage reaches state without passing through
//!   [`validate`].
//!
//! ## Error policy
//!
//! Commands with bad arguments (blank names, unknown ids) are no-ops, not
//! errors. Corrupt storage loads as fewer records. A failed write leaves
//! memory intact and surfaces as a warning on the command result.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Folder, note and editor commands
//! - [`state`]: Notebook state and derived views
//! - [`session`]: Folder selection and the editor state machine
//! - [`model`]: `Note`, `Folder` and their ids
//! - [`validate`]: Parsing and migration of persisted records
//! - [`persist`]: Persistence bridge
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`view`]: Display helpers for listings
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod persist;
pub mod session;
pub mod state;
pub mod store;
pub mod validate;
pub mod view;
