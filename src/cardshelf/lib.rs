//! # Cardshelf Architecture
//!
//! Cardshelf is a **UI-agnostic catalog library**: a small ordered collection of product
//! cards, persisted as a single blob in a key-value store, searched by free text and edited
//! through a modal dialog. The terminal client in `main.rs` is one consumer of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, prints styled output          │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Action
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  App (app.rs)                                               │
//! │  - Application root: owns store, modal, query, collaborators│
//! │  - Dispatches typed actions, re-renders after each one      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┼──────────────┐
//!               ▼              ▼              ▼
//! ┌────────────────┐ ┌──────────────────┐ ┌────────────────────┐
//! │ modal.rs       │ │ record_store.rs  │ │ search.rs          │
//! │ state machine  │ │ canonical cards  │ │ render.rs          │
//! │ (ids only)     │ │ validate+persist │ │ pure projections   │
//! └────────────────┘ └──────────────────┘ └────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (storage/)                                   │
//! │  - CardSlot: one key, whole collection, fails soft on load  │
//! │  - KeyValueStore trait: FileKv (production), MemoryKv (test)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Everything under `app.rs` takes plain Rust values and returns plain Rust values. It never
//! prints, never prompts and never exits. Confirmation before deletes, id generation and
//! placeholder images are collaborators behind traits in [`collab`], so the whole
//! create/view/edit/delete flow is testable without a terminal.
//!
//! ## Execution Model
//!
//! Single-threaded and synchronous: every action runs to completion, including the
//! persistence write, before the next one is processed. Two processes sharing a data
//! directory overwrite each other (last save wins).
//!
//! ## Module Overview
//!
//! - [`app`]: application root and action dispatch
//! - [`modal`]: the modal dialog state machine
//! - [`record_store`]: the in-memory collection and its mutations
//! - [`search`]: the search projection
//! - [`render`]: render-ready card elements with bound actions
//! - [`storage`]: key-value backends and the persistence slot
//! - [`model`]: the `Card` type
//! - [`collab`]: id, image and confirmation collaborators
//! - [`config`]: configuration management
//! - [`theme`]: the persisted light/dark preference
//! - [`error`]: error types

pub mod app;
pub mod collab;
pub mod config;
pub mod error;
pub mod modal;
pub mod model;
pub mod record_store;
pub mod render;
pub mod search;
pub mod storage;
pub mod theme;
