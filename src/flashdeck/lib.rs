//! # Flashdeck Architecture
//!
//! Flashdeck is a **UI-agnostic study card library**. The terminal client in
//! `main.rs` is one consumer of it; a browser or desktop front end would sit in
//! exactly the same place.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, main.rs)                               │
//! │  - Parses arguments, prints cards and notices               │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - DeckApi: the whole application state in one struct       │
//! │  - Role gates, notifications, load-time recovery            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Components                                                 │
//! │  directory, session, catalog, favorites: own + persist data │
//! │  categories: pure projection   notify: ephemeral message    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait: get / set / remove                  │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence model
//!
//! Users, session, cards and favorites each live in their own slot and are
//! rewritten in full right after every mutation. There is no cross-slot
//! transaction; the process is the single writer. Category counts and
//! per-category card lists are derived on demand and never stored.
//!
//! ## Known simplifications
//!
//! - Passwords are stored and compared as plain text.
//! - Provider ("social") login fabricates a user without any verification; such
//!   sessions are tagged [`model::AuthKind::Assertion`].
//! - Favorites belong to the installation, not to a user.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade and application state
//! - [`directory`]: User records, lookup and sign-up
//! - [`session`]: Login state machine
//! - [`catalog`]: Card collection
//! - [`favorites`]: Favorite card ids
//! - [`categories`]: Counts and filtering per category
//! - [`notify`]: Auto-expiring notification slot
//! - [`theme`]: Light/dark preference
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types
//! - [`seed`]: First-start data
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod directory;
pub mod error;
pub mod favorites;
pub mod model;
pub mod notify;
pub mod seed;
pub mod session;
pub mod store;
pub mod theme;
