//! Greenroom core library — domain types, session store, config, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`StoreError`]
//! - [`store`] — [`SessionStore`] trait, file and in-memory stores
//! - [`config`] — [`ShellConfig`]

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::ShellConfig;
pub use error::StoreError;
pub use store::{FileStore, MemoryStore, SessionStore};
pub use types::{LifecyclePhase, LoadingState, Session, UserId};
