//! Authentication, sessions, and identity resolution.
//!
//! Opaque server-side sessions over Argon2id password credentials. Tokens
//! are random and only their SHA-256 digest is persisted; each username
//! holds at most one live session.
//!
//! ## Identity Types
//!
//! - [`Profile`] - Durable public identity
//! - [`Credential`] - Password digest owned by a profile
//! - [`Session`] - Live login session with expiry
//! - [`Token`] - Opaque bearer value carried in the session cookie
//!
//! ## Services
//!
//! - [`Hasher`] - Argon2id hashing and verification
//! - [`SessionStore`] - Create, delete, and look up sessions
//! - [`Resolver`] - Token to identity, username to identity
//! - [`Auth`] - Sign-up, sign-in, refresh, logout
//!
//! ## Storage
//!
//! - [`AuthRepository`] - Persistence seam, implemented for `Arc<Client>`
//! - [`Memory`] - In-process implementation with the same constraints
mod config;
mod cookie;
mod credential;
pub mod deadline;
mod dto;
mod error;
mod memory;
pub mod password;
mod profile;
mod repository;
mod resolver;
mod service;
mod session;
mod store;
mod token;

pub use config::*;
pub use cookie::*;
pub use credential::*;
pub use dto::*;
pub use error::*;
pub use memory::*;
pub use password::*;
pub use profile::*;
pub use repository::*;
pub use resolver::*;
pub use service::*;
pub use session::*;
pub use store::*;
pub use token::*;

#[cfg(feature = "server")]
mod extract;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
