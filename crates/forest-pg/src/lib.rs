//! PostgreSQL integration.
//!
//! Connectivity, table metadata, and the storage error type shared by every
//! repository in the workspace.
//!
//! ## Connectivity
//!
//! - [`db()`] - Establishes a database connection from a URL
//!
//! ## Schema
//!
//! - [`Schema`] - Table metadata and DDL generation
//! - [`StoreError`] - Storage failures, classified by cause
//!
//! ## Table Names
//!
//! Constants for all persistent entities: profiles, users, sessions,
//! posts, likes, and follows.
mod error;
mod schema;

pub use error::*;
pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
/// The client pipelines concurrent queries over one connection, so every
/// service receives a clone of the same handle.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for public profile records (the durable identity).
#[rustfmt::skip]
pub const PROFILES: &str = "profiles";
/// Table for password credentials, one per profile.
#[rustfmt::skip]
pub const USERS:    &str = "users";
/// Table for live login sessions, one per username.
#[rustfmt::skip]
pub const SESSIONS: &str = "sessions";
/// Table for authored posts.
#[rustfmt::skip]
pub const POSTS:    &str = "posts";
/// Table for (post, user) likes.
#[rustfmt::skip]
pub const LIKES:    &str = "post_likes";
/// Table for (followee, follower) edges.
#[rustfmt::skip]
pub const FOLLOWS:  &str = "follow_relationships";
