//! Posts, likes, follows, and profile lookups.
//!
//! Every mutation acts as the identity behind a session token, resolved
//! through [`forest_auth::Resolve`]. Nothing here knows how sessions are
//! stored.
//!
//! ## Entities
//!
//! - [`Post`] - Authored text with an optional image URL
//! - [`Like`] - (post, user) pair
//! - [`Follow`] - (followee, follower) pair
//!
//! ## Services
//!
//! - [`Social`] - Reads and ownership-checked writes
//! - [`SocialRepository`] - Persistence seam, implemented for `Arc<Client>`
mod dto;
mod follow;
mod like;
mod memory;
mod post;
mod repository;
mod service;

pub use dto::*;
pub use follow::*;
pub use like::*;
pub use memory::*;
pub use post::*;
pub use repository::*;
pub use service::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
