//! # presence-cache
//!
//! Redis backend for the presence set.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Ordered Store**: [`presence_core::OrderedStore`] over Redis sorted sets
//!
//! ## Example
//!
//! ```ignore
//! use presence_cache::{RedisOrderedStore, RedisPool, RedisPoolConfig};
//! use presence_core::{PresenceSet, SystemClock};
//! use std::sync::Arc;
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let presence = PresenceSet::new(
//!     Arc::new(RedisOrderedStore::new(pool)),
//!     Arc::new(SystemClock::new()),
//! );
//!
//! presence.touch("session-1", 60_000).await?;
//! let online = presence.count().await?;
//! ```

pub mod pool;
pub mod store;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use store::RedisOrderedStore;
