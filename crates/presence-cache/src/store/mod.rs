//! Sorted-set storage module.

mod redis_store;

pub use redis_store::RedisOrderedStore;
