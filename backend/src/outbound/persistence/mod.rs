//! In-process persistence adapters.
//!
//! Each repository keeps its records in insertion order behind a
//! `tokio::sync::RwLock`. Operations the ports declare atomic (view counting,
//! comment append and removal, tally overwrite) complete under a single write
//! guard.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use board::domain::{AccountsService, PostsService};
//! use board::outbound::persistence::{MemoryPostRepository, MemoryUserRepository};
//! use mockable::DefaultClock;
//!
//! let posts = PostsService::new(Arc::new(MemoryPostRepository::new()), Arc::new(DefaultClock));
//! let accounts = AccountsService::new(Arc::new(MemoryUserRepository::new()));
//! # let _ = (posts, accounts);
//! ```

mod memory_post_repository;
mod memory_user_repository;

pub use memory_post_repository::MemoryPostRepository;
pub use memory_user_repository::MemoryUserRepository;
