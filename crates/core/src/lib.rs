//! Tienda Core - Storefront state containers.
//!
//! This crate provides the state shared by every Tienda front end:
//! - `storefront` - Server-rendered storefront over axum
//! - `cli` - Command-line browsing and session management
//!
//! # Architecture
//!
//! The core crate contains only types, state containers and traits - no
//! network, no HTTP, no filesystem. Storage is reached through the
//! [`KeyValueStore`] port so each front end can plug in its own backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`product`] - Product records as returned by the remote catalog
//! - [`storage`] - Key-value storage port and an in-memory implementation
//! - [`session`] - Placeholder authentication and admin authorization
//! - [`view`] - Search and pagination over a product collection
//! - [`load`] - Single-shot load state for the remote catalog
//! - [`scroll`] - Scroll offset memory for returning to the product list
//! - [`cart`] - Shopping cart lines
//! - [`route`] - Navigation targets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod load;
pub mod product;
pub mod route;
pub mod scroll;
pub mod session;
pub mod storage;
pub mod types;
pub mod view;

pub use cart::{Cart, CartLine};
pub use load::LoadState;
pub use product::ProductRecord;
pub use route::Route;
pub use scroll::ScrollMemory;
pub use session::{Session, SessionStore, UserIdentity};
pub use storage::{KeyValueStore, MemoryStore};
pub use types::*;
pub use view::{PAGE_SIZE, ProductView};
