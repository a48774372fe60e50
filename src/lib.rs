//! Bookmarks GitHub profiles in a local key-value store.
//!
//! [`favorites::FavoritesStore`] owns the list and is wired with a
//! [`storage::KeyValueStorage`] backend and a [`lookup::ProfileLookup`].

pub mod config;
pub mod error;
pub mod favorites;
pub mod lookup;
pub mod profile;
pub mod render;
pub mod storage;
pub mod validation;
