//! # placereview storage
//!
//! Where published crawl results land. The crawler writes through the
//! [`ObjectStore`] trait; two backends ship:
//!
//! - [`FsObjectStore`]: a directory tree, keys map to relative paths
//! - [`HttpObjectStore`]: `PUT {base}/{key}` against an object endpoint
//!   such as a pre-signed bucket gateway

mod error;
mod fs;
mod http;
mod store;

pub use error::StorageError;
pub use fs::FsObjectStore;
pub use http::HttpObjectStore;
pub use store::{from_config, ObjectStore};
