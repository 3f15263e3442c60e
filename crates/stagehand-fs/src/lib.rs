//! Filesystem helpers for staging downloaded campaign assets.
//!
//! - `copy` - bounded stream-to-file copy
//! - `delete` - file, tree and legacy database deletion
//! - `cache` - application cache directory collaborator
//! - `scratch` - self-cleaning staging directory

mod cache;
mod copy;
mod delete;
mod error;
mod scratch;

pub use cache::{CacheDirectory, FixedCacheDirectory};
pub use copy::{COPY_BUFFER_SIZE, copy_stream_to_file, write_stream_to_file};
pub use delete::{delete_database_file, delete_path};
pub use error::{Error, Result, from_io};
pub use scratch::Scratch;
