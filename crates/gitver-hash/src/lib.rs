//! Object identity for gitver.
//!
//! Provides the `ObjectId` type shared by the describe core and the
//! repository accessor, plus the hex helpers behind its display form.

mod error;
pub mod hex;
mod oid;

pub use error::HashError;
pub use oid::ObjectId;
