//! Normalization of DataSift-wrapped Twitter interactions into Activity
//! Streams activities.
//!
//! DataSift hands us tweets inside its own envelope, with half of the
//! interesting fields sitting in loosely typed "additional properties". The
//! [`serializer`] module reconciles those records into the strict shape
//! described by [`activity`], degrading single fields instead of failing the
//! whole record.

pub mod activity;
pub mod datasift;
pub mod date;
pub mod id;
pub mod serializer;

pub use serializer::{Conversion, ConvertError, Issue, convert};
