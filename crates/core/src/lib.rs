//! fieldpath - Runtime field introspection for Rust records
//!
//! This crate answers four questions about a record instance without
//! compile-time knowledge of its shape: does field X exist, what is its
//! value/kind/tag, set field X to value V, and enumerate or copy fields in
//! bulk. Fields are addressed by dot-separated paths that traverse nested
//! records (`"nested.inner.value"`) and optional nested references
//! (`Option<R>`, where a `None` along the way is a distinct
//! [`Error::NilReference`] failure).
//!
//! Types opt in with `#[derive(Record)]`; only `pub` fields participate.
//!
//! # Example
//!
//! ```
//! use fieldpath_core::{self as fieldpath, Record};
//!
//! #[derive(Record, Clone, Debug, PartialEq, Default)]
//! struct Server {
//!     #[field(tags(config = "host"))]
//!     pub host: String,
//!     pub port: u16,
//! }
//!
//! let mut server = Server { host: "localhost".into(), port: 8080 };
//!
//! assert!(fieldpath::has_field(&server, "port").unwrap());
//! assert_eq!(fieldpath::field_names(&server).unwrap(), vec!["host", "port"]);
//! assert_eq!(fieldpath::get_field_tag(&server, "host", "config").unwrap(), "host");
//!
//! fieldpath::set_field(&mut server, "port", Box::new(9090u16)).unwrap();
//! let port = fieldpath::get_field(&server, "port").unwrap();
//! assert_eq!(*port.as_any().downcast_ref::<u16>().unwrap(), 9090);
//! ```
//!
//! # Copying
//!
//! [`copy`] moves fields between records of possibly different shapes by
//! qualified name, under a [`CopyPolicy`] (skip default-valued source
//! fields, tolerate destinations missing a source field). The zero-argument
//! form reads a process-wide default policy; prefer [`copy_with_policy`]
//! when concurrent callers might mutate that default.

// Allow the crate to refer to itself as `fieldpath_core` so the derive's
// generated paths resolve in this crate's own tests.
extern crate self as fieldpath_core;

// Re-export the derive alongside the trait of the same name.
pub use fieldpath_macros::Record;

pub mod access;
pub mod copy;
pub mod error;
pub mod fields;
pub mod path;
pub mod record;
pub mod value;

#[cfg(test)]
mod testutil;

pub use access::{get_field, get_field_kind, get_field_tag, has_field, set_field};
pub use copy::{
    copy, copy_field, copy_with_policy, default_copy_policy, set_default_copy_policy, CopyPolicy,
};
pub use error::{Error, Result};
pub use fields::{field_names, fields, items, tags};
pub use path::{resolve, FieldHandle};
pub use record::{FieldDescriptor, Record};
pub use value::{
    assign_downcast, is_default_value, is_record, AssignError, Kind, Shape, ShapeMut, Typed, Value,
};
