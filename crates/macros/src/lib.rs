//! fieldpath proc macros
//!
//! This crate provides the `#[derive(Record)]` macro that makes a struct
//! introspectable by name through `fieldpath-core`.
//!
//! # Example
//!
//! ```ignore
//! use fieldpath_core::Record;
//!
//! #[derive(Record, Clone, Debug, PartialEq, Default)]
//! struct Account {
//!     #[field(tags(json = "id", db = "account_id"))]
//!     pub id: u64,
//!
//!     pub name: String,
//!
//!     // Not `pub`: invisible to introspection.
//!     secret: String,
//! }
//! ```
//!
//! # Generated code
//!
//! For the struct, the macro generates:
//!
//! - a `Value` impl classifying the struct as a record and providing deep
//!   clone/equality, default detection, and type-checked dynamic writes
//! - a `Record` impl carrying a static field-descriptor table (declared
//!   order) plus name-based `field`/`field_mut` accessors
//! - a `Typed` impl marking the type as a record for `Option<T>`
//!   classification
//!
//! The struct must implement `Clone`, `PartialEq` and `Default`, and every
//! field type must implement `Value`.
//!
//! # Field attributes
//!
//! - `#[field(tags(key = "value", ...))]` - attach string tag metadata,
//!   readable via `get_field_tag` / `tags`.
//!
//! Visibility is taken from the field declaration itself: a field
//! participates in introspection iff it is declared `pub`.

mod parse;
mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro making a named-field struct introspectable by field name.
///
/// See the crate docs for the generated surface and requirements.
#[proc_macro_derive(Record, attributes(field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::derive_record(input).into()
}
