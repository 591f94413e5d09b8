//! Attribute parsing for the Record derive macro

use std::collections::HashMap;

use darling::{FromDeriveInput, FromField};
use syn::{DeriveInput, Ident, Type, Visibility};

/// Parsed derive input for `#[derive(Record)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(field), supports(struct_named))]
pub struct RecordArgs {
    /// Struct identifier
    pub ident: Ident,

    /// Struct generics (rejected during codegen; descriptors are per-type
    /// statics and cannot be generic)
    pub generics: syn::Generics,

    /// Struct fields
    pub data: darling::ast::Data<(), RecordFieldArgs>,
}

/// Parsed `#[field(...)]` attributes on a field
#[derive(Debug, FromField)]
#[darling(attributes(field))]
pub struct RecordFieldArgs {
    /// Field identifier
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Field visibility; `pub` fields are visible to introspection
    pub vis: Visibility,

    /// Tag metadata: `#[field(tags(key = "value", ...))]`
    #[darling(default)]
    pub tags: HashMap<String, String>,
}

impl RecordFieldArgs {
    /// Whether the field participates in introspection. Restricted
    /// visibilities (`pub(crate)` and friends) count as invisible.
    pub fn is_visible(&self) -> bool {
        matches!(self.vis, Visibility::Public(_))
    }

    /// Tag pairs in a deterministic (key-sorted) order.
    pub fn sorted_tags(&self) -> Vec<(&String, &String)> {
        let mut pairs: Vec<_> = self.tags.iter().collect();
        pairs.sort();
        pairs
    }
}

/// Parse a DeriveInput into RecordArgs
pub fn parse_record(input: &DeriveInput) -> darling::Result<RecordArgs> {
    RecordArgs::from_derive_input(input)
}
