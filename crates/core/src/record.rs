//! Record trait and field metadata
//!
//! A [`Record`] is a struct whose fields can be addressed by name at
//! runtime. The impl (normally generated by `#[derive(Record)]`) carries a
//! static [`FieldDescriptor`] table in declared field order plus name-based
//! accessors into the live instance.

use crate::value::Value;

/// Declared metadata for one field of a record type.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name as declared in the struct.
    pub name: &'static str,
    /// Fully qualified name of the declared field type.
    pub type_name: &'static str,
    /// Whether the field participates in introspection. A field is visible
    /// iff it is declared `pub`; restricted visibilities (`pub(crate)` and
    /// friends) count as invisible.
    pub visible: bool,
    /// Tag metadata attached via `#[field(tags(key = "value"))]`.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    /// Look up a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// A struct value with runtime-addressable fields.
///
/// `field`/`field_mut` answer for invisible fields too; visibility policy
/// is applied by the callers (the resolver needs to find an invisible field
/// before it can report it as non-exported for tag lookup).
pub trait Record: Value {
    /// Declared fields, in declaration order, visible and invisible alike.
    fn descriptors(&self) -> &'static [FieldDescriptor];

    /// Borrow a field by exact name match.
    fn field(&self, name: &str) -> Option<&dyn Value>;

    /// Mutably borrow a field by exact name match.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lookup() {
        let descriptor = FieldDescriptor {
            name: "dummy",
            type_name: "alloc::string::String",
            visible: true,
            tags: &[("test", "dummytag"), ("json", "dummy")],
        };
        assert_eq!(descriptor.tag("test"), Some("dummytag"));
        assert_eq!(descriptor.tag("json"), Some("dummy"));
        assert_eq!(descriptor.tag("yaml"), None);
    }
}
