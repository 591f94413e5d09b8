//! Field path resolution
//!
//! Resolves a dot-separated path like `"nested.inner.value"` against a live
//! instance, descending through nested records (held by value) and non-nil
//! references (`Option<R>`), and returns a handle to the terminal field.
//!
//! Every non-terminal segment must resolve to something record-like; the
//! terminal segment is looked up among the owning record's descriptors
//! regardless of visibility, because the entry points disagree on when
//! visibility is enforced (plain lookups fold it into `FieldNotFound`, tag
//! lookup reports `FieldNotExported` after the fact). Failures carry the
//! qualified path up to and including the offending segment.

use tracing::trace;

use crate::error::{Error, Result};
use crate::record::{FieldDescriptor, Record};
use crate::value::{Shape, ShapeMut, Value};

/// Resolved terminal field: the value plus its declared metadata.
///
/// Borrow-scoped; valid only as long as the instance it was resolved from.
#[derive(Debug)]
pub struct FieldHandle<'a> {
    value: &'a dyn Value,
    descriptor: &'static FieldDescriptor,
}

impl<'a> FieldHandle<'a> {
    /// The terminal field's value.
    pub fn value(&self) -> &'a dyn Value {
        self.value
    }

    /// The terminal field's declared metadata.
    pub fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }
}

/// Mutable terminal resolution, used by the write path.
pub(crate) struct FieldHandleMut<'a> {
    pub value: &'a mut dyn Value,
    pub descriptor: &'static FieldDescriptor,
}

/// Resolve `path` against `instance` for reading.
pub fn resolve<'a>(instance: &'a dyn Value, path: &str) -> Result<FieldHandle<'a>> {
    let root = record_root(instance)?;
    let handle = descend(root, path, 0)?;
    trace!(path, field = handle.descriptor.name, "resolved field path");
    Ok(handle)
}

/// Resolve `path` against `instance` for writing.
pub(crate) fn resolve_mut<'a>(
    instance: &'a mut dyn Value,
    path: &str,
) -> Result<FieldHandleMut<'a>> {
    let root = record_root_mut(instance)?;
    descend_mut(root, path, 0)
}

/// Borrow `value` as a record, failing if it is not record-like.
pub(crate) fn record_root(value: &dyn Value) -> Result<&dyn Record> {
    match value.shape() {
        Shape::Record(r) | Shape::Reference(Some(r)) => Ok(r),
        Shape::Reference(None) => Err(Error::NilReference(value.type_name().to_string())),
        Shape::Scalar => Err(Error::NotARecord(value.type_name())),
    }
}

pub(crate) fn record_root_mut(value: &mut dyn Value) -> Result<&mut dyn Record> {
    let type_name = value.type_name();
    match value.shape_mut() {
        ShapeMut::Record(r) | ShapeMut::Reference(Some(r)) => Ok(r),
        ShapeMut::Reference(None) => Err(Error::NilReference(type_name.to_string())),
        ShapeMut::Scalar => Err(Error::NotARecord(type_name)),
    }
}

fn lookup(record: &dyn Record, name: &str) -> Option<&'static FieldDescriptor> {
    record.descriptors().iter().find(|d| d.name == name)
}

fn lookup_visible(record: &dyn Record, name: &str) -> Option<&'static FieldDescriptor> {
    record
        .descriptors()
        .iter()
        .find(|d| d.visible && d.name == name)
}

/// `at` is the byte offset of the current segment within `path`; failures
/// report `path[..segment end]` as the qualified name.
fn descend<'a>(record: &'a dyn Record, path: &str, at: usize) -> Result<FieldHandle<'a>> {
    let rest = &path[at..];
    match rest.split_once('.') {
        Some((head, _)) => {
            let seg_end = at + head.len();
            if lookup_visible(record, head).is_none() {
                return Err(Error::FieldNotFound(path[..seg_end].to_string()));
            }
            let value = record
                .field(head)
                .ok_or_else(|| Error::FieldNotFound(path[..seg_end].to_string()))?;
            match value.shape() {
                Shape::Record(r) | Shape::Reference(Some(r)) => descend(r, path, seg_end + 1),
                Shape::Reference(None) => Err(Error::NilReference(path[..seg_end].to_string())),
                Shape::Scalar => Err(Error::TypeExpected {
                    path: path[..seg_end].to_string(),
                    type_name: value.type_name(),
                }),
            }
        }
        None => {
            let descriptor =
                lookup(record, rest).ok_or_else(|| Error::FieldNotFound(path.to_string()))?;
            let value = record
                .field(rest)
                .ok_or_else(|| Error::FieldNotFound(path.to_string()))?;
            Ok(FieldHandle { value, descriptor })
        }
    }
}

fn descend_mut<'a>(record: &'a mut dyn Record, path: &str, at: usize) -> Result<FieldHandleMut<'a>> {
    let rest = &path[at..];
    match rest.split_once('.') {
        Some((head, _)) => {
            let seg_end = at + head.len();
            if lookup_visible(&*record, head).is_none() {
                return Err(Error::FieldNotFound(path[..seg_end].to_string()));
            }
            let value = record
                .field_mut(head)
                .ok_or_else(|| Error::FieldNotFound(path[..seg_end].to_string()))?;
            let type_name = value.type_name();
            match value.shape_mut() {
                ShapeMut::Record(r) | ShapeMut::Reference(Some(r)) => {
                    descend_mut(r, path, seg_end + 1)
                }
                ShapeMut::Reference(None) => Err(Error::NilReference(path[..seg_end].to_string())),
                ShapeMut::Scalar => Err(Error::TypeExpected {
                    path: path[..seg_end].to_string(),
                    type_name,
                }),
            }
        }
        None => {
            let descriptor =
                lookup(&*record, rest).ok_or_else(|| Error::FieldNotFound(path.to_string()))?;
            let value = record
                .field_mut(rest)
                .ok_or_else(|| Error::FieldNotFound(path.to_string()))?;
            Ok(FieldHandleMut { value, descriptor })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Basic, Inner, WithNested, WithReference};

    #[test]
    fn resolve_top_level_field() {
        let instance = Basic {
            dummy: "test".into(),
            ..Basic::default()
        };
        let handle = resolve(&instance, "dummy").unwrap();
        assert_eq!(handle.descriptor().name, "dummy");
        assert!(handle.value().value_eq(&String::from("test")));
    }

    #[test]
    fn resolve_nested_field() {
        let instance = WithNested {
            dummy: "outer".into(),
            nested: Inner {
                dummy: "inner".into(),
                yummy: 7,
            },
        };
        let handle = resolve(&instance, "nested.yummy").unwrap();
        assert!(handle.value().value_eq(&7i64));
    }

    #[test]
    fn resolve_through_reference() {
        let instance = WithReference {
            dummy: "outer".into(),
            nested: Some(Inner {
                dummy: "inner".into(),
                yummy: 0,
            }),
        };
        let handle = resolve(&instance, "nested.dummy").unwrap();
        assert!(handle.value().value_eq(&String::from("inner")));
    }

    #[test]
    fn nil_reference_reports_qualified_path() {
        let instance = WithReference {
            dummy: "outer".into(),
            nested: None,
        };
        let err = resolve(&instance, "nested.dummy").unwrap_err();
        match err {
            Error::NilReference(path) => assert_eq!(path, "nested"),
            other => panic!("expected NilReference, got {other:?}"),
        }
    }

    #[test]
    fn unknown_segment_reports_qualified_path() {
        let instance = WithNested::default();
        let err = resolve(&instance, "nested.bla").unwrap_err();
        match err {
            Error::FieldNotFound(path) => assert_eq!(path, "nested.bla"),
            other => panic!("expected FieldNotFound, got {other:?}"),
        }

        let err = resolve(&instance, "missing.bla").unwrap_err();
        match err {
            Error::FieldNotFound(path) => assert_eq!(path, "missing"),
            other => panic!("expected FieldNotFound, got {other:?}"),
        }
    }

    #[test]
    fn path_through_scalar_is_type_expected() {
        let instance = Basic::default();
        let err = resolve(&instance, "dummy.inner").unwrap_err();
        match err {
            Error::TypeExpected { path, .. } => assert_eq!(path, "dummy"),
            other => panic!("expected TypeExpected, got {other:?}"),
        }
    }

    #[test]
    fn non_record_root() {
        let err = resolve(&42i32, "dummy").unwrap_err();
        assert!(matches!(err, Error::NotARecord(_)));
    }

    #[test]
    fn terminal_lookup_finds_invisible_fields() {
        // Visibility policy is the caller's; the resolver only reports
        // absence.
        let instance = Basic::default();
        let handle = resolve(&instance, "unexported").unwrap();
        assert!(!handle.descriptor().visible);
    }

    #[test]
    fn handles_format_for_diagnostics() {
        let instance = Basic::default();
        let handle = resolve(&instance, "dummy").unwrap();
        let rendered = format!("{handle:?}");
        assert!(rendered.contains("dummy"));
        assert!(format!("{:?}", handle.value()).contains("String"));
    }

    #[test]
    fn empty_path_is_not_found() {
        let instance = Basic::default();
        assert!(matches!(
            resolve(&instance, "").unwrap_err(),
            Error::FieldNotFound(_)
        ));
    }
}
