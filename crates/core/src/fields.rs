//! Field enumeration and snapshots
//!
//! The recursive forms (`field_names`, `fields`) walk nested records
//! depth-first in declared order: a container field is emitted at its own
//! qualified name and its members immediately after, prefixed with
//! `"container."`. Nil references are emitted as leaves - an absent nested
//! value is not a failure here.
//!
//! The snapshot forms (`items`, `tags`) cover one level only; nested record
//! fields appear as opaque whole values.

use std::collections::HashMap;

use crate::error::Result;
use crate::path::record_root;
use crate::record::{FieldDescriptor, Record};
use crate::value::{Shape, Value};

/// Qualified names of all visible fields, recursively.
pub fn field_names(instance: &dyn Value) -> Result<Vec<String>> {
    let record = record_root(instance)?;
    let mut names = Vec::new();
    collect_names(record, None, &mut names);
    Ok(names)
}

/// Descriptors of all visible fields, in the same traversal order as
/// [`field_names`].
pub fn fields(instance: &dyn Value) -> Result<Vec<&'static FieldDescriptor>> {
    let record = record_root(instance)?;
    let mut out = Vec::new();
    collect_descriptors(record, &mut out);
    Ok(out)
}

/// Single-level name-to-value snapshot of the visible fields.
pub fn items(instance: &dyn Value) -> Result<HashMap<String, Box<dyn Value>>> {
    let record = record_root(instance)?;
    let mut map = HashMap::new();
    for descriptor in record.descriptors() {
        if !descriptor.visible {
            continue;
        }
        if let Some(value) = record.field(descriptor.name) {
            map.insert(descriptor.name.to_string(), value.clone_value());
        }
    }
    Ok(map)
}

/// Single-level name-to-tag snapshot of the visible fields. Fields without
/// the tag key map to an empty string.
pub fn tags(instance: &dyn Value, key: &str) -> Result<HashMap<String, &'static str>> {
    let record = record_root(instance)?;
    let mut map = HashMap::new();
    for descriptor in record.descriptors() {
        if !descriptor.visible {
            continue;
        }
        map.insert(
            descriptor.name.to_string(),
            descriptor.tag(key).unwrap_or(""),
        );
    }
    Ok(map)
}

fn nested_record<'a>(record: &'a dyn Record, name: &str) -> Option<&'a dyn Record> {
    record.field(name).and_then(|value| match value.shape() {
        Shape::Record(r) | Shape::Reference(Some(r)) => Some(r),
        _ => None,
    })
}

fn collect_names(record: &dyn Record, prefix: Option<&str>, out: &mut Vec<String>) {
    for descriptor in record.descriptors() {
        if !descriptor.visible {
            continue;
        }
        let qualified = match prefix {
            Some(p) => format!("{p}.{}", descriptor.name),
            None => descriptor.name.to_string(),
        };
        match nested_record(record, descriptor.name) {
            Some(nested) => {
                out.push(qualified.clone());
                collect_names(nested, Some(&qualified), out);
            }
            None => out.push(qualified),
        }
    }
}

fn collect_descriptors(record: &dyn Record, out: &mut Vec<&'static FieldDescriptor>) {
    for descriptor in record.descriptors() {
        if !descriptor.visible {
            continue;
        }
        out.push(descriptor);
        if let Some(nested) = nested_record(record, descriptor.name) {
            collect_descriptors(nested, out);
        }
    }
}
