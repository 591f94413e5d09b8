//! Field access operations
//!
//! Thin specializations of path resolution: read a field, read its kind or
//! a tag, write it, check it exists. All take the instance as `&dyn Value`
//! (`&mut` for writes) and a dot-separated path.
//!
//! Visibility timing differs deliberately between entry points: `get_field`,
//! `get_field_kind` and `set_field` fold invisibility into `FieldNotFound`,
//! while `get_field_tag` finds the field first and then reports
//! `FieldNotExported`. The two behaviors are separately tested and must not
//! be unified.

use crate::error::{Error, Result};
use crate::path::{record_root, resolve, resolve_mut};
use crate::value::{Kind, Value};

/// Read the field addressed by `path`.
///
/// The returned borrow is tied to `instance` and reflects the field's
/// current value; repeated calls with no intervening write observe the same
/// value.
pub fn get_field<'a>(instance: &'a dyn Value, path: &str) -> Result<&'a dyn Value> {
    let handle = resolve(instance, path)?;
    if !handle.descriptor().visible {
        return Err(Error::FieldNotFound(path.to_string()));
    }
    Ok(handle.value())
}

/// Read the coarse [`Kind`] of the field addressed by `path`.
pub fn get_field_kind(instance: &dyn Value, path: &str) -> Result<Kind> {
    get_field(instance, path).map(|v| v.kind())
}

/// Read the value of tag `key` on the field addressed by `path`.
///
/// An absent tag key yields an empty string, not an error. A found but
/// non-exported terminal field fails with [`Error::FieldNotExported`].
pub fn get_field_tag(instance: &dyn Value, path: &str, key: &str) -> Result<&'static str> {
    let handle = resolve(instance, path)?;
    let descriptor = handle.descriptor();
    if !descriptor.visible {
        return Err(Error::FieldNotExported(path.to_string()));
    }
    Ok(descriptor.tag(key).unwrap_or(""))
}

/// Write `value` to the field addressed by `path`.
///
/// The supplied value's runtime type must be identical to the field's
/// declared type; anything else fails with [`Error::TypeMismatch`] and
/// leaves the field untouched.
pub fn set_field(instance: &mut dyn Value, path: &str, value: Box<dyn Value>) -> Result<()> {
    let handle = resolve_mut(instance, path)?;
    if !handle.descriptor.visible {
        return Err(Error::FieldNotFound(path.to_string()));
    }
    handle.value.assign(value).map_err(|e| Error::TypeMismatch {
        path: path.to_string(),
        expected: e.expected,
        actual: e.actual,
    })
}

/// Check whether `name` is a visible field of the instance's record type.
///
/// Single-level: `name` is a field name, not a path. Absent and invisible
/// names both answer `false`; a non-record instance is an error.
pub fn has_field(instance: &dyn Value, name: &str) -> Result<bool> {
    let record = record_root(instance)?;
    Ok(record
        .descriptors()
        .iter()
        .any(|d| d.visible && d.name == name))
}
