//! Record-to-record copy engine
//!
//! Copies fields from a source record to a destination record by qualified
//! name: source discovery via the enumerator, destination writes via the
//! resolver. Nested paths such as `"nested.dummy"` are part of the
//! enumeration, which is what makes nested-record copy work without
//! special-casing (the container is copied as a whole unit first, then its
//! members individually).
//!
//! Behavior is governed by a [`CopyPolicy`]. The zero-argument [`copy`]
//! reads the process-wide default policy at call time; concurrent callers
//! that need a stable policy should pass one explicitly via
//! [`copy_with_policy`].

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::access::{get_field, set_field};
use crate::error::Result;
use crate::fields::field_names;
use crate::path::record_root;
use crate::value::Value;

/// Configuration for the copy engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPolicy {
    /// Skip source fields whose value equals the default value of their
    /// type. Skipping is a plain continue, never an error.
    pub skip_default_values: bool,
    /// Ignore destination write failures (typically a destination whose
    /// shape lacks the source field) instead of aborting.
    pub tolerate_missing_destination_fields: bool,
}

impl Default for CopyPolicy {
    fn default() -> Self {
        Self {
            skip_default_values: true,
            tolerate_missing_destination_fields: true,
        }
    }
}

/// Process-wide default policy consumed by [`copy`]. Read at call time and
/// caller-mutable; mutations are not synchronized against concurrent
/// default-policy copies beyond the lock itself.
static DEFAULT_POLICY: RwLock<CopyPolicy> = RwLock::new(CopyPolicy {
    skip_default_values: true,
    tolerate_missing_destination_fields: true,
});

/// Current process-wide default copy policy.
pub fn default_copy_policy() -> CopyPolicy {
    *DEFAULT_POLICY.read()
}

/// Replace the process-wide default copy policy.
pub fn set_default_copy_policy(policy: CopyPolicy) {
    *DEFAULT_POLICY.write() = policy;
}

/// Copy all fields from `source` to `destination` under the current default
/// policy.
pub fn copy(source: &dyn Value, destination: &mut dyn Value) -> Result<()> {
    copy_with_policy(source, destination, default_copy_policy())
}

/// Copy all fields from `source` to `destination` under `policy`.
///
/// Fields are processed in enumeration order. The copy is not transactional:
/// when a non-tolerated write failure aborts it, fields already written
/// remain written.
pub fn copy_with_policy(
    source: &dyn Value,
    destination: &mut dyn Value,
    policy: CopyPolicy,
) -> Result<()> {
    let names = field_names(source)?;
    record_root(&*destination)?;

    for name in &names {
        let value = get_field(source, name)?.clone_value();
        if policy.skip_default_values && value.is_default() {
            trace!(field = %name, "skipping default-valued source field");
            continue;
        }
        if let Err(err) = set_field(destination, name, value) {
            if policy.tolerate_missing_destination_fields {
                debug!(field = %name, error = %err, "ignoring destination write failure");
                continue;
            }
            return Err(err);
        }
    }
    Ok(())
}

/// Copy the single field `name` from `source` to `destination`.
pub fn copy_field(source: &dyn Value, destination: &mut dyn Value, name: &str) -> Result<()> {
    let value = get_field(source, name)?.clone_value();
    set_field(destination, name, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testutil::{Basic, Inner, Short, WithNested};

    fn strict() -> CopyPolicy {
        CopyPolicy {
            skip_default_values: false,
            tolerate_missing_destination_fields: false,
        }
    }

    #[test]
    fn copy_skips_default_values_when_asked() {
        let source = Basic {
            dummy: "x".into(),
            yummy: 0,
            ..Basic::default()
        };
        let mut destination = Basic {
            dummy: "y".into(),
            yummy: 5,
            ..Basic::default()
        };
        copy_with_policy(&source, &mut destination, CopyPolicy::default()).unwrap();
        assert_eq!(destination.dummy, "x");
        // Zero-valued yummy was skipped, the old value survives.
        assert_eq!(destination.yummy, 5);
    }

    #[test]
    fn copy_overwrites_with_defaults_when_not_skipping() {
        let source = Basic {
            dummy: "x".into(),
            yummy: 0,
            ..Basic::default()
        };
        let mut destination = Basic {
            dummy: "y".into(),
            yummy: 5,
            ..Basic::default()
        };
        let policy = CopyPolicy {
            skip_default_values: false,
            ..CopyPolicy::default()
        };
        copy_with_policy(&source, &mut destination, policy).unwrap();
        assert_eq!(destination.dummy, "x");
        assert_eq!(destination.yummy, 0);
    }

    #[test]
    fn copy_nested_records() {
        let source = WithNested {
            dummy: "outer".into(),
            nested: Inner {
                dummy: "inner".into(),
                yummy: 9,
            },
        };
        let mut destination = WithNested::default();
        copy_with_policy(&source, &mut destination, strict()).unwrap();
        assert_eq!(destination, source);
    }

    #[test]
    fn copy_tolerates_missing_destination_fields() {
        let source = Basic {
            dummy: "x".into(),
            yummy: 3,
            ..Basic::default()
        };
        let mut destination = Short::default();
        copy_with_policy(&source, &mut destination, CopyPolicy::default()).unwrap();
        assert_eq!(destination.dummy, "x");
    }

    #[test]
    fn copy_aborts_on_missing_destination_field_when_strict() {
        let source = Basic {
            dummy: "x".into(),
            yummy: 3,
            ..Basic::default()
        };
        let mut destination = Short::default();
        let err = copy_with_policy(&source, &mut destination, strict()).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(_)));
        // Non-transactional: the field copied before the abort stays.
        assert_eq!(destination.dummy, "x");
    }

    #[test]
    fn copy_rejects_non_record_endpoints() {
        let mut destination = Basic::default();
        assert!(matches!(
            copy_with_policy(&7i64, &mut destination, strict()).unwrap_err(),
            Error::NotARecord(_)
        ));

        let source = Basic::default();
        let mut scalar = 7i64;
        assert!(matches!(
            copy_with_policy(&source, &mut scalar, strict()).unwrap_err(),
            Error::NotARecord(_)
        ));
    }

    #[test]
    fn copy_through_references() {
        let source = crate::testutil::WithReference {
            dummy: "outer".into(),
            nested: Some(Inner {
                dummy: "inner".into(),
                yummy: 4,
            }),
        };
        let mut destination = crate::testutil::WithReference::default();
        copy_with_policy(&source, &mut destination, CopyPolicy::default()).unwrap();
        assert_eq!(destination, source);
    }

    #[test]
    fn copy_nil_reference_as_leaf() {
        // A nil nested reference is enumerated as a leaf and copied (or
        // skipped) as a whole unit; it never aborts the copy.
        let source = crate::testutil::WithReference {
            dummy: "outer".into(),
            nested: None,
        };
        let mut destination = crate::testutil::WithReference {
            dummy: String::new(),
            nested: Some(Inner::default()),
        };
        copy_with_policy(&source, &mut destination, strict()).unwrap();
        assert_eq!(destination.dummy, "outer");
        assert_eq!(destination.nested, None);
    }

    #[test]
    fn copy_is_idempotent() {
        let source = WithNested {
            dummy: "a".into(),
            nested: Inner {
                dummy: "b".into(),
                yummy: 2,
            },
        };
        let mut once = WithNested::default();
        copy_with_policy(&source, &mut once, CopyPolicy::default()).unwrap();
        let mut twice = once.clone();
        copy_with_policy(&source, &mut twice, CopyPolicy::default()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn copy_field_round_trip() {
        let source = Basic {
            dummy: "solo".into(),
            ..Basic::default()
        };
        let mut destination = Basic::default();
        copy_field(&source, &mut destination, "dummy").unwrap();
        assert_eq!(destination.dummy, "solo");
        assert!(matches!(
            copy_field(&source, &mut destination, "obladioblada").unwrap_err(),
            Error::FieldNotFound(_)
        ));
    }

    #[test]
    fn copy_reads_default_policy_at_call_time() {
        // Single test covers the zero-argument copy, the default behavior,
        // and mutation of the process-wide policy, to avoid racing parallel
        // tests on the shared default.
        assert_eq!(default_copy_policy(), CopyPolicy::default());

        let source = Basic {
            dummy: "x".into(),
            yummy: 0,
            ..Basic::default()
        };
        let mut destination = Basic {
            dummy: "y".into(),
            yummy: 5,
            ..Basic::default()
        };
        copy(&source, &mut destination).unwrap();
        assert_eq!(destination.dummy, "x");
        // The built-in default policy skips the zero-valued yummy.
        assert_eq!(destination.yummy, 5);

        set_default_copy_policy(CopyPolicy {
            skip_default_values: false,
            tolerate_missing_destination_fields: true,
        });
        copy(&source, &mut destination).unwrap();
        // The mutated default is picked up at call time.
        assert_eq!(destination.yummy, 0);

        set_default_copy_policy(CopyPolicy::default());
        assert_eq!(default_copy_policy(), CopyPolicy::default());
    }
}
