//! Dynamic value layer - the boundary over Rust's type system
//!
//! Every introspectable value implements [`Value`], which exposes just enough
//! runtime information for the resolver and enumerator to work without
//! compile-time knowledge of the concrete type: a coarse [`Kind`], a
//! structural [`Shape`] classification, deep clone/equality, and a
//! type-checked dynamic write.
//!
//! Impls are provided for the scalar primitives, `String`, `Vec<T>` and
//! `HashMap<K, V>` (opaque leaves), and `Option<T>` (the nilable reference).
//! Struct impls come from `#[derive(Record)]`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Coarse category of a value, as reported by [`Value::kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Bool,
    Char,
    Int,
    Uint,
    Float,
    String,
    List,
    Map,
    Record,
    Reference,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Reference => "reference",
        };
        f.write_str(name)
    }
}

/// Structural classification of a borrowed value.
///
/// This is what the resolver and enumerator switch on when deciding whether
/// a path segment can be descended into:
///
/// - `Scalar` - an opaque leaf (primitives, strings, collections, and
///   references to non-record values)
/// - `Record` - a struct held by value
/// - `Reference` - a nilable handle to a record (`Option<R>`); `None` models
///   the absent nested value
pub enum Shape<'a> {
    Scalar,
    Record(&'a dyn Record),
    Reference(Option<&'a dyn Record>),
}

/// Mutable counterpart of [`Shape`].
pub enum ShapeMut<'a> {
    Scalar,
    Record(&'a mut dyn Record),
    Reference(Option<&'a mut dyn Record>),
}

/// Failed [`Value::assign`]: the supplied value's runtime type was not
/// identical to the field's declared type.
#[derive(Debug, Clone, Copy)]
pub struct AssignError {
    pub expected: &'static str,
    pub actual: &'static str,
}

/// Static type facts a [`Value`] impl cannot answer from a live instance.
///
/// `Option<T>` needs this to classify `None`: with no value to inspect, only
/// the type parameter can say whether the absent payload would have been a
/// record (`Shape::Reference(None)`) or a scalar (opaque leaf).
pub trait Typed {
    const IS_RECORD: bool;
}

/// An introspectable value.
///
/// Object-safe so the library can hold `&dyn Value` handles of unknown
/// concrete type. Struct impls are generated by `#[derive(Record)]`; manual
/// impls need `Clone + PartialEq + Default + 'static` semantics to honor the
/// clone/equality/default contracts below.
pub trait Value: Any {
    /// Fully qualified name of the concrete type.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Coarse category of this value.
    fn kind(&self) -> Kind;

    /// Structural classification for path traversal.
    fn shape(&self) -> Shape<'_>;

    /// Mutable structural classification for path traversal.
    fn shape_mut(&mut self) -> ShapeMut<'_>;

    /// Owned deep copy behind a fresh `Box`.
    fn clone_value(&self) -> Box<dyn Value>;

    /// Deep equality: `true` iff `other` has the identical runtime type and
    /// compares equal.
    fn value_eq(&self, other: &dyn Value) -> bool;

    /// Whether this value is structurally equal to the default value of its
    /// own type (`None` for references, `Default::default()` otherwise).
    fn is_default(&self) -> bool;

    /// Replace this value with `value`, requiring exact runtime type
    /// identity. No numeric widening, no other coercion.
    fn assign(&mut self, value: Box<dyn Value>) -> Result<(), AssignError>;
}

// Resolution results are routinely formatted with {:?}; the value itself is
// opaque at this layer, so show the concrete type.
impl fmt::Debug for dyn Value + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self.type_name())
    }
}

/// Type-checked dynamic write used by `assign` impls.
///
/// Downcasts `value` to `T` and moves it into `slot`; on type mismatch the
/// slot is left untouched and both type names are reported.
pub fn assign_downcast<T: Value + Sized>(
    slot: &mut T,
    value: Box<dyn Value>,
) -> Result<(), AssignError> {
    let actual = value.type_name();
    match value.into_any().downcast::<T>() {
        Ok(v) => {
            *slot = *v;
            Ok(())
        }
        Err(_) => Err(AssignError {
            expected: std::any::type_name::<T>(),
            actual,
        }),
    }
}

/// True when `value` is structurally equal to the default value of its own
/// type. References count as default only when absent.
pub fn is_default_value(value: &dyn Value) -> bool {
    value.is_default()
}

/// True when `value` is record-like: a record held by value, or a non-nil
/// reference to one.
pub fn is_record(value: &dyn Value) -> bool {
    matches!(value.shape(), Shape::Record(_) | Shape::Reference(Some(_)))
}

macro_rules! impl_scalar_value {
    ($($ty:ty => $kind:expr),+ $(,)?) => {$(
        impl Typed for $ty {
            const IS_RECORD: bool = false;
        }

        impl Value for $ty {
            fn type_name(&self) -> &'static str {
                std::any::type_name::<$ty>()
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn Any> {
                self
            }

            fn kind(&self) -> Kind {
                $kind
            }

            fn shape(&self) -> Shape<'_> {
                Shape::Scalar
            }

            fn shape_mut(&mut self) -> ShapeMut<'_> {
                ShapeMut::Scalar
            }

            fn clone_value(&self) -> Box<dyn Value> {
                Box::new(self.clone())
            }

            fn value_eq(&self, other: &dyn Value) -> bool {
                other.as_any().downcast_ref::<$ty>().is_some_and(|o| self == o)
            }

            fn is_default(&self) -> bool {
                *self == <$ty>::default()
            }

            fn assign(&mut self, value: Box<dyn Value>) -> Result<(), AssignError> {
                assign_downcast(self, value)
            }
        }
    )+};
}

impl_scalar_value! {
    bool => Kind::Bool,
    char => Kind::Char,
    i8 => Kind::Int,
    i16 => Kind::Int,
    i32 => Kind::Int,
    i64 => Kind::Int,
    i128 => Kind::Int,
    isize => Kind::Int,
    u8 => Kind::Uint,
    u16 => Kind::Uint,
    u32 => Kind::Uint,
    u64 => Kind::Uint,
    u128 => Kind::Uint,
    usize => Kind::Uint,
    f32 => Kind::Float,
    f64 => Kind::Float,
    String => Kind::String,
}

impl<T: 'static> Typed for Vec<T> {
    const IS_RECORD: bool = false;
}

// Collections are opaque leaves: no element addressing by path.
impl<T> Value for Vec<T>
where
    T: Clone + PartialEq + 'static,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Vec<T>>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn kind(&self) -> Kind {
        Kind::List
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Scalar
    }

    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other
            .as_any()
            .downcast_ref::<Vec<T>>()
            .is_some_and(|o| self == o)
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, value: Box<dyn Value>) -> Result<(), AssignError> {
        assign_downcast(self, value)
    }
}

impl<K: 'static, V: 'static> Typed for HashMap<K, V> {
    const IS_RECORD: bool = false;
}

impl<K, V> Value for HashMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: PartialEq + Clone + 'static,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<HashMap<K, V>>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Scalar
    }

    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other
            .as_any()
            .downcast_ref::<HashMap<K, V>>()
            .is_some_and(|o| self == o)
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, value: Box<dyn Value>) -> Result<(), AssignError> {
        assign_downcast(self, value)
    }
}

impl<T: Typed> Typed for Option<T> {
    const IS_RECORD: bool = false;
}

/// `Option<T>` is the nilable reference. When `T` is a record type a `None`
/// classifies as `Shape::Reference(None)` (descending into it is a
/// `NilReference` failure); when `T` is a scalar the whole option stays an
/// opaque leaf.
impl<T> Value for Option<T>
where
    T: Value + Typed + Clone + PartialEq,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Option<T>>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn kind(&self) -> Kind {
        Kind::Reference
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(v) => match v.shape() {
                Shape::Record(r) => Shape::Reference(Some(r)),
                _ => Shape::Scalar,
            },
            None if T::IS_RECORD => Shape::Reference(None),
            None => Shape::Scalar,
        }
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        match self {
            Some(v) => match v.shape_mut() {
                ShapeMut::Record(r) => ShapeMut::Reference(Some(r)),
                _ => ShapeMut::Scalar,
            },
            None if T::IS_RECORD => ShapeMut::Reference(None),
            None => ShapeMut::Scalar,
        }
    }

    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other
            .as_any()
            .downcast_ref::<Option<T>>()
            .is_some_and(|o| self == o)
    }

    fn is_default(&self) -> bool {
        self.is_none()
    }

    fn assign(&mut self, value: Box<dyn Value>) -> Result<(), AssignError> {
        assign_downcast(self, value)
    }
}
