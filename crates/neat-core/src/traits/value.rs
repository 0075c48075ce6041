#[cfg(feature = "object-traits")]
use std::fmt::{self, Debug, Formatter};
#[cfg(feature = "object-traits")]
use std::sync::Arc;

/// A set element carrying an integer payload used for distance computation
/// (`IntSetElement{value:int}` in the data model).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntSetElement {
    pub value: i32,
}

/// A set element carrying a float payload (`FloatSetElement{value:double}`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatSetElement {
    pub value: f64,
}

/// An opaque, foreign-owned trait value. Mate/mutate/distance are delegated
/// entirely to the provided closures; this is the seam through which a host
/// language or external system can plug its own trait semantics into the
/// otherwise closed `TraitValue` sum type. Gated behind the `object-traits`
/// feature - most hosts never need it, and it pulls in `Arc<dyn _>` dispatch
/// the rest of the trait system otherwise avoids.
#[cfg(feature = "object-traits")]
#[derive(Clone)]
pub struct ExternValue {
    inner: Arc<dyn ExternTrait>,
}

#[cfg(feature = "object-traits")]
impl ExternValue {
    pub fn new(inner: Arc<dyn ExternTrait>) -> Self {
        ExternValue { inner }
    }

    pub fn mate(&self, other: &ExternValue) -> ExternValue {
        self.inner.mate(other.inner.as_ref())
    }

    pub fn mutate(&self) -> ExternValue {
        self.inner.mutate()
    }

    pub fn distance_to(&self, other: &ExternValue) -> f64 {
        self.inner.distance_to(other.inner.as_ref())
    }
}

#[cfg(feature = "object-traits")]
impl Debug for ExternValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ExternValue(..)")
    }
}

#[cfg(feature = "object-traits")]
impl PartialEq for ExternValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Implemented by a foreign object that wants to participate as a trait
/// value. See [`crate::traits::params::TraitDetails::Object`] for how a new
/// instance is produced during `InitTraits`.
#[cfg(feature = "object-traits")]
pub trait ExternTrait: Send + Sync {
    fn mate(&self, other: &dyn ExternTrait) -> ExternValue;
    fn mutate(&self) -> ExternValue;
    fn distance_to(&self, other: &dyn ExternTrait) -> f64;
}

/// A tagged union over every value a [`crate::traits::trait_::Trait`] can
/// hold. Replaces the dynamic typing of the original trait system with an
/// explicit sum type; every trait operation matches on this enum rather
/// than doing runtime type inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum TraitValue {
    Int(i32),
    Float(f64),
    Str(String),
    IntSet(IntSetElement),
    FloatSet(FloatSetElement),
    #[cfg(feature = "object-traits")]
    Extern(ExternValue),
}

impl TraitValue {
    /// The type tag, used to check that two values being mated or compared
    /// agree in kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TraitValue::Int(_) => "int",
            TraitValue::Float(_) => "float",
            TraitValue::Str(_) => "str",
            TraitValue::IntSet(_) => "intset",
            TraitValue::FloatSet(_) => "floatset",
            #[cfg(feature = "object-traits")]
            TraitValue::Extern(_) => "object",
        }
    }
}
