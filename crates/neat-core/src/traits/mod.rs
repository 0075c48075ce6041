//! Dynamically-typed, parameter-driven attributes attached to genes and
//! genomes. A `TraitParameters` record describes how to init, mutate, and
//! compare a named attribute; the generic algorithms in this module apply
//! to whatever genes or genomes carry a [`TraitMap`], independent of the
//! concrete gene type.

mod params;
mod trait_;
mod value;

#[cfg(feature = "object-traits")]
pub use params::FnExternTrait;
pub use params::{TraitDetails, TraitParameters};
pub use trait_::{
    Trait, TraitMap, TraitParamMap, init_traits, mate_traits, mutate_traits, trait_distances,
};
#[cfg(feature = "object-traits")]
pub use value::ExternTrait;
#[cfg(feature = "object-traits")]
pub use value::ExternValue;
pub use value::{FloatSetElement, IntSetElement, TraitValue};
