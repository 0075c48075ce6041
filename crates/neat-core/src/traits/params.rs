#[cfg(feature = "object-traits")]
use super::value::{ExternTrait, ExternValue};
use super::value::{FloatSetElement, IntSetElement, TraitValue};
#[cfg(feature = "object-traits")]
use std::sync::Arc;

/// Type-specific configuration for a trait. One variant per `type` named in
/// the data model (`int | float | str | intset | floatset | object`).
#[derive(Clone)]
pub enum TraitDetails {
    Int {
        min: i32,
        max: i32,
        mut_power: i32,
        mut_replace_prob: f64,
    },
    Float {
        min: f64,
        max: f64,
        mut_power: f64,
        mut_replace_prob: f64,
    },
    Str {
        set: Vec<String>,
        probs: Vec<f64>,
    },
    IntSet {
        set: Vec<IntSetElement>,
        probs: Vec<f64>,
    },
    FloatSet {
        set: Vec<FloatSetElement>,
        probs: Vec<f64>,
    },
    /// `producer` is invoked once per `InitTraits` call to draw a fresh
    /// instance; mate/mutate/distance are then delegated to the value
    /// itself (see [`ExternTrait`]).
    #[cfg(feature = "object-traits")]
    Object {
        producer: Arc<dyn Fn() -> ExternValue + Send + Sync>,
    },
}

/// Per-trait-name configuration: its type, type-specific details, the
/// probability it mutates when eligible, and an optional conditional
/// activation gate (`dep_key`/`dep_values`).
#[derive(Clone)]
pub struct TraitParameters {
    pub details: TraitDetails,
    pub mutation_probability: f64,
    pub dep_key: Option<String>,
    pub dep_values: Vec<TraitValue>,
}

impl TraitParameters {
    pub fn numeric_int(min: i32, max: i32, mut_power: i32, mut_replace_prob: f64) -> Self {
        TraitParameters {
            details: TraitDetails::Int {
                min,
                max,
                mut_power,
                mut_replace_prob,
            },
            mutation_probability: 0.0,
            dep_key: None,
            dep_values: Vec::new(),
        }
    }

    pub fn numeric_float(min: f64, max: f64, mut_power: f64, mut_replace_prob: f64) -> Self {
        TraitParameters {
            details: TraitDetails::Float {
                min,
                max,
                mut_power,
                mut_replace_prob,
            },
            mutation_probability: 0.0,
            dep_key: None,
            dep_values: Vec::new(),
        }
    }

    pub fn categorical_str(set: Vec<String>, probs: Vec<f64>) -> Self {
        TraitParameters {
            details: TraitDetails::Str { set, probs },
            mutation_probability: 0.0,
            dep_key: None,
            dep_values: Vec::new(),
        }
    }

    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    pub fn with_dependency(mut self, key: impl Into<String>, values: Vec<TraitValue>) -> Self {
        self.dep_key = Some(key.into());
        self.dep_values = values;
        self
    }

    /// Whether `it.dep_key`/`dep_values` gate is satisfied by the given
    /// lookup function (the current trait map of one, or both, genomes).
    pub fn is_active(&self, lookup: impl Fn(&str) -> Option<TraitValue>) -> bool {
        match &self.dep_key {
            None => true,
            Some(key) => match lookup(key) {
                Some(current) => self.dep_values.iter().any(|v| v == &current),
                None => false,
            },
        }
    }
}

/// Implement [`ExternTrait`] trivially so closures can be wrapped without
/// boilerplate in tests and examples.
#[cfg(feature = "object-traits")]
pub struct FnExternTrait<M, U, D> {
    pub mate: M,
    pub mutate: U,
    pub distance: D,
}

#[cfg(feature = "object-traits")]
impl<M, U, D> ExternTrait for FnExternTrait<M, U, D>
where
    M: Fn(&dyn ExternTrait) -> ExternValue + Send + Sync,
    U: Fn() -> ExternValue + Send + Sync,
    D: Fn(&dyn ExternTrait) -> f64 + Send + Sync,
{
    fn mate(&self, other: &dyn ExternTrait) -> ExternValue {
        (self.mate)(other)
    }

    fn mutate(&self) -> ExternValue {
        (self.mutate)()
    }

    fn distance_to(&self, other: &dyn ExternTrait) -> f64 {
        (self.distance)(other)
    }
}
