use super::params::{TraitDetails, TraitParameters};
use super::value::TraitValue;
use crate::rng::Rng;
use neat_error::{NeatError, NeatResult};
use std::collections::BTreeMap;

/// A single trait instance attached to a gene or genome: its current value,
/// plus the conditional-activation gate copied from its [`TraitParameters`]
/// at init time so later operations don't need the parameter map at hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Trait {
    pub value: TraitValue,
    pub dep_key: Option<String>,
    pub dep_values: Vec<TraitValue>,
}

impl Trait {
    fn is_active(&self, owner: &TraitMap, other: Option<&TraitMap>) -> bool {
        let Some(key) = &self.dep_key else {
            return true;
        };
        let mine = owner.get(key).map(|t| &t.value);
        let theirs = other.and_then(|o| o.get(key)).map(|t| &t.value);

        let mine_ok = mine.is_some_and(|v| self.dep_values.iter().any(|d| d == v));
        match other {
            None => mine_ok,
            Some(_) => {
                mine_ok && theirs.is_some_and(|v| self.dep_values.iter().any(|d| d == v))
            }
        }
    }
}

/// Named attributes attached to a gene or a genome. Ordered so that
/// iteration (and therefore any operation that folds over the map) is
/// deterministic given a deterministic [`Rng`].
pub type TraitMap = BTreeMap<String, Trait>;
pub type TraitParamMap = BTreeMap<String, TraitParameters>;

/// Draw an initial value for every trait named in `params`, honoring each
/// trait's `dep_key`/`dep_values` gate: a dependent trait is skipped
/// entirely (not inserted) unless the trait it depends on is already
/// present with one of the required values. Independent traits (no
/// `dep_key`) are always drawn first so a dependent trait's lookup sees the
/// value it depends on rather than racing it - matching `mutate_traits` and
/// `trait_distances`, which gate on [`Trait::is_active`]/[`TraitParameters::is_active`]
/// the same way.
///
/// Fatal (programmer-fault) if a categorical trait's `set` is empty - there
/// is nothing a retry can do about a parameter the caller never populated.
pub fn init_traits(params: &TraitParamMap, rng: &mut Rng) -> NeatResult<TraitMap> {
    let mut traits = TraitMap::new();

    let (independent, dependent): (Vec<_>, Vec<_>) =
        params.iter().partition(|(_, tp)| tp.dep_key.is_none());

    for (name, tp) in independent.into_iter().chain(dependent) {
        if !tp.is_active(|key| traits.get(key).map(|t| t.value.clone())) {
            continue;
        }

        let value = draw_initial_value(name, tp, rng)?;
        traits.insert(
            name.clone(),
            Trait {
                value,
                dep_key: tp.dep_key.clone(),
                dep_values: tp.dep_values.clone(),
            },
        );
    }

    Ok(traits)
}

fn draw_initial_value(name: &str, tp: &TraitParameters, rng: &mut Rng) -> NeatResult<TraitValue> {
    Ok(match &tp.details {
        TraitDetails::Int { min, max, .. } => TraitValue::Int(rng.rand_int(*min, *max)),
        TraitDetails::Float { min, max, .. } => {
            let x = rng.rand_float();
            TraitValue::Float(min + x * (max - min))
        }
        TraitDetails::Str { set, probs } => {
            if set.is_empty() {
                return Err(NeatError::Trait {
                    message: format!("trait '{name}': empty set of string traits").into(),
                });
            }
            let idx = rng.roulette(&resize_probs(probs, set.len()));
            TraitValue::Str(set[idx].clone())
        }
        TraitDetails::IntSet { set, probs } => {
            if set.is_empty() {
                return Err(NeatError::Trait {
                    message: format!("trait '{name}': empty set of int traits").into(),
                });
            }
            let idx = rng.roulette(&resize_probs(probs, set.len()));
            TraitValue::IntSet(set[idx])
        }
        TraitDetails::FloatSet { set, probs } => {
            if set.is_empty() {
                return Err(NeatError::Trait {
                    message: format!("trait '{name}': empty set of float traits").into(),
                });
            }
            let idx = rng.roulette(&resize_probs(probs, set.len()));
            TraitValue::FloatSet(set[idx])
        }
        #[cfg(feature = "object-traits")]
        TraitDetails::Object { producer } => TraitValue::Extern(producer()),
    })
}

/// Resizes `probs` to `len`, appending zeros - mirrors the historical
/// behavior where a shorter probability vector than the set it weights is
/// padded rather than rejected.
fn resize_probs(probs: &[f64], len: usize) -> Vec<f64> {
    let mut out = probs.to_vec();
    out.resize(len, 0.0);
    out
}

/// Mate `mine` with `other`'s traits in place, for every trait name present
/// in both. Fails fast if the same trait name holds values of different
/// kinds in the two genomes - that can only happen if the two genomes were
/// built from incompatible parameter sets.
pub fn mate_traits(mine: &mut TraitMap, other: &TraitMap, rng: &mut Rng) -> NeatResult<()> {
    for (name, their_trait) in other {
        let Some(my_trait) = mine.get(name) else {
            continue;
        };

        if my_trait.value.kind() != their_trait.value.kind() {
            return Err(NeatError::Trait {
                message: format!("trait '{name}': types of traits don't match").into(),
            });
        }

        let mated = if rng.rand_float() < 0.5 {
            // pick either one
            if rng.rand_float() < 0.5 {
                my_trait.value.clone()
            } else {
                their_trait.value.clone()
            }
        } else {
            average_or_either(&my_trait.value, &their_trait.value, rng)
        };

        mine.get_mut(name).unwrap().value = mated;
    }

    Ok(())
}

fn average_or_either(mine: &TraitValue, theirs: &TraitValue, rng: &mut Rng) -> TraitValue {
    match (mine, theirs) {
        (TraitValue::Int(a), TraitValue::Int(b)) => TraitValue::Int((a + b) / 2),
        (TraitValue::Float(a), TraitValue::Float(b)) => TraitValue::Float((a + b) / 2.0),
        #[cfg(feature = "object-traits")]
        (TraitValue::Extern(a), TraitValue::Extern(b)) => TraitValue::Extern(a.mate(b)),
        _ => {
            if rng.rand_float() < 0.5 {
                mine.clone()
            } else {
                theirs.clone()
            }
        }
    }
}

/// Mutate every trait gated "on" in `traits`, according to `params`.
/// Returns whether any trait's stored value actually changed.
pub fn mutate_traits(traits: &mut TraitMap, params: &TraitParamMap, rng: &mut Rng) -> bool {
    let snapshot = traits.clone();
    let mut did_mutate = false;

    for (name, tp) in params {
        let Some(current) = traits.get(name) else {
            continue;
        };
        if !current.is_active(&snapshot, None) {
            continue;
        }
        if rng.rand_float() >= tp.mutation_probability {
            continue;
        }

        let new_value = match &tp.details {
            TraitDetails::Int {
                min,
                max,
                mut_power,
                mut_replace_prob,
            } => {
                let TraitValue::Int(cur) = current.value else {
                    unreachable!()
                };
                if rng.rand_float() < *mut_replace_prob {
                    TraitValue::Int(rng.rand_int(*min, *max))
                } else {
                    let delta = rng.rand_int(-mut_power, *mut_power);
                    TraitValue::Int((cur + delta).clamp(*min, *max))
                }
            }
            TraitDetails::Float {
                min,
                max,
                mut_power,
                mut_replace_prob,
            } => {
                let TraitValue::Float(cur) = current.value else {
                    unreachable!()
                };
                if rng.rand_float() < *mut_replace_prob {
                    let x = rng.rand_float();
                    TraitValue::Float(min + x * (max - min))
                } else {
                    let next = cur + rng.rand_float_signed() * mut_power;
                    TraitValue::Float(next.clamp(*min, *max))
                }
            }
            TraitDetails::Str { set, probs } => {
                if set.is_empty() {
                    continue;
                }
                let idx = rng.roulette(&resize_probs(probs, set.len()));
                TraitValue::Str(set[idx].clone())
            }
            TraitDetails::IntSet { set, probs } => {
                if set.is_empty() {
                    continue;
                }
                let idx = rng.roulette(&resize_probs(probs, set.len()));
                TraitValue::IntSet(set[idx])
            }
            TraitDetails::FloatSet { set, probs } => {
                if set.is_empty() {
                    continue;
                }
                let idx = rng.roulette(&resize_probs(probs, set.len()));
                TraitValue::FloatSet(set[idx])
            }
            #[cfg(feature = "object-traits")]
            TraitDetails::Object { .. } => {
                let TraitValue::Extern(cur) = &current.value else {
                    unreachable!()
                };
                did_mutate = true;
                TraitValue::Extern(cur.mutate())
            }
        };

        let changed = new_value != current.value;
        traits.get_mut(name).unwrap().value = new_value;
        did_mutate |= changed;
    }

    did_mutate
}

/// Distance contribution for every trait present in both maps, gated by
/// dep-activation on both sides.
pub fn trait_distances(mine: &TraitMap, other: &TraitMap) -> NeatResult<f64> {
    let mut total = 0.0;

    for (name, their_trait) in other {
        let Some(my_trait) = mine.get(name) else {
            continue;
        };

        if my_trait.value.kind() != their_trait.value.kind() {
            return Err(NeatError::Trait {
                message: format!("trait '{name}': types of traits don't match").into(),
            });
        }

        if !their_trait.is_active(other, Some(mine)) {
            continue;
        }

        total += match (&my_trait.value, &their_trait.value) {
            (TraitValue::Int(a), TraitValue::Int(b)) => (a - b).abs() as f64,
            (TraitValue::Float(a), TraitValue::Float(b)) => (a - b).abs(),
            (TraitValue::Str(a), TraitValue::Str(b)) => {
                if a == b {
                    0.0
                } else {
                    1.0
                }
            }
            (TraitValue::IntSet(a), TraitValue::IntSet(b)) => (a.value - b.value).abs() as f64,
            (TraitValue::FloatSet(a), TraitValue::FloatSet(b)) => (a.value - b.value).abs(),
            #[cfg(feature = "object-traits")]
            (TraitValue::Extern(a), TraitValue::Extern(b)) => a.distance_to(b),
            _ => 0.0,
        };
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_param(min: f64, max: f64) -> TraitParameters {
        TraitParameters::numeric_float(min, max, 0.5, 0.1).with_mutation_probability(1.0)
    }

    #[test]
    fn init_traits_preserved_without_mutation() {
        let mut params = TraitParamMap::new();
        params.insert("weight_scale".into(), float_param(0.0, 1.0));

        let mut rng = Rng::seed(11);
        let traits = init_traits(&params, &mut rng).unwrap();
        let snapshot = traits.clone();

        assert_eq!(traits, snapshot);
    }

    #[test]
    fn dependent_trait_gated_off_is_not_initialized() {
        let mut params = TraitParamMap::new();
        params.insert(
            "a".into(),
            TraitParameters::numeric_int(2, 2, 1, 0.0).with_mutation_probability(0.0),
        );
        params.insert(
            "b".into(),
            float_param(0.0, 1.0).with_dependency("a", vec![TraitValue::Int(1)]),
        );

        let mut rng = Rng::seed(7);
        let traits = init_traits(&params, &mut rng).unwrap();

        assert_eq!(traits["a"].value, TraitValue::Int(2));
        assert!(!traits.contains_key("b"));
    }

    #[test]
    fn dependent_trait_gated_on_is_initialized() {
        let mut params = TraitParamMap::new();
        params.insert(
            "a".into(),
            TraitParameters::numeric_int(1, 1, 1, 0.0).with_mutation_probability(0.0),
        );
        params.insert(
            "b".into(),
            float_param(0.0, 1.0).with_dependency("a", vec![TraitValue::Int(1)]),
        );

        let mut rng = Rng::seed(8);
        let traits = init_traits(&params, &mut rng).unwrap();

        assert_eq!(traits["a"].value, TraitValue::Int(1));
        assert!(traits.contains_key("b"));
    }

    #[test]
    fn dependent_trait_gated_off_is_left_unchanged() {
        let mut params = TraitParamMap::new();
        params.insert(
            "a".into(),
            TraitParameters::numeric_int(0, 5, 1, 0.5).with_mutation_probability(0.0),
        );
        params.insert(
            "b".into(),
            float_param(0.0, 1.0).with_dependency("a", vec![TraitValue::Int(1)]),
        );

        let mut traits = TraitMap::new();
        traits.insert(
            "a".into(),
            Trait {
                value: TraitValue::Int(2),
                dep_key: None,
                dep_values: vec![],
            },
        );
        traits.insert(
            "b".into(),
            Trait {
                value: TraitValue::Float(0.42),
                dep_key: Some("a".into()),
                dep_values: vec![TraitValue::Int(1)],
            },
        );

        let mut rng = Rng::seed(1);
        mutate_traits(&mut traits, &params, &mut rng);

        assert_eq!(traits["b"].value, TraitValue::Float(0.42));
    }

    #[test]
    fn mismatched_types_fail_fast() {
        let mut mine = TraitMap::new();
        mine.insert(
            "x".into(),
            Trait {
                value: TraitValue::Int(1),
                dep_key: None,
                dep_values: vec![],
            },
        );
        let mut other = TraitMap::new();
        other.insert(
            "x".into(),
            Trait {
                value: TraitValue::Float(1.0),
                dep_key: None,
                dep_values: vec![],
            },
        );

        assert!(mate_traits(&mut mine, &other, &mut Rng::seed(1)).is_err());
        assert!(trait_distances(&mine, &other).is_err());
    }
}
