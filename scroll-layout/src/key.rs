#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Map keyed by element identity. Used for the parked pool.
#[cfg(feature = "std")]
pub(crate) type IdentityMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type IdentityMap<K, V> = BTreeMap<K, V>;

/// Bound for element handles stored by the engine.
///
/// Elements are cheap handles (ids, `Rc`s, entity keys) compared by identity. With `std` they
/// must be `Hash + Eq`, without it `Ord`.
#[cfg(feature = "std")]
pub trait ElementKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<E: core::hash::Hash + Eq + Clone> ElementKey for E {}

#[cfg(not(feature = "std"))]
pub trait ElementKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<E: Ord + Clone> ElementKey for E {}
