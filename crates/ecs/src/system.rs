use std::fmt;

use crate::combinatorics::{Combinations, Permutations};
use crate::component::ComponentSet;
use crate::entity::Entity;

/// Filter applied to every candidate entity before tuples are formed.
pub type Predicate = Box<dyn Fn(&Entity) -> bool>;

/// Whether the order of entities inside a tuple matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// `(a, b)` and `(b, a)` are the same tuple; each k-subset is processed once.
    Combinations,
    /// Every ordering is processed; each ordered k-tuple is processed once.
    Permutations,
}

impl From<bool> for Symmetry {
    fn from(is_symmetric: bool) -> Self {
        if is_symmetric {
            Self::Combinations
        } else {
            Self::Permutations
        }
    }
}

/// Errors from system construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("system `{system}` must take at least one entity per invocation")]
    ZeroArity { system: &'static str },
}

/// A combinatorial dispatcher: applies `action` to every qualifying tuple of
/// `arity` entities.
///
/// Given a sequence of entities, the system keeps those accepted by its
/// predicate, forms every k-combination (or k-permutation) of them in
/// lexicographic order of the input sequence, and calls the action once per
/// tuple. Results come back in generation order. Fewer matching entities than
/// `arity` simply produces no tuples.
///
/// The action also receives a context value that is not counted in the arity,
/// used for per-call parameters such as the camera.
pub struct System<A> {
    name: &'static str,
    arity: usize,
    symmetry: Symmetry,
    predicate: Predicate,
    action: A,
}

impl<A> System<A> {
    /// Create a system with an accept-all predicate.
    pub fn new(
        name: &'static str,
        arity: usize,
        symmetry: Symmetry,
        action: A,
    ) -> Result<Self, ConfigurationError> {
        if arity == 0 {
            return Err(ConfigurationError::ZeroArity { system: name });
        }
        Ok(Self::with_fixed_arity(name, arity, symmetry, action))
    }

    /// A system whose action takes one entity at a time.
    pub fn unary(name: &'static str, action: A) -> Self {
        Self::with_fixed_arity(name, 1, Symmetry::Combinations, action)
    }

    /// A system whose action takes two entities at a time.
    pub fn pairwise(name: &'static str, symmetry: Symmetry, action: A) -> Self {
        Self::with_fixed_arity(name, 2, symmetry, action)
    }

    fn with_fixed_arity(name: &'static str, arity: usize, symmetry: Symmetry, action: A) -> Self {
        Self {
            name,
            arity,
            symmetry,
            predicate: Box::new(|_| true),
            action,
        }
    }

    /// Replace the predicate.
    pub fn with_predicate(mut self, predicate: impl Fn(&Entity) -> bool + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    /// Only accept entities carrying every component in `required`.
    pub fn requiring(self, required: ComponentSet) -> Self {
        self.with_predicate(move |entity| entity.has(required))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    pub fn accepts(&self, entity: &Entity) -> bool {
        (self.predicate)(entity)
    }

    fn tuples(&self, n: usize) -> Box<dyn Iterator<Item = Vec<usize>>> {
        match self.symmetry {
            Symmetry::Combinations => Box::new(Combinations::new(n, self.arity)),
            Symmetry::Permutations => Box::new(Permutations::new(n, self.arity)),
        }
    }

    /// Apply the action to every qualifying tuple, with shared access.
    pub fn invoke<'e, C, R>(&self, entities: impl IntoIterator<Item = &'e Entity>, ctx: &C) -> Vec<R>
    where
        A: Fn(&[&Entity], &C) -> R,
        C: ?Sized,
    {
        let matched: Vec<&Entity> = entities
            .into_iter()
            .filter(|entity| self.accepts(entity))
            .collect();

        let results: Vec<R> = self
            .tuples(matched.len())
            .map(|tuple| {
                let picked: Vec<&Entity> = tuple.iter().map(|&i| matched[i]).collect();
                (self.action)(picked.as_slice(), ctx)
            })
            .collect();

        tracing::trace!(
            system = self.name,
            matched = matched.len(),
            invocations = results.len(),
            "system invoked"
        );
        results
    }

    /// Apply the action to every qualifying tuple, with mutable access.
    ///
    /// A tuple never holds the same entity twice, so each call receives
    /// disjoint mutable borrows. Unary systems borrow each entity in place.
    pub fn invoke_mut<'e, C, R>(
        &self,
        entities: impl IntoIterator<Item = &'e mut Entity>,
        ctx: &C,
    ) -> Vec<R>
    where
        A: Fn(&mut [&mut Entity], &C) -> R,
        C: ?Sized,
    {
        let mut matched: Vec<&mut Entity> = entities
            .into_iter()
            .filter(|entity| self.accepts(entity))
            .collect();

        let mut results = Vec::new();
        if self.arity == 1 {
            results.extend(
                matched
                    .iter_mut()
                    .map(|entity| (self.action)(std::slice::from_mut(entity), ctx)),
            );
        } else {
            for tuple in self.tuples(matched.len()) {
                let mut slots: Vec<Option<&mut Entity>> =
                    (0..tuple.len()).map(|_| None).collect();
                for (index, entity) in matched.iter_mut().enumerate() {
                    if let Some(slot) = tuple.iter().position(|&t| t == index) {
                        slots[slot] = Some(&mut **entity);
                    }
                }
                let mut picked: Vec<&mut Entity> = slots.into_iter().flatten().collect();
                results.push((self.action)(picked.as_mut_slice(), ctx));
            }
        }

        tracing::trace!(
            system = self.name,
            matched = matched.len(),
            invocations = results.len(),
            "system invoked"
        );
        results
    }
}

impl<A> fmt::Debug for System<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("symmetry", &self.symmetry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentKind, Velocity};
    use paperplane_common::EntityId;

    fn ids(entities: &[&Entity]) -> Vec<EntityId> {
        entities.iter().map(|e| e.id()).collect()
    }

    fn pair_ids(tuple: &[&Entity], _: &()) -> Vec<EntityId> {
        ids(tuple)
    }

    fn entities(n: usize) -> Vec<Entity> {
        (0..n).map(|_| Entity::new()).collect()
    }

    #[test]
    fn zero_arity_is_rejected() {
        let err = System::new("empty", 0, Symmetry::Combinations, pair_ids).unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroArity { system: "empty" });
    }

    #[test]
    fn symmetric_pairs_of_four() {
        let es = entities(4);
        let system = System::new("pairs", 2, Symmetry::Combinations, pair_ids).unwrap();
        assert_eq!(system.invoke(&es, &()).len(), 6);
    }

    #[test]
    fn ordered_pairs_of_four() {
        let es = entities(4);
        let system = System::new("pairs", 2, Symmetry::Permutations, pair_ids).unwrap();
        assert_eq!(system.invoke(&es, &()).len(), 12);
    }

    #[test]
    fn tuples_follow_input_order() {
        let es = entities(3);
        let system = System::new("pairs", 2, Symmetry::Combinations, pair_ids).unwrap();
        let got = system.invoke(es.iter().rev(), &());
        assert_eq!(got[0], vec![es[2].id(), es[1].id()]);
        assert_eq!(got[1], vec![es[2].id(), es[0].id()]);
        assert_eq!(got[2], vec![es[1].id(), es[0].id()]);
    }

    #[test]
    fn unary_system_visits_each_entity_once() {
        let es = entities(5);
        let system = System::new("each", 1, Symmetry::Permutations, pair_ids).unwrap();
        let visited: Vec<EntityId> = system.invoke(&es, &()).into_iter().flatten().collect();
        assert_eq!(visited, es.iter().map(Entity::id).collect::<Vec<_>>());
    }

    #[test]
    fn predicate_filters_before_pairing() {
        let mut es = entities(5);
        es[1] = Entity::new().with_velocity(Velocity::default());
        es[3] = Entity::new().with_velocity(Velocity::default());
        let system = System::new("moving-pairs", 2, Symmetry::Combinations, pair_ids)
            .unwrap()
            .requiring(ComponentSet::of(&[ComponentKind::Velocity]));
        let got = system.invoke(&es, &());
        assert_eq!(got, vec![vec![es[1].id(), es[3].id()]]);
    }

    #[test]
    fn too_few_matches_is_empty_not_error() {
        let es = entities(1);
        let calls = std::cell::Cell::new(0);
        let system = System::new(
            "pairs",
            2,
            Symmetry::Combinations,
            |_: &[&Entity], calls: &std::cell::Cell<u32>| calls.set(calls.get() + 1),
        )
        .unwrap();
        assert!(system.invoke(&es, &calls).is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn action_receives_exactly_arity_entities() {
        let es = entities(5);
        let system = System::new(
            "triples",
            3,
            Symmetry::Combinations,
            |tuple: &[&Entity], _: &()| tuple.len(),
        )
        .unwrap();
        let sizes = system.invoke(&es, &());
        assert_eq!(sizes.len(), 10);
        assert!(sizes.iter().all(|&len| len == 3));
    }

    #[test]
    fn context_is_forwarded() {
        let es = entities(2);
        let system = System::new(
            "scaled",
            1,
            Symmetry::Combinations,
            |_: &[&Entity], scale: &f32| *scale * 2.0,
        )
        .unwrap();
        assert_eq!(system.invoke(&es, &1.5), vec![3.0, 3.0]);
    }

    #[test]
    fn invoke_mut_updates_entities() {
        let mut es: Vec<Entity> = (0..3)
            .map(|_| Entity::new().with_velocity(Velocity::default()))
            .collect();
        let system = System::new(
            "spin",
            1,
            Symmetry::Combinations,
            |tuple: &mut [&mut Entity], step: &f32| {
                if let Some(t) = tuple[0].transform.as_mut() {
                    t.rotation += *step;
                }
            },
        )
        .unwrap();
        assert_eq!(system.invoke_mut(es.iter_mut(), &10.0).len(), 3);
        assert!(es.iter().all(|e| e.transform.unwrap().rotation == 10.0));
    }

    #[test]
    fn unary_invoke_mut_calls_once_per_entity_in_order() {
        let mut es = entities(5);
        let expected: Vec<EntityId> = es.iter().rev().map(Entity::id).collect();
        let calls = std::cell::Cell::new(0);
        let system = System::new(
            "each-mut",
            1,
            Symmetry::Permutations,
            |tuple: &mut [&mut Entity], calls: &std::cell::Cell<u32>| {
                calls.set(calls.get() + 1);
                assert_eq!(tuple.len(), 1);
                tuple[0].id()
            },
        )
        .unwrap();
        assert_eq!(system.invoke_mut(es.iter_mut().rev(), &calls), expected);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn invoke_mut_preserves_permutation_order() {
        let mut es = entities(3);
        let expected: Vec<(EntityId, EntityId)> = {
            let system = System::new("pairs", 2, Symmetry::Permutations, pair_ids).unwrap();
            system
                .invoke(&es, &())
                .into_iter()
                .map(|pair| (pair[0], pair[1]))
                .collect()
        };
        let system = System::new(
            "pairs-mut",
            2,
            Symmetry::Permutations,
            |tuple: &mut [&mut Entity], _: &()| (tuple[0].id(), tuple[1].id()),
        )
        .unwrap();
        assert_eq!(system.invoke_mut(es.iter_mut(), &()), expected);
    }

    #[test]
    fn fixed_arity_constructors() {
        let unary = System::unary("each", pair_ids);
        assert_eq!(unary.arity(), 1);
        let pairs = System::pairwise("pairs", Symmetry::Permutations, pair_ids);
        assert_eq!((pairs.arity(), pairs.symmetry()), (2, Symmetry::Permutations));
        assert_eq!(pairs.invoke(&entities(3), &()).len(), 6);
    }

    #[test]
    fn symmetry_from_flag() {
        assert_eq!(Symmetry::from(true), Symmetry::Combinations);
        assert_eq!(Symmetry::from(false), Symmetry::Permutations);
    }
}
