//! Selection policies deciding which animation plays next.
//!
//! Two policies share the [`SelectionPolicy`] interface:
//! - [`RandomSelection`] picks uniformly among all catalog names, repeats allowed.
//! - [`OrderedSelection`] walks the catalog's play order, wrapping at the end.
//!
//! The [`Selector`] resource holds whichever one the catalog calls for.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

use crate::resources::animationcatalog::AnimationCatalog;
use crate::resources::sequencerstate::SequencerState;

pub trait SelectionPolicy: Send + Sync {
    /// Choose the next animation name, or `None` when there is nothing to play.
    ///
    /// Policies may update bookkeeping kept in `state` (the play-order cursor)
    /// but must not touch the frame or loop counters.
    fn select_next<'c>(
        &mut self,
        catalog: &'c AnimationCatalog,
        state: &mut SequencerState,
    ) -> Option<&'c str>;
}

/// Uniform choice over every animation in the catalog.
#[derive(Debug, Clone)]
pub struct RandomSelection {
    rng: Rng,
}

impl RandomSelection {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}

impl Default for RandomSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPolicy for RandomSelection {
    fn select_next<'c>(
        &mut self,
        catalog: &'c AnimationCatalog,
        _state: &mut SequencerState,
    ) -> Option<&'c str> {
        let rows = catalog.rows();
        if rows.is_empty() {
            return None;
        }
        let idx = self.rng.usize(0..rows.len());
        Some(rows[idx].name.as_str())
    }
}

/// Cycles through the explicit play order.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedSelection;

impl SelectionPolicy for OrderedSelection {
    fn select_next<'c>(
        &mut self,
        catalog: &'c AnimationCatalog,
        state: &mut SequencerState,
    ) -> Option<&'c str> {
        let order = catalog.play_order();
        if order.is_empty() {
            return None;
        }
        if state.cursor >= order.len() {
            state.cursor = 0;
        }
        let name = order[state.cursor].as_str();
        state.cursor += 1;
        Some(name)
    }
}

/// The active selection policy.
#[derive(Resource)]
pub struct Selector(pub Box<dyn SelectionPolicy>);

impl Selector {
    /// Pick the policy the catalog asks for; `seed` makes random mode repeatable.
    pub fn for_catalog(catalog: &AnimationCatalog, seed: Option<u64>) -> Self {
        if catalog.is_random_mode() {
            let random = match seed {
                Some(seed) => RandomSelection::with_seed(seed),
                None => RandomSelection::new(),
            };
            Selector(Box::new(random))
        } else {
            Selector(Box::new(OrderedSelection))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationcatalog::AnimationRow;
    use rustc_hash::FxHashSet;

    fn catalog(order: &[&str]) -> AnimationCatalog {
        AnimationCatalog::new(
            vec![
                AnimationRow::new("a", 2, 0),
                AnimationRow::new("b", 3, 1),
                AnimationRow::new("c", 1, 2),
            ],
            order.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_ordered_cycles_and_wraps() {
        let catalog = catalog(&["a", "b", "c"]);
        let mut state = SequencerState::new();
        let mut policy = OrderedSelection;
        let picks: Vec<&str> = (0..7)
            .map(|_| policy.select_next(&catalog, &mut state).unwrap())
            .collect();
        assert_eq!(picks, ["a", "b", "c", "a", "b", "c", "a"]);
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_ordered_repeats_names_in_order() {
        let catalog = catalog(&["c", "c", "a"]);
        let mut state = SequencerState::new();
        let mut policy = OrderedSelection;
        let picks: Vec<&str> = (0..4)
            .map(|_| policy.select_next(&catalog, &mut state).unwrap())
            .collect();
        assert_eq!(picks, ["c", "c", "a", "c"]);
    }

    #[test]
    fn test_random_covers_every_name() {
        let catalog = catalog(&[]);
        let mut state = SequencerState::new();
        let mut policy = RandomSelection::with_seed(7);
        let seen: FxHashSet<&str> = (0..200)
            .map(|_| policy.select_next(&catalog, &mut state).unwrap())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_random_leaves_cursor_alone() {
        let catalog = catalog(&[]);
        let mut state = SequencerState::new();
        RandomSelection::with_seed(1).select_next(&catalog, &mut state);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_seeded_random_is_repeatable() {
        let catalog = catalog(&[]);
        let mut state = SequencerState::new();
        let mut first = RandomSelection::with_seed(42);
        let mut second = RandomSelection::with_seed(42);
        for _ in 0..20 {
            assert_eq!(
                first.select_next(&catalog, &mut state),
                second.select_next(&catalog, &mut state)
            );
        }
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        let empty = AnimationCatalog::default();
        let mut state = SequencerState::new();
        assert!(RandomSelection::new().select_next(&empty, &mut state).is_none());
        assert!(OrderedSelection.select_next(&empty, &mut state).is_none());
    }
}
