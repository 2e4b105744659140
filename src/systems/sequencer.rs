//! Animation sequencer.
//!
//! - [`advance`] is the per-tick state machine: it emits the cell to draw,
//!   moves to the next frame, counts completed passes, and asks the selection
//!   policy for a new animation once the minimum pass count is met.
//! - [`select_next`] starts whatever the policy picks from frame 0.
//! - [`sequencer_system`] runs [`advance`] against the world's resources and
//!   triggers [`AnimationSelected`] on every new selection.
//! - [`start_sequencer`] makes the initial selection before the first tick.
//!
//! # Tick rules
//!
//! For an active animation with `frames = N` and `min_loops = M`:
//! 1. Emit `(row, frame_index)`.
//! 2. `frame_index += 1`.
//! 3. If `frame_index == N`, `loop_count += 1`; then if `loop_count >= M`
//!    select the next animation, otherwise restart at frame 0.
//!
//! An empty catalog leaves the state idle and every tick emits nothing.

use bevy_ecs::prelude::*;
use log::trace;

use crate::events::animation::AnimationSelected;
use crate::resources::animationcatalog::AnimationCatalog;
use crate::resources::scene::Scene;
use crate::resources::selection::{SelectionPolicy, Selector};
use crate::resources::sequencerstate::{CurrentCell, SequencerState};
use crate::resources::spriteatlas::CellRef;
use crate::resources::tickclock::TickClock;

/// Result of one sequencer tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Step {
    /// Cell to draw this tick.
    pub cell: Option<CellRef>,
    /// The state now holds a freshly selected animation.
    pub selected: bool,
}

/// Reset the state onto the policy's next pick.
pub fn select_next(
    catalog: &AnimationCatalog,
    mut state: SequencerState,
    policy: &mut dyn SelectionPolicy,
) -> SequencerState {
    let name = policy.select_next(catalog, &mut state).map(str::to_owned);
    state.select(name);
    state
}

/// Run one tick of the state machine.
pub fn advance(
    catalog: &AnimationCatalog,
    mut state: SequencerState,
    policy: &mut dyn SelectionPolicy,
) -> (SequencerState, Step) {
    let Some(anim) = state.current.as_deref().and_then(|name| catalog.lookup(name)) else {
        return (state, Step::default());
    };

    let cell = CellRef {
        row: anim.row,
        frame: state.frame_index,
    };

    state.frame_index += 1;
    let mut selected = false;
    if state.frame_index >= anim.frames {
        state.loop_count += 1;
        if state.loop_count >= anim.min_loops {
            state = select_next(catalog, state, policy);
            selected = true;
        } else {
            state.frame_index = 0;
        }
    }

    (
        state,
        Step {
            cell: Some(cell),
            selected,
        },
    )
}

/// Run condition: the sequencer only drives the sprite scene.
pub fn scene_is_sprites(scene: Res<Scene>) -> bool {
    matches!(*scene, Scene::Sprites)
}

/// Advance the sequencer and publish the cell to draw.
///
/// Contract
/// - Reads [`AnimationCatalog`] and [`TickClock`].
/// - Replaces [`SequencerState`] with the next state and writes [`CurrentCell`].
/// - Triggers [`AnimationSelected`] when a new animation takes over; it starts
///   drawing on the next tick.
pub fn sequencer_system(
    mut commands: Commands,
    catalog: Res<AnimationCatalog>,
    clock: Res<TickClock>,
    mut state: ResMut<SequencerState>,
    mut selector: ResMut<Selector>,
    mut current: ResMut<CurrentCell>,
) {
    let (next, step) = advance(&catalog, std::mem::take(&mut *state), selector.0.as_mut());
    trace!(
        "tick {}: cell {:?}, next frame {} loop {}",
        clock.ticks, step.cell, next.frame_index, next.loop_count
    );
    if step.selected {
        if let Some(name) = next.current.clone() {
            commands.trigger(AnimationSelected {
                name,
                tick: clock.ticks + 1,
            });
        }
    }
    *state = next;
    current.0 = step.cell;
}

/// Make the initial selection. Call once after the catalog and selector are inserted.
pub fn start_sequencer(world: &mut World) {
    let state = world.resource_scope(|world, mut selector: Mut<Selector>| {
        let catalog = world.resource::<AnimationCatalog>();
        select_next(catalog, SequencerState::new(), selector.0.as_mut())
    });
    let name = state.current.clone();
    world.insert_resource(state);
    world.init_resource::<CurrentCell>();
    if let Some(name) = name {
        world.trigger(AnimationSelected { name, tick: 0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationcatalog::AnimationRow;
    use crate::resources::selection::{OrderedSelection, RandomSelection};

    fn ordered(rows: Vec<AnimationRow>, order: &[&str]) -> AnimationCatalog {
        AnimationCatalog::new(rows, order.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    /// Run `ticks` ticks from a fresh start; returns (animation, frame) per tick.
    fn run(
        catalog: &AnimationCatalog,
        policy: &mut dyn SelectionPolicy,
        ticks: usize,
    ) -> Vec<(String, u32)> {
        let mut state = select_next(catalog, SequencerState::new(), policy);
        let mut out = Vec::new();
        for _ in 0..ticks {
            let name = state.current.clone().unwrap_or_default();
            let (next, step) = advance(catalog, state, policy);
            if let Some(cell) = step.cell {
                out.push((name, cell.frame));
            }
            state = next;
        }
        out
    }

    #[test]
    fn test_min_loops_holds_animation() {
        let catalog = ordered(
            vec![
                AnimationRow::new("a", 4, 0).with_min_loops(2),
                AnimationRow::new("b", 1, 1),
            ],
            &["a", "b"],
        );
        let ticks = run(&catalog, &mut OrderedSelection, 10);
        let frames: Vec<u32> = ticks.iter().take(8).map(|(_, f)| *f).collect();
        assert_eq!(frames, [0, 1, 2, 3, 0, 1, 2, 3]);
        assert!(ticks.iter().take(8).all(|(n, _)| n == "a"));
        assert_eq!(ticks[8], ("b".to_string(), 0));
        assert_eq!(ticks[9], ("a".to_string(), 0));
    }

    #[test]
    fn test_single_frame_with_min_loops() {
        let catalog = ordered(
            vec![
                AnimationRow::new("blink", 1, 0).with_min_loops(4),
                AnimationRow::new("rest", 2, 1),
            ],
            &["blink", "rest"],
        );
        let names: Vec<String> = run(&catalog, &mut OrderedSelection, 6)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, ["blink", "blink", "blink", "blink", "rest", "rest"]);
    }

    #[test]
    fn test_ordered_cycle_respects_each_min_loops() {
        let catalog = ordered(
            vec![
                AnimationRow::new("a", 2, 0),
                AnimationRow::new("b", 1, 1).with_min_loops(3),
                AnimationRow::new("c", 3, 2),
            ],
            &["a", "b", "c"],
        );
        let names: Vec<String> = run(&catalog, &mut OrderedSelection, 16)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        let expected = [
            "a", "a", "b", "b", "b", "c", "c", "c", // first cycle
            "a", "a", "b", "b", "b", "c", "c", "c",
        ];
        assert_eq!(names, expected);
    }

    #[test]
    fn test_frame_index_stays_in_bounds() {
        let catalog = AnimationCatalog::new(
            vec![
                AnimationRow::new("a", 3, 0).with_min_loops(2),
                AnimationRow::new("b", 5, 1),
                AnimationRow::new("c", 1, 2).with_min_loops(3),
            ],
            vec![],
        )
        .unwrap();
        let mut policy = RandomSelection::with_seed(3);
        let mut state = select_next(&catalog, SequencerState::new(), &mut policy);
        for _ in 0..500 {
            let frames = catalog.lookup(state.current.as_deref().unwrap()).unwrap().frames;
            assert!(state.frame_index < frames);
            let (next, step) = advance(&catalog, state, &mut policy);
            assert!(step.cell.unwrap().frame < frames);
            state = next;
        }
    }

    #[test]
    fn test_loop_count_only_changes_at_wraparound() {
        let catalog = ordered(vec![AnimationRow::new("a", 3, 0).with_min_loops(3)], &["a"]);
        let mut policy = OrderedSelection;
        let mut state = select_next(&catalog, SequencerState::new(), &mut policy);
        let mut loops = Vec::new();
        for _ in 0..6 {
            let (next, _) = advance(&catalog, state, &mut policy);
            loops.push(next.loop_count);
            state = next;
        }
        assert_eq!(loops, [0, 0, 1, 1, 1, 2]);
    }

    #[test]
    fn test_selection_resets_counters() {
        let catalog = ordered(vec![AnimationRow::new("a", 2, 0)], &["a"]);
        let mut policy = OrderedSelection;
        let state = select_next(&catalog, SequencerState::new(), &mut policy);
        let (state, step) = advance(&catalog, state, &mut policy);
        assert!(!step.selected);
        let (state, step) = advance(&catalog, state, &mut policy);
        assert!(step.selected);
        assert_eq!(state.frame_index, 0);
        assert_eq!(state.loop_count, 0);
        assert_eq!(state.current.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_catalog_is_idle() {
        let catalog = AnimationCatalog::default();
        let mut policy = RandomSelection::new();
        let state = select_next(&catalog, SequencerState::new(), &mut policy);
        assert!(state.is_idle());
        let (state, step) = advance(&catalog, state, &mut policy);
        assert_eq!(step, Step::default());
        assert_eq!(state, SequencerState::new());
    }

    #[test]
    fn test_emits_catalog_row() {
        let catalog = ordered(vec![AnimationRow::new("walk", 2, 5)], &["walk"]);
        let mut policy = OrderedSelection;
        let state = select_next(&catalog, SequencerState::new(), &mut policy);
        let (_, step) = advance(&catalog, state, &mut policy);
        assert_eq!(step.cell, Some(CellRef { row: 5, frame: 0 }));
    }
}
