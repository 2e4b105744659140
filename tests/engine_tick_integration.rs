//! Engine tick integration tests for the sequencer and composition systems.
//!
//! Each test builds a `World` by hand, inserts the resources the systems
//! read, and runs a schedule once per tick.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test engine_tick_integration
//! ```

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use image::{Rgb, RgbImage};

use spritematrix::engine::build_schedule;
use spritematrix::events::animation::AnimationSelected;
use spritematrix::resources::animationcatalog::{AnimationCatalog, AnimationRow};
use spritematrix::resources::composedframe::ComposedFrame;
use spritematrix::resources::scene::Scene;
use spritematrix::resources::selection::Selector;
use spritematrix::resources::sequencerstate::{CurrentCell, SequencerState};
use spritematrix::resources::spriteatlas::{CellRef, SpriteAtlas};
use spritematrix::resources::tickclock::TickClock;
use spritematrix::resources::viewport::Viewport;
use spritematrix::systems::sequencer::start_sequencer;
use spritematrix::systems::time::update_tick_clock;

#[derive(Resource, Default)]
struct Selections(Vec<(String, u64)>);

fn record_selection(trigger: On<AnimationSelected>, mut selections: ResMut<Selections>) {
    let event = trigger.event();
    selections.0.push((event.name.clone(), event.tick));
}

/// 4x4 cells, 3 columns by 2 rows; every cell a distinct solid colour.
fn sheet() -> RgbImage {
    RgbImage::from_fn(12, 8, |x, y| cell_color(x / 4, y / 4))
}

fn cell_color(col: u32, row: u32) -> Rgb<u8> {
    Rgb([(col * 50 + 10) as u8, (row * 100 + 10) as u8, 7])
}

fn make_world(catalog: AnimationCatalog, scene: Scene, seed: Option<u64>) -> World {
    let mut world = World::new();
    world.init_resource::<Selections>();
    world.spawn(Observer::new(record_selection));
    world.flush();

    world.insert_resource(Selector::for_catalog(&catalog, seed));
    world.insert_resource(catalog);
    world.insert_resource(SpriteAtlas::new(sheet(), 4, 4).unwrap());
    world.insert_resource(Viewport::new(8, 6));
    world.insert_resource(scene);
    world.insert_resource(TickClock::default());
    world.insert_resource(ComposedFrame::default());
    start_sequencer(&mut world);
    world
}

fn run_ticks(world: &mut World, ticks: usize) -> Vec<Option<CellRef>> {
    let mut schedule = build_schedule();
    let mut cells = Vec::new();
    for _ in 0..ticks {
        schedule.run(world);
        cells.push(world.resource::<CurrentCell>().0);
        update_tick_clock(world, 0.02);
    }
    cells
}

fn ordered_catalog() -> AnimationCatalog {
    AnimationCatalog::new(
        vec![
            AnimationRow::new("a", 3, 0),
            AnimationRow::new("b", 2, 1).with_min_loops(2),
        ],
        vec!["a".into(), "b".into()],
    )
    .unwrap()
}

#[test]
fn ordered_sequence_emits_expected_cells() {
    let mut world = make_world(ordered_catalog(), Scene::Sprites, None);
    let cells = run_ticks(&mut world, 10);
    let expected: Vec<(u32, u32)> = vec![
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 0),
        (1, 1),
        (1, 0),
        (1, 1),
        (0, 0),
        (0, 1),
        (0, 2),
    ];
    let got: Vec<(u32, u32)> = cells
        .iter()
        .map(|c| {
            let c = c.unwrap();
            (c.row, c.frame)
        })
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn selection_events_report_start_tick() {
    let mut world = make_world(ordered_catalog(), Scene::Sprites, None);
    run_ticks(&mut world, 8);
    let selections = &world.resource::<Selections>().0;
    assert_eq!(
        selections,
        &vec![
            ("a".to_string(), 0),
            ("b".to_string(), 3),
            ("a".to_string(), 7),
        ]
    );
}

#[test]
fn composed_frame_centers_current_cell() {
    let mut world = make_world(ordered_catalog(), Scene::Sprites, None);
    run_ticks(&mut world, 2);

    let frame = world.resource::<ComposedFrame>();
    let placement = frame.0.as_ref().unwrap();
    assert_eq!((placement.x, placement.y), (2, 1));
    assert_eq!(placement.image.dimensions(), (4, 4));
    assert!(placement.image.pixels().all(|p| *p == cell_color(1, 0)));
}

#[test]
fn random_mode_reaches_every_animation() {
    let catalog = AnimationCatalog::new(
        vec![
            AnimationRow::new("x", 1, 0),
            AnimationRow::new("y", 1, 1),
            AnimationRow::new("z", 2, 1),
        ],
        vec![],
    )
    .unwrap();
    let mut world = make_world(catalog, Scene::Sprites, Some(11));
    run_ticks(&mut world, 300);

    let selections = &world.resource::<Selections>().0;
    for name in ["x", "y", "z"] {
        assert!(
            selections.iter().any(|(n, _)| n == name),
            "{} never selected",
            name
        );
    }
}

#[test]
fn empty_catalog_ticks_without_output() {
    let mut world = make_world(AnimationCatalog::default(), Scene::Sprites, None);
    let cells = run_ticks(&mut world, 50);
    assert!(cells.iter().all(Option::is_none));
    assert!(world.resource::<ComposedFrame>().0.is_none());
    assert!(world.resource::<SequencerState>().is_idle());
    assert!(world.resource::<Selections>().0.is_empty());
}

#[test]
fn pan_scene_scrolls_sheet_into_view() {
    let mut world = make_world(
        ordered_catalog(),
        Scene::Pan {
            step_x: 1,
            step_y: 0,
        },
        None,
    );
    let mut schedule = build_schedule();

    // tick 0: window sits one panel width left of the sheet
    schedule.run(&mut world);
    {
        let placement = world.resource::<ComposedFrame>().0.clone().unwrap();
        assert_eq!(placement.image.dimensions(), (8, 6));
        assert!(placement.image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    for _ in 0..8 {
        update_tick_clock(&mut world, 0.02);
    }
    schedule.run(&mut world);
    let placement = world.resource::<ComposedFrame>().0.clone().unwrap();
    assert_eq!(*placement.image.get_pixel(0, 0), cell_color(0, 0));
    assert_eq!(*placement.image.get_pixel(4, 4), cell_color(1, 1));

    // the sequencer does not run outside the sprite scene
    assert_eq!(world.resource::<CurrentCell>().0, None);
}

#[test]
fn scanline_scene_sweeps_rows() {
    let mut world = make_world(AnimationCatalog::default(), Scene::Scanline, None);
    let mut schedule = build_schedule();
    let mut rows = Vec::new();
    for _ in 0..8 {
        schedule.run(&mut world);
        rows.push(world.resource::<ComposedFrame>().0.as_ref().unwrap().y);
        update_tick_clock(&mut world, 0.02);
    }
    assert_eq!(rows, [0, 1, 2, 3, 4, 5, 0, 1]);
}
