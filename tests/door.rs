use bevy_ecs::system::RunSystemOnce;
use doorwatch::{
    constants::{effects, tint},
    events::{GameCommand, PresentationEvent},
    systems::{
        door_control_system, DoorSide, DoorState, DoorToggle, Doors, GameStage, Ghost, GhostPhase, GhostPhaseKind,
    },
};
use pretty_assertions::assert_eq;
use rand::{seq::IndexedRandom, Rng};
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

#[test]
fn test_doors_start_open() {
    let doors = Doors::new();
    for side in DoorSide::iter() {
        assert_eq!(
            doors.state(side),
            DoorState {
                is_open: true,
                is_broken: false
            }
        );
    }
}

#[test]
fn test_closing_one_door() {
    let mut doors = Doors::new();
    let mut ghost = Ghost::new();

    assert_eq!(doors.toggle(DoorSide::Left, &mut ghost), DoorToggle::Closed);
    assert_that(&doors.is_open(DoorSide::Left)).is_false();
    assert_that(&doors.is_open(DoorSide::Right)).is_true();
}

#[test]
fn test_closing_second_door_forces_first_open() {
    let mut doors = Doors::new();
    let mut ghost = Ghost::new();

    doors.toggle(DoorSide::Left, &mut ghost);
    assert_eq!(doors.toggle(DoorSide::Right, &mut ghost), DoorToggle::ClosedForcingOther);

    assert_that(&doors.is_open(DoorSide::Left)).is_true();
    assert_that(&doors.is_open(DoorSide::Right)).is_false();
}

#[test]
fn test_reopening_a_closed_door() {
    let mut doors = Doors::new();
    let mut ghost = Ghost::new();

    doors.toggle(DoorSide::Right, &mut ghost);
    assert_eq!(doors.toggle(DoorSide::Right, &mut ghost), DoorToggle::Opened);
    assert_that(&doors.is_open(DoorSide::Right)).is_true();
}

#[test]
fn test_never_both_closed() {
    let mut rng = common::rng(5);
    let mut doors = Doors::new();
    let mut ghost = common::loaded_ghost();
    let sides = [DoorSide::Left, DoorSide::Right];

    for _ in 0..1_000 {
        // Occasionally put the ghost behind a door so breaches happen too
        if rng.random_bool(0.05) {
            if let Some(&side) = doors.open_sides().choose(&mut rng) {
                ghost.teleport_to(side);
            }
        }
        let side = *sides.choose(&mut rng).expect("sides is not empty");
        doors.toggle(side, &mut ghost);

        assert!(
            doors.is_open(DoorSide::Left) || doors.is_open(DoorSide::Right),
            "both doors closed: {doors:?}"
        );
    }
}

#[test]
fn test_closing_on_a_stalker_breaches() {
    let mut doors = Doors::new();
    let mut ghost = common::stalking_ghost(DoorSide::Left);

    assert_that(&doors.is_ghost_blocking(DoorSide::Left, &ghost)).is_true();
    assert_that(&doors.is_ghost_blocking(DoorSide::Right, &ghost)).is_false();

    assert_eq!(doors.toggle(DoorSide::Left, &mut ghost), DoorToggle::Breached);

    assert_eq!(
        doors.state(DoorSide::Left),
        DoorState {
            is_open: true,
            is_broken: true
        }
    );
    assert_eq!(ghost.phase(), GhostPhase::Retreat { side: Some(DoorSide::Left) });
    assert_eq!(ghost.tint(), tint::INJURED);
}

#[test]
fn test_broken_door_stays_open() {
    let mut doors = Doors::new();
    let mut ghost = common::stalking_ghost(DoorSide::Right);
    doors.breach(DoorSide::Right, &mut ghost);

    for _ in 0..5 {
        assert_eq!(doors.toggle(DoorSide::Right, &mut ghost), DoorToggle::Rejected);
        assert_that(&doors.is_open(DoorSide::Right)).is_true();
        assert_that(&doors.is_broken(DoorSide::Right)).is_true();
    }

    // The other door still works, and can close since the broken one is open
    assert_eq!(doors.toggle(DoorSide::Left, &mut ghost), DoorToggle::Closed);
}

#[test]
fn test_reset_repairs_doors() {
    let mut doors = Doors::new();
    let mut ghost = common::stalking_ghost(DoorSide::Left);
    doors.breach(DoorSide::Left, &mut ghost);
    doors.toggle(DoorSide::Right, &mut ghost);

    doors.reset();

    assert_eq!(doors, Doors::new());
}

#[test]
fn test_door_command_emits_movement() {
    let mut world = common::create_test_world();
    common::send_command(&mut world, GameCommand::ToggleDoor(DoorSide::Left));

    world
        .run_system_once(door_control_system)
        .expect("System should run successfully");

    assert_that(&world.resource::<Doors>().is_open(DoorSide::Left)).is_false();
    assert_eq!(
        common::drain_effects(&mut world),
        vec![PresentationEvent::DoorMoved {
            side: DoorSide::Left,
            open: false
        }]
    );
}

#[test]
fn test_forced_door_emits_both_movements() {
    let mut world = common::create_test_world();
    common::send_command(&mut world, GameCommand::ToggleDoor(DoorSide::Left));
    common::send_command(&mut world, GameCommand::ToggleDoor(DoorSide::Right));

    world
        .run_system_once(door_control_system)
        .expect("System should run successfully");

    let effects = common::drain_effects(&mut world);
    assert_that(&effects).has_length(3);
    assert!(effects.contains(&PresentationEvent::DoorMoved {
        side: DoorSide::Left,
        open: true,
    }));
}

#[test]
fn test_breach_command_shakes_camera() {
    let mut world = common::create_test_world();
    world.insert_resource(common::stalking_ghost(DoorSide::Right));
    common::send_command(&mut world, GameCommand::ToggleDoor(DoorSide::Right));

    world
        .run_system_once(door_control_system)
        .expect("System should run successfully");

    assert_eq!(
        common::drain_effects(&mut world),
        vec![
            PresentationEvent::CameraShake {
                intensity: effects::BREACH_SHAKE_INTENSITY,
                seconds: effects::BREACH_SHAKE_SECONDS,
            },
            PresentationEvent::DoorBroken(DoorSide::Right),
        ]
    );
    assert_eq!(world.resource::<Ghost>().kind(), GhostPhaseKind::Retreat);
}

#[test]
fn test_non_door_commands_are_ignored() {
    let mut world = common::create_test_world();
    common::send_command(&mut world, GameCommand::PressFlashlight);

    world
        .run_system_once(door_control_system)
        .expect("System should run successfully");

    assert_eq!(*world.resource::<Doors>(), Doors::new());
    assert_that(&common::drain_effects(&mut world)).is_empty();
}

#[test]
fn test_door_commands_are_dropped_while_paused() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Paused);
    common::send_command(&mut world, GameCommand::ToggleDoor(DoorSide::Left));

    world
        .run_system_once(door_control_system)
        .expect("System should run successfully");

    assert_eq!(*world.resource::<Doors>(), Doors::new());
    assert_that(&common::drain_effects(&mut world)).is_empty();
}
