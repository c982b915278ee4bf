//! End-to-end player scenarios.
//!
//! Every test drives the player through `tick` with queued input, the same
//! way a game loop would.

use glam::{Vec2, Vec3};
use holdfast_scene::{Collider, LayerMask, SceneObject};

use crate::config::ControllerConfig;
use crate::input::Action;
use crate::objects::{ColorChangerBox, Flashlight, Lamp, PickableBox};

use super::helpers::{Harness, DT, EYE};

// =============================================================================
// Scanning and prompt
// =============================================================================

#[test]
fn prompt_inactive_when_looking_at_nothing() {
    let mut h = Harness::new();
    h.run(5);
    assert_eq!(h.player.scanner().candidate(), None);
    assert!(!h.player.scanner().prompt().is_active());
    assert!(!h.panel().is_visible());
}

#[test]
fn prompt_inactive_when_looking_at_scenery() {
    let mut h = Harness::new();
    h.world.spawn(
        SceneObject::at(Vec3::new(0.0, EYE, -2.0))
            .with_collider(Collider::cuboid(Vec3::splat(0.5)))
            .with_layer(LayerMask::INTERACTABLE),
    );
    h.run(3);
    assert_eq!(h.player.scanner().candidate(), None);
    assert!(!h.panel().is_visible());
}

#[test]
fn box_in_range_offers_pick_up() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();

    assert_eq!(h.player.scanner().candidate(), Some(id));
    assert!(h.panel().is_visible());
    assert_eq!(h.panel().text(), "[E] pick up");
}

#[test]
fn box_out_of_range_is_ignored() {
    let mut h = Harness::new();
    h.spawn_ahead(4.0, PickableBox::new());
    h.tick();
    assert_eq!(h.player.scanner().candidate(), None);
}

#[test]
fn steady_gaze_writes_prompt_once() {
    let mut h = Harness::new();
    h.spawn_ahead(2.0, PickableBox::new());
    h.run(30);
    // One hide at construction, one show, one text write.
    assert_eq!(h.panel().visibility_writes(), 2);
    assert_eq!(h.panel().text_writes(), 1);
}

#[test]
fn turning_away_hides_prompt_and_clears_candidate() {
    let mut h = Harness::new();
    h.spawn_ahead(2.0, Lamp::default());
    h.tick();
    assert!(h.panel().is_visible());

    h.input.set_look(Vec2::new(300.0, 0.0));
    h.tick();
    assert_eq!(h.player.scanner().candidate(), None);
    assert!(!h.panel().is_visible());
    assert_eq!(h.panel().text(), "[E] turn on");
}

// =============================================================================
// Pickup and hand state
// =============================================================================

#[test]
fn interact_picks_up_box_and_fills_hand() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    let other = h.spawn_box_aside();
    h.tick();
    h.press(Action::Interact);

    assert_eq!(h.player.possession().held_object(), Some(id));
    assert!(h.player.scanner().hand_is_full());

    let anchor = h.player.rig().hold_anchor.unwrap();
    assert_eq!(h.world.scene().parent(id), Some(anchor));
    let body = h.world.scene().body(id).unwrap();
    assert!(body.is_kinematic());
    assert!(!body.uses_gravity());

    let status = h
        .world
        .objects()
        .interactable(other)
        .unwrap()
        .interaction_status(h.player.scanner().hand_is_full());
    assert!(!status.can_interact);
}

#[test]
fn full_hand_refuses_second_box() {
    let mut h = Harness::new();
    let first = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);

    let second = h.spawn_ahead(1.5, PickableBox::new());
    h.tick();
    assert_eq!(h.player.scanner().last_hit().map(|hit| hit.object), Some(second));
    assert_eq!(h.player.scanner().candidate(), None);
    assert!(!h.panel().is_visible());

    h.press(Action::Interact);
    assert_eq!(h.player.possession().held_object(), Some(first));
    assert_eq!(h.world.scene().parent(second), None);
}

#[test]
fn held_box_does_not_block_scan() {
    let mut h = Harness::new();
    h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);
    assert_eq!(h.player.scanner().last_hit(), None);
}

#[test]
fn held_box_follows_camera() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);

    h.input.set_move(Vec2::Y);
    h.input.set_look(Vec2::new(50.0, 20.0));
    h.run(20);

    let anchor = h.player.rig().hold_anchor.unwrap();
    let anchor_pos = h.world.scene().transform(anchor).unwrap().translation;
    let box_pos = h.world.scene().transform(id).unwrap().translation;
    assert!(box_pos.abs_diff_eq(anchor_pos, 1e-5));
}

#[test]
fn lamp_works_with_full_hand() {
    let mut h = Harness::new();
    let held = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);

    let lamp = h.spawn_ahead(2.0, Lamp::default());
    h.tick();
    assert_eq!(h.player.scanner().candidate(), Some(lamp));
    assert_eq!(h.panel().text(), "[E] turn on");

    h.press(Action::Interact);
    assert!(h.world.objects().get(lamp).unwrap().as_lamp().unwrap().is_lit());
    assert_eq!(h.player.possession().held_object(), Some(held));
    assert_eq!(h.panel().text(), "[E] turn off");
}

#[test]
fn color_changer_recolours_without_pickup() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, ColorChangerBox::new(7));
    h.tick();
    assert_eq!(h.panel().text(), "[E] change color");

    h.press(Action::Interact);
    let changer = h.world.objects().get(id).unwrap().as_color_changer().unwrap();
    assert_eq!(changer.changes(), 1);
    assert_eq!(h.player.possession().held_object(), None);
}

#[test]
fn despawned_candidate_is_skipped() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    assert_eq!(h.player.scanner().candidate(), Some(id));

    h.world.despawn(id);
    h.press(Action::Interact);
    assert_eq!(h.player.possession().held_object(), None);
    assert!(!h.player.scanner().hand_is_full());
    assert_eq!(h.player.scanner().candidate(), None);
}

#[test]
fn despawning_held_object_empties_hand() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);

    h.world.despawn(id);
    h.tick();
    assert_eq!(h.player.possession().held_object(), None);
    assert!(!h.player.scanner().hand_is_full());

    let next = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    assert_eq!(h.player.scanner().candidate(), Some(next));
}

// =============================================================================
// Held-object actions
// =============================================================================

#[test]
fn secondary_toggles_lid_of_held_box() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);

    let is_open = |h: &Harness| {
        h.world
            .objects()
            .get(id)
            .unwrap()
            .as_pickable_box()
            .unwrap()
            .is_open()
    };
    assert!(!is_open(&h));
    h.press(Action::Secondary);
    assert!(is_open(&h));
    h.press(Action::Secondary);
    assert!(!is_open(&h));
}

#[test]
fn secondary_on_floor_box_does_nothing() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Secondary);
    assert!(!h.world.objects().get(id).unwrap().as_pickable_box().unwrap().is_open());
}

#[test]
fn primary_throws_box_along_camera_forward() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);
    h.press(Action::Primary);

    assert_eq!(h.player.possession().held_object(), None);
    assert!(!h.player.scanner().hand_is_full());
    assert_eq!(h.world.scene().parent(id), None);

    let body = h.world.scene().body(id).unwrap();
    assert!(!body.is_kinematic());
    assert!(body.uses_gravity());
    assert!(body.velocity().abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-4));
}

#[test]
fn thrown_box_lands_on_floor() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);
    h.press(Action::Primary);

    for _ in 0..300 {
        h.world.step(DT);
    }
    let position = h.world.scene().transform(id).unwrap().translation;
    assert!((position.y - 0.25).abs() < 1e-4);
    assert!(position.z < -1.0);
}

#[test]
fn throw_force_comes_from_config() {
    let mut config = ControllerConfig::default();
    config.hold.throw_force = 4.0;
    let mut h = Harness::with_config(config);
    let id = h.spawn_ahead(2.0, PickableBox::new());
    h.tick();
    h.press(Action::Interact);
    h.press(Action::Primary);
    let velocity = h.world.scene().body(id).unwrap().velocity();
    assert!((velocity.length() - 4.0).abs() < 1e-4);
}

#[test]
fn primary_uses_flashlight_instead_of_throwing() {
    let mut h = Harness::new();
    let id = h.spawn_ahead(2.0, Flashlight::new());
    h.tick();
    h.press(Action::Interact);
    h.press(Action::Primary);

    assert_eq!(h.player.possession().held_object(), Some(id));
    assert!(h.world.objects().get(id).unwrap().as_flashlight().unwrap().is_on());
}

#[test]
fn primary_with_empty_hand_does_nothing() {
    let mut h = Harness::new();
    h.press(Action::Primary);
    assert_eq!(h.player.possession().held_object(), None);
}

// =============================================================================
// Locomotion
// =============================================================================

#[test]
fn grounded_jump_launches_at_six_metres_per_second() {
    let mut h = Harness::new();
    h.tick();
    h.press(Action::Jump);
    assert!((h.player.locomotion().vertical_velocity() - 6.0).abs() < 1e-4);
    assert!(!h.player.is_grounded());
}

#[test]
fn jump_returns_to_ground() {
    let mut h = Harness::new();
    h.tick();
    h.press(Action::Jump);
    h.run(120);
    assert!(h.player.is_grounded());
    assert_eq!(h.player.position().y, 0.0);
}

#[test]
fn double_jump_is_refused() {
    let mut h = Harness::new();
    h.tick();
    h.press(Action::Jump);
    h.run(5);
    let before = h.player.locomotion().vertical_velocity();
    h.press(Action::Jump);
    assert!(h.player.locomotion().vertical_velocity() < before);
}

#[test]
fn sprinting_covers_more_ground() {
    let mut walker = Harness::new();
    let mut sprinter = Harness::new();
    walker.input.set_move(Vec2::Y);
    sprinter.input.set_move(Vec2::Y);
    sprinter.input.set_sprinting(true);
    walker.run(120);
    sprinter.run(120);
    assert!(sprinter.player.position().z < walker.player.position().z * 1.5);
}
