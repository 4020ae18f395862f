// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests driving [`Panel`] roots through an [`Interface`] over
//! the in-memory scene, with a focus on gesture routing, click commits,
//! focus hand-off, and background lifecycle across validation passes.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use peniko::Color;

use canopy_background::{BACKGROUND_DEPTH, Background};
use canopy_element::{Button, Column, MapStyles, Panel, WidgetId};
use canopy_interface::{Interface, KeyCode, KeyEvent, PointerEvent, Root, RootId};
use canopy_scene::{MemoryScene, SceneGraph};

type Ui = Interface<MemoryScene, Panel<MemoryScene>>;

fn styles() -> MapStyles {
    let mut styles = MapStyles::new();
    styles.insert("button", Background::solid_uniform(Color::BLACK, 5.0));
    styles
}

/// One panel holding two 100x50 buttons in a column with no gap. After the
/// background's uniform 5.0 insets each button is 110x60, so the first
/// occupies y 0..60 and the second y 60..120.
fn two_button_panel(
    scene: &mut MemoryScene,
    ui: &mut Ui,
    clicks: &Rc<RefCell<Vec<&'static str>>>,
) -> (RootId, WidgetId, WidgetId) {
    let layer = scene.create_group();
    let mut panel = Panel::new(layer, Box::new(Column::new(0.0)), Box::new(styles()));
    let log = clicks.clone();
    let first = panel.add(
        Button::new("button", Size::new(100.0, 50.0))
            .on_click(move || log.borrow_mut().push("first")),
    );
    let log = clicks.clone();
    let second = panel.add(
        Button::new("button", Size::new(100.0, 50.0))
            .on_click(move || log.borrow_mut().push("second")),
    );
    let id = ui.create_root(scene, panel, None);
    ui.paint(scene, 0.0);
    (id, first, second)
}

fn click(ui: &mut Ui, scene: &mut MemoryScene, x: f64, y: f64) {
    ui.pointer_start(scene, &PointerEvent::new(x, y));
    ui.pointer_end(scene, &PointerEvent::new(x, y));
}

#[test]
fn click_inside_fires_the_hit_button_only() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    two_button_panel(&mut scene, &mut ui, &clicks);

    click(&mut ui, &mut scene, 10.0, 10.0);
    click(&mut ui, &mut scene, 10.0, 70.0);
    assert_eq!(*clicks.borrow(), vec!["first", "second"]);
}

#[test]
fn press_hook_fires_on_press_click_hook_on_commit() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();

    let layer = scene.create_group();
    let mut panel = Panel::new(layer, Box::new(Column::new(0.0)), Box::new(styles()));
    let pressed = events.clone();
    let clicked = events.clone();
    panel.add(
        Button::new("button", Size::new(100.0, 50.0))
            .on_press(move || pressed.borrow_mut().push("press"))
            .on_click(move || clicked.borrow_mut().push("click")),
    );
    ui.create_root(&mut scene, panel, None);
    ui.paint(&mut scene, 0.0);

    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    assert_eq!(*events.borrow(), vec!["press"]);
    ui.pointer_end(&mut scene, &PointerEvent::new(10.0, 10.0));
    assert_eq!(*events.borrow(), vec!["press", "click"]);

    // An aborted gesture presses without committing.
    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(500.0, 500.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(500.0, 500.0));
    assert_eq!(*events.borrow(), vec!["press", "click", "press"]);
}

#[test]
fn drag_out_then_release_out_does_not_commit() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    two_button_panel(&mut scene, &mut ui, &clicks);

    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(500.0, 500.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(500.0, 500.0));
    assert!(clicks.borrow().is_empty());
}

#[test]
fn drag_out_and_back_in_commits_on_release() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    two_button_panel(&mut scene, &mut ui, &clicks);

    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(500.0, 500.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(20.0, 20.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(20.0, 20.0));
    assert_eq!(*clicks.borrow(), vec!["first"]);
}

#[test]
fn commit_follows_the_last_seen_drag_state_not_release_coordinates() {
    // Selected at the last drag; the release itself reports an outside
    // coordinate but still commits.
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    two_button_panel(&mut scene, &mut ui, &clicks);

    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(20.0, 20.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(500.0, 500.0));
    assert_eq!(*clicks.borrow(), vec!["first"]);
}

#[test]
fn gesture_that_starts_in_one_button_never_reaches_another() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    two_button_panel(&mut scene, &mut ui, &clicks);

    // Press in the first button, wander into the second, release there.
    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(10.0, 70.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(10.0, 70.0));
    assert!(clicks.borrow().is_empty());
}

#[test]
fn overlapping_roots_route_to_the_most_recently_mounted() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    two_button_panel(&mut scene, &mut ui, &clicks);
    // A second panel mounted later covers the same area.
    let over = Rc::new(RefCell::new(Vec::new()));
    two_button_panel(&mut scene, &mut ui, &over);

    click(&mut ui, &mut scene, 10.0, 10.0);
    assert!(clicks.borrow().is_empty());
    assert_eq!(*over.borrow(), vec!["first"]);
}

#[test]
fn disabled_buttons_let_the_press_fall_through() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    let (id, first, _) = two_button_panel(&mut scene, &mut ui, &clicks);

    ui.root_mut(id).unwrap().button_mut(first).unwrap().set_enabled(false);
    click(&mut ui, &mut scene, 10.0, 10.0);
    assert!(clicks.borrow().is_empty());
}

#[test]
fn focusable_button_takes_focus_on_commit_and_receives_keys() {
    let typed = Rc::new(RefCell::new(String::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();

    let layer = scene.create_group();
    let mut panel = Panel::new(layer, Box::new(Column::new(0.0)), Box::new(styles()));
    let sink = typed.clone();
    let field = panel.add(
        Button::new("button", Size::new(100.0, 50.0))
            .focusable()
            .on_key(move |event| {
                if let KeyEvent::Typed(ch) = event {
                    sink.borrow_mut().push(*ch);
                }
            }),
    );
    let id = ui.create_root(&mut scene, panel, None);
    ui.paint(&mut scene, 0.0);

    click(&mut ui, &mut scene, 10.0, 10.0);
    assert_eq!(ui.focused().map(|t| t.widget), Some(field));
    assert_eq!(ui.focused().map(|t| t.root), Some(id));

    ui.key(&mut scene, &KeyEvent::Typed('h'));
    ui.key(&mut scene, &KeyEvent::Typed('i'));
    ui.key(&mut scene, &KeyEvent::Down(KeyCode(42)));
    assert_eq!(*typed.borrow(), "hi");

    // A click on empty space drops focus; keys stop arriving.
    click(&mut ui, &mut scene, 500.0, 500.0);
    assert_eq!(ui.focused(), None);
    ui.key(&mut scene, &KeyEvent::Typed('x'));
    assert_eq!(*typed.borrow(), "hi");
}

#[test]
fn validation_builds_backgrounds_behind_content_and_rebuilds_once_per_pass() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    let (id, first, _) = two_button_panel(&mut scene, &mut ui, &clicks);

    // One solid node per button after the first pass, all at the
    // background depth.
    assert_eq!(scene.live_node_count(), 2);
    for node in scene.group_nodes(ui.root(id).unwrap().layer()).to_vec() {
        assert_eq!(scene.node_depth(node), Some(BACKGROUND_DEPTH));
    }

    // A clean pass does not touch the scene.
    ui.paint(&mut scene, 0.0);
    assert_eq!(scene.released_node_count(), 0);

    // Invalidation rebuilds every background exactly once.
    ui.root_mut(id).unwrap().invalidate();
    ui.paint(&mut scene, 0.0);
    assert_eq!(scene.released_node_count(), 2);
    assert_eq!(scene.live_node_count(), 2);

    // A committed click invalidates; the next pass rebuilds again.
    click(&mut ui, &mut scene, 10.0, 10.0);
    ui.paint(&mut scene, 0.0);
    assert_eq!(scene.released_node_count(), 4);
    let _ = first;
}

#[test]
fn button_rects_include_background_insets() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    let (id, first, second) = two_button_panel(&mut scene, &mut ui, &clicks);

    let panel = ui.root(id).unwrap();
    let first_rect = panel.button(first).unwrap().rect();
    let second_rect = panel.button(second).unwrap().rect();
    assert_eq!(first_rect.size(), Size::new(110.0, 60.0));
    assert_eq!(second_rect.origin().y, 60.0);
}

#[test]
fn destroying_a_panel_tears_down_every_background_node() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    let (id, _, _) = two_button_panel(&mut scene, &mut ui, &clicks);
    assert_eq!(scene.live_node_count(), 2);

    ui.destroy_root(&mut scene, id).unwrap();
    assert_eq!(scene.live_node_count(), 0);
    assert_eq!(scene.live_group_count(), 0);

    // The dead panel is gone from the render pass and input routing.
    ui.paint(&mut scene, 0.0);
    click(&mut ui, &mut scene, 10.0, 10.0);
    assert!(clicks.borrow().is_empty());
}

#[test]
fn removing_a_button_frees_its_nodes_and_keeps_sibling_ids() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    let (id, first, second) = two_button_panel(&mut scene, &mut ui, &clicks);
    assert_eq!(scene.live_node_count(), 2);

    let removed = ui.root_mut(id).unwrap().remove(&mut scene, first);
    assert!(removed.is_some());
    assert_eq!(scene.live_node_count(), 1);
    ui.paint(&mut scene, 0.0);

    // The survivor keeps its id and moves up to the top of the column.
    let panel = ui.root(id).unwrap();
    assert!(panel.button(first).is_none());
    assert_eq!(panel.button(second).unwrap().rect().origin().y, 0.0);
    assert_eq!(panel.len(), 1);

    click(&mut ui, &mut scene, 10.0, 10.0);
    assert_eq!(*clicks.borrow(), vec!["second"]);
}

#[test]
fn deferred_mutation_lands_after_validation() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let mut scene = MemoryScene::new();
    let mut ui = Ui::new();
    let (id, first, _) = two_button_panel(&mut scene, &mut ui, &clicks);

    // Disable the first button from a deferred action, then click where
    // it used to respond.
    ui.defer(move |ui, _| {
        if let Some(panel) = ui.root_mut(id) {
            if let Some(button) = panel.button_mut(first) {
                button.set_enabled(false);
            }
        }
        Ok(())
    });
    ui.paint(&mut scene, 0.0);
    click(&mut ui, &mut scene, 10.0, 10.0);
    assert!(clicks.borrow().is_empty());
}
