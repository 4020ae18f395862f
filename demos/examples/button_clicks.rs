// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer capture and click commits.
//!
//! Mounts a panel of two buttons, then replays a handful of gestures to
//! show how capture routing decides which clicks commit: a clean click, a
//! drag that leaves the button before release, and a drag that leaves and
//! comes back.
//!
//! Run:
//! - `cargo run -p canopy_demos --example button_clicks`

use kurbo::Size;
use peniko::Color;

use canopy_background::Background;
use canopy_element::{Button, Column, MapStyles, Panel};
use canopy_interface::{Interface, PointerEvent};
use canopy_scene::{MemoryScene, SceneGraph};

fn main() {
    env_logger::init();

    let mut scene = MemoryScene::new();
    let mut ui: Interface<MemoryScene, Panel<MemoryScene>> = Interface::new();

    let mut styles = MapStyles::new();
    styles.insert("button", Background::solid_uniform(Color::BLACK, 5.0));

    let layer = scene.create_group();
    let mut panel = Panel::new(layer, Box::new(Column::new(10.0)), Box::new(styles));
    let ok = panel
        .add(Button::new("button", Size::new(100.0, 50.0)).on_click(|| println!("  -> ok clicked")));
    let cancel = panel.add(
        Button::new("button", Size::new(100.0, 50.0)).on_click(|| println!("  -> cancel clicked")),
    );
    let id = ui.create_root(&mut scene, panel, None);

    // First pass lays the panel out and builds the backgrounds.
    ui.paint(&mut scene, 0.0);
    let panel = ui.root(id).expect("panel is mounted");
    println!("== Layout ==");
    for widget in [ok, cancel] {
        let button = panel.button(widget).expect("widget exists");
        println!("  {widget:?}: {:?}", button.rect());
    }
    println!("  live scene nodes: {}", scene.live_node_count());

    println!("== Clean click on the first button ==");
    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(10.0, 10.0));

    println!("== Press, drag away, release away: no commit ==");
    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(500.0, 500.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(500.0, 500.0));

    println!("== Press, drag away, drag back, release: commits ==");
    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(500.0, 500.0));
    ui.pointer_drag(&mut scene, &PointerEvent::new(20.0, 20.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(20.0, 20.0));

    ui.paint(&mut scene, 0.0);
    println!("== Teardown ==");
    ui.destroy_root(&mut scene, id).expect("scene teardown");
    println!("  live scene nodes: {}", scene.live_node_count());
}
