// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus across clicks.
//!
//! A focusable field takes focus when a click commits on it, receives
//! typed characters while focused, and loses focus on the next pointer
//! release anywhere, including empty space.
//!
//! Run:
//! - `cargo run -p canopy_demos --example focus_typing`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use peniko::Color;

use canopy_background::Background;
use canopy_element::{Button, Column, MapStyles, Panel};
use canopy_interface::{Interface, KeyEvent, PointerEvent};
use canopy_scene::{MemoryScene, SceneGraph};

fn main() {
    env_logger::init();

    let mut scene = MemoryScene::new();
    let mut ui: Interface<MemoryScene, Panel<MemoryScene>> = Interface::new();
    ui.on_focus_changed(|old, new| {
        println!("  focus: {:?} -> {:?}", old.map(|t| t.widget), new.map(|t| t.widget));
    });

    let mut styles = MapStyles::new();
    styles.insert("field", Background::solid_uniform(Color::WHITE, 2.0));

    let typed = Rc::new(RefCell::new(String::new()));
    let sink = typed.clone();

    let layer = scene.create_group();
    let mut panel = Panel::new(layer, Box::new(Column::new(0.0)), Box::new(styles));
    panel.add(
        Button::new("field", Size::new(200.0, 24.0))
            .focusable()
            .on_key(move |event| {
                if let KeyEvent::Typed(ch) = event {
                    sink.borrow_mut().push(*ch);
                }
            }),
    );
    ui.create_root(&mut scene, panel, None);
    ui.paint(&mut scene, 0.0);

    println!("== Click the field ==");
    ui.pointer_start(&mut scene, &PointerEvent::new(10.0, 10.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(10.0, 10.0));

    println!("== Type while focused ==");
    for ch in "hello".chars() {
        ui.key(&mut scene, &KeyEvent::Typed(ch));
    }
    println!("  field contents: {:?}", typed.borrow());

    println!("== Click empty space: focus drops ==");
    ui.pointer_start(&mut scene, &PointerEvent::new(500.0, 500.0));
    ui.pointer_end(&mut scene, &PointerEvent::new(500.0, 500.0));

    println!("== Typing now goes nowhere ==");
    ui.key(&mut scene, &KeyEvent::Typed('!'));
    println!("  field contents: {:?}", typed.borrow());
}
