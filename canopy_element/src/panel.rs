// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Rect, Size};

use canopy_interface::{FocusScope, KeyEvent, PointerEvent, Root};
use canopy_scene::SceneGraph;

use crate::button::{Button, WidgetId};
use crate::layout::Layout;
use crate::style::StyleSheet;

/// A flat container of buttons that mounts as one dispatcher root.
///
/// The panel owns a scene group (its layer), a layout strategy, a style
/// sheet, and its buttons. It implements the full root contract: pointer
/// starts hit-test buttons topmost first, the pressed button becomes the
/// active widget for the rest of the gesture, a committed release fires
/// the button's click hook, and validation reconciles layout and
/// backgrounds at most once per render pass.
///
/// Buttons occupy stable slots: removing one never shifts the ids of the
/// others.
pub struct Panel<S: SceneGraph> {
    layer: S::Group,
    layout: Box<dyn Layout>,
    styles: Box<dyn StyleSheet>,
    buttons: Vec<Option<Button<S::Node>>>,
    active: Option<WidgetId>,
    invalid: bool,
}

impl<S: SceneGraph> Panel<S> {
    /// A panel rendering into the given group.
    pub fn new(layer: S::Group, layout: Box<dyn Layout>, styles: Box<dyn StyleSheet>) -> Self {
        Self {
            layer,
            layout,
            styles,
            buttons: Vec::new(),
            active: None,
            invalid: true,
        }
    }

    /// Adds a button, returning its id. Later additions are hit-tested
    /// first, matching their on-top render order.
    pub fn add(&mut self, button: Button<S::Node>) -> WidgetId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "button count stays far below u32::MAX"
        )]
        let id = WidgetId(self.buttons.len() as u32);
        self.buttons.push(Some(button));
        self.invalid = true;
        id
    }

    /// Removes a button, destroying its background instance, and hands the
    /// button back. The ids of the remaining buttons are unchanged. A
    /// failed instance teardown is logged, matching the validation policy.
    pub fn remove(&mut self, scene: &mut S, id: WidgetId) -> Option<Button<S::Node>> {
        let mut button = self.buttons.get_mut(id.0 as usize)?.take()?;
        if let Some(mut instance) = button.instance.take() {
            if let Err(err) = instance.destroy(scene) {
                log::warn!("background teardown failed for removed widget: {err}");
            }
        }
        if self.active == Some(id) {
            self.active = None;
        }
        self.invalid = true;
        Some(button)
    }

    /// Shared access to a button.
    pub fn button(&self, id: WidgetId) -> Option<&Button<S::Node>> {
        self.buttons.get(id.0 as usize)?.as_ref()
    }

    /// Exclusive access to a button. Callers mutating flags should follow
    /// up with [`invalidate`](Panel::invalidate).
    pub fn button_mut(&mut self, id: WidgetId) -> Option<&mut Button<S::Node>> {
        self.buttons.get_mut(id.0 as usize)?.as_mut()
    }

    /// Number of buttons in the panel.
    pub fn len(&self) -> usize {
        self.buttons.iter().filter(|b| b.is_some()).count()
    }

    /// Returns `true` if the panel has no buttons.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Requests a layout/style reconciliation on the next render pass.
    pub fn invalidate(&mut self) {
        self.invalid = true;
    }

    /// Returns `true` if a reconciliation is pending.
    pub fn needs_validation(&self) -> bool {
        self.invalid
    }

    fn resolved_size(&self, button: &Button<S::Node>) -> Size {
        match self.styles.background(button.class()) {
            Some(bg) => bg.add_insets(button.content_size()),
            None => button.content_size(),
        }
    }
}

impl<S: SceneGraph> Root<S> for Panel<S> {
    type Widget = WidgetId;

    fn layer(&self) -> S::Group {
        self.layer
    }

    fn dispatch_pointer_start(
        &mut self,
        _scene: &mut S,
        event: &PointerEvent,
        _focus: FocusScope<'_, WidgetId>,
    ) -> bool {
        // Topmost first: a later addition overdraws an earlier one.
        for (idx, slot) in self.buttons.iter_mut().enumerate().rev() {
            let Some(button) = slot.as_mut() else {
                continue;
            };
            if !button.is_interactive() || !button.rect.contains(event.pos) {
                continue;
            }
            if button.gesture.press() {
                if let Some(hook) = button.on_press.as_mut() {
                    hook();
                }
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "button count stays far below u32::MAX"
                )]
                let id = WidgetId(idx as u32);
                self.active = Some(id);
                self.invalid = true;
                return true;
            }
        }
        false
    }

    fn dispatch_pointer_drag(
        &mut self,
        _scene: &mut S,
        event: &PointerEvent,
        _focus: FocusScope<'_, WidgetId>,
    ) {
        let Some(id) = self.active else {
            return;
        };
        if let Some(button) = self.button_mut(id) {
            let bounds = button.rect;
            if button.gesture.drag(event.pos, bounds).is_some() {
                self.invalid = true;
            }
        }
    }

    fn dispatch_pointer_end(
        &mut self,
        _scene: &mut S,
        _event: &PointerEvent,
        mut focus: FocusScope<'_, WidgetId>,
    ) {
        let Some(id) = self.active.take() else {
            return;
        };
        let Some(button) = self.buttons.get_mut(id.0 as usize).and_then(Option::as_mut) else {
            return;
        };
        if !button.gesture.release() {
            return;
        }
        self.invalid = true;
        if button.is_focusable() {
            focus.focus(id);
        }
        if let Some(hook) = button.on_click.as_mut() {
            hook();
        }
    }

    fn dispatch_key(&mut self, _scene: &mut S, widget: WidgetId, event: &KeyEvent) {
        if let Some(button) = self.button_mut(widget) {
            if let Some(hook) = button.on_key.as_mut() {
                hook(event);
            }
        }
    }

    /// Reconciles layout and backgrounds when invalidated.
    ///
    /// Measures every button (content size inflated by its resolved
    /// background), places them through the layout strategy, then rebuilds
    /// each button's background instance at its final size, destroying the
    /// previous instance first. A failed teardown of a stale instance is
    /// logged and skipped; it cannot block the pass.
    fn validate(&mut self, scene: &mut S) {
        if !self.invalid {
            return;
        }
        self.invalid = false;

        let mut live = Vec::new();
        let mut sizes = Vec::new();
        for (idx, slot) in self.buttons.iter().enumerate() {
            if let Some(button) = slot {
                live.push(idx);
                sizes.push(self.resolved_size(button));
            }
        }
        let origins = self.layout.arrange(&sizes);

        for ((&idx, size), origin) in live.iter().zip(&sizes).zip(origins) {
            let Some(button) = self.buttons[idx].as_mut() else {
                continue;
            };
            button.rect = Rect::from_origin_size(origin, *size);

            if let Some(mut old) = button.instance.take() {
                if let Err(err) = old.destroy(scene) {
                    log::warn!("stale background teardown failed: {err}");
                }
            }
            let class = button.class();
            if let Some(bg) = self.styles.background(class) {
                let mut instance = bg.instantiate(scene, *size);
                instance.add_to(scene, self.layer);
                if let Some(button) = self.buttons[idx].as_mut() {
                    button.instance = Some(instance);
                }
            }
        }
    }
}

impl<S: SceneGraph> core::fmt::Debug for Panel<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Panel")
            .field("layer", &self.layer)
            .field("buttons", &self.buttons)
            .field("active", &self.active)
            .field("invalid", &self.invalid)
            .finish_non_exhaustive()
    }
}
