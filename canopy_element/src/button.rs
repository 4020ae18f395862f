// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;

use kurbo::{Rect, Size};

use canopy_background::BackgroundInstance;
use canopy_gesture::PressGesture;
use canopy_interface::KeyEvent;

/// Identifies a widget within one panel. Ids are stable for the panel's
/// lifetime; removing a widget does not shift the others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(pub u32);

bitflags::bitflags! {
    /// Element state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element reacts to pointer input.
        const ENABLED   = 0b0000_0001;
        /// Element is hit-testable and rendered.
        const VISIBLE   = 0b0000_0010;
        /// Element re-acquires keyboard focus when a click commits on it.
        const FOCUSABLE = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::ENABLED | Self::VISIBLE
    }
}

/// Hook fired when a press activates on a button.
pub type PressHook = Box<dyn FnMut()>;

/// Hook fired when a click commits on a button.
pub type ClickHook = Box<dyn FnMut()>;

/// Hook fired when a keyboard event reaches a focused button.
pub type KeyHook = Box<dyn FnMut(&KeyEvent)>;

/// A clickable widget: a style class, a content size, a press gesture,
/// and optional press/click/key hooks.
///
/// Buttons hold their own drawable state (the background instance built
/// during the panel's validation pass) but never talk to the dispatcher
/// directly; the owning [`Panel`](crate::Panel) routes events to them.
pub struct Button<N: Copy + Eq> {
    class: String,
    content_size: Size,
    flags: ElementFlags,
    pub(crate) gesture: PressGesture,
    pub(crate) rect: Rect,
    pub(crate) instance: Option<BackgroundInstance<N>>,
    pub(crate) on_press: Option<PressHook>,
    pub(crate) on_click: Option<ClickHook>,
    pub(crate) on_key: Option<KeyHook>,
}

impl<N: Copy + Eq> Button<N> {
    /// A visible, enabled button with the given style class and content
    /// size.
    pub fn new(class: impl Into<String>, content_size: Size) -> Self {
        Self {
            class: class.into(),
            content_size,
            flags: ElementFlags::default(),
            gesture: PressGesture::new(),
            rect: Rect::ZERO,
            instance: None,
            on_press: None,
            on_click: None,
            on_key: None,
        }
    }

    /// Marks the button focusable. Builder style.
    #[must_use]
    pub fn focusable(mut self) -> Self {
        self.flags |= ElementFlags::FOCUSABLE;
        self
    }

    /// Installs the press hook. Builder style.
    #[must_use]
    pub fn on_press(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(hook));
        self
    }

    /// Installs the click hook. Builder style.
    #[must_use]
    pub fn on_click(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(hook));
        self
    }

    /// Installs the key hook. Builder style.
    #[must_use]
    pub fn on_key(mut self, hook: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.on_key = Some(Box::new(hook));
        self
    }

    /// The button's style class.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The size of the button's content, excluding background insets.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// The button's bounds within its panel, as of the last validation.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The button's state flags.
    pub fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Returns `true` while a press is tracking inside the button.
    pub fn is_selected(&self) -> bool {
        self.gesture.is_selected()
    }

    /// Enables or disables the button, keeping the gesture machine in sync.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.flags.set(ElementFlags::ENABLED, enabled);
        self.gesture.set_enabled(enabled);
    }

    pub(crate) fn is_interactive(&self) -> bool {
        self.flags
            .contains(ElementFlags::ENABLED | ElementFlags::VISIBLE)
    }

    pub(crate) fn is_focusable(&self) -> bool {
        self.flags.contains(ElementFlags::FOCUSABLE)
    }
}

impl<N: Copy + Eq> core::fmt::Debug for Button<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Button")
            .field("class", &self.class)
            .field("content_size", &self.content_size)
            .field("flags", &self.flags)
            .field("rect", &self.rect)
            .field("selected", &self.gesture.is_selected())
            .finish_non_exhaustive()
    }
}
