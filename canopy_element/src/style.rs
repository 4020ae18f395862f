// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style seam consumed by [`Panel`](crate::Panel).

use alloc::collections::BTreeMap;
use alloc::string::String;

use canopy_background::Background;

/// Resolves a widget's style class to a background template.
///
/// Cascading, inheritance, and per-state styling live behind this seam;
/// the element layer only ever asks one question. A `None` answer means
/// the widget renders without a background.
pub trait StyleSheet {
    /// The background template for the given style class, if any.
    fn background(&self, class: &str) -> Option<&Background>;
}

/// A flat class-to-background map, sufficient for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MapStyles {
    entries: BTreeMap<String, Background>,
}

impl MapStyles {
    /// An empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a class to a background template, replacing any previous
    /// binding.
    pub fn insert(&mut self, class: impl Into<String>, background: Background) {
        self.entries.insert(class.into(), background);
    }
}

impl StyleSheet for MapStyles {
    fn background(&self, class: &str) -> Option<&Background> {
        self.entries.get(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_background::Fill;
    use peniko::Color;

    #[test]
    fn lookup_misses_return_none() {
        let mut styles = MapStyles::new();
        styles.insert("button", Background::solid_uniform(Color::BLACK, 2.0));
        assert!(styles.background("button").is_some());
        assert!(styles.background("label").is_none());
    }

    #[test]
    fn later_bindings_replace_earlier_ones() {
        let mut styles = MapStyles::new();
        styles.insert("button", Background::solid(Color::BLACK));
        styles.insert("button", Background::solid_uniform(Color::WHITE, 3.0));
        let bg = styles.background("button").unwrap();
        assert_eq!(bg.width(), 6.0);
        assert!(matches!(bg.fill(), Fill::Solid(c) if *c == Color::WHITE));
    }
}
