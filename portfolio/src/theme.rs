use log::debug;

use crate::render::{RenderTarget, StyleProperty};

/// A background image and the colors coordinated with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundTheme {
    pub image_name: &'static str,
    pub primary_color: &'static str,
    pub heading_background_color: &'static str,
    pub highlight_background_color: &'static str,
    pub button_background_color: &'static str,
}

impl BackgroundTheme {
    /// Relative path of the background image.
    pub fn image_path(&self) -> String {
        format!("images/{}", self.image_name)
    }

    pub fn color(&self, property: StyleProperty) -> Option<&'static str> {
        match property {
            StyleProperty::PrimaryColor => Some(self.primary_color),
            StyleProperty::HeadingBackgroundColor => Some(self.heading_background_color),
            StyleProperty::HighlightBackgroundColor => Some(self.highlight_background_color),
            StyleProperty::ButtonBackgroundColor => Some(self.button_background_color),
            StyleProperty::BackgroundImage => None,
        }
    }

    /// Sets the background image and all four color properties.
    pub fn apply<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        target.set_style(StyleProperty::BackgroundImage, &format!("url({})", self.image_path()));
        for property in StyleProperty::COLORS {
            if let Some(value) = self.color(property) {
                target.set_style(property, value);
            }
        }
    }
}

pub const THEMES: [BackgroundTheme; 6] = [
    BackgroundTheme {
        image_name: "forest.jpg",
        primary_color: "#523029",
        heading_background_color: "rgba(160,82,45,.1)",
        highlight_background_color: "rgba(160,82,45,.3)",
        button_background_color: "sienna",
    },
    BackgroundTheme {
        image_name: "ocean.jpg",
        primary_color: "navy",
        heading_background_color: "rgba(65,105,225,.1)",
        highlight_background_color: "rgba(65,105,225,.3)",
        button_background_color: "royalblue",
    },
    BackgroundTheme {
        image_name: "mountain.jpg",
        primary_color: "midnightblue",
        heading_background_color: "rgba(0,128,128,.15)",
        highlight_background_color: "rgba(0,128,128,.35)",
        button_background_color: "teal",
    },
    BackgroundTheme {
        image_name: "balloons.jpg",
        primary_color: "indianred",
        heading_background_color: "rgba(255,215,0,.2)",
        highlight_background_color: "rgba(255,215,0,.4)",
        button_background_color: "goldenrod",
    },
    BackgroundTheme {
        image_name: "iceberg.jpg",
        primary_color: "darkslategray",
        heading_background_color: "rgba(72,61,139,.2)",
        highlight_background_color: "rgba(72,61,139,.4)",
        button_background_color: "darkslateblue",
    },
    BackgroundTheme {
        image_name: "grass.jpg",
        primary_color: "green",
        heading_background_color: "rgba(173,255,47,.2)",
        highlight_background_color: "rgba(173,255,47,.4)",
        button_background_color: "olivedrab",
    },
];

/// Index of the active theme. Always in `[0, THEMES.len())`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeCursor {
    index: usize,
}

impl ThemeCursor {
    /// Cursor at `index`, wrapped into range.
    pub fn new(index: usize) -> Self {
        Self { index: index % THEMES.len() }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &'static BackgroundTheme {
        &THEMES[self.index]
    }

    /// Moves by `offset` entries with wraparound and returns the new theme.
    pub fn advance(&mut self, offset: isize) -> &'static BackgroundTheme {
        self.index = wrap_index(self.index, offset, THEMES.len());
        debug!("background cursor moved by {offset} to {} ({})", self.index, THEMES[self.index].image_name);
        self.current()
    }

    pub fn next(&mut self) -> &'static BackgroundTheme {
        self.advance(1)
    }

    pub fn prev(&mut self) -> &'static BackgroundTheme {
        self.advance(-1)
    }

    /// Advances and applies the newly selected theme to `target`.
    pub fn advance_and_apply<T: RenderTarget + ?Sized>(&mut self, offset: isize, target: &mut T) {
        self.advance(offset).apply(target);
    }
}

/// `((index + offset) mod len + len) mod len`, for any offset magnitude.
fn wrap_index(index: usize, offset: isize, len: usize) -> usize {
    let len = len as isize;
    let moved = (index as isize % len + offset % len) % len;
    ((moved + len) % len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryTarget;
    use rand::{Rng, SeedableRng};

    #[test]
    fn wraps_both_directions() {
        let mut cursor = ThemeCursor::default();
        assert_eq!(cursor.prev().image_name, "grass.jpg");
        assert_eq!(cursor.index(), 5);
        assert_eq!(cursor.next().image_name, "forest.jpg");
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn large_offsets_stay_in_range() {
        assert_eq!(wrap_index(0, -13, 6), 5);
        assert_eq!(wrap_index(2, 600, 6), 2);
        assert_eq!(wrap_index(5, -6, 6), 5);
        assert_eq!(wrap_index(3, isize::MIN, 6), 1);
        assert_eq!(wrap_index(3, isize::MAX, 6), 4);
    }

    #[test]
    fn random_walks_stay_in_range() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for start in 0..THEMES.len() {
            let mut cursor = ThemeCursor::new(start);
            for _ in 0..500 {
                let step = if rng.gen_bool(0.5) { 1 } else { -1 };
                cursor.advance(step);
                assert!(cursor.index() < THEMES.len());
            }
        }
    }

    #[test]
    fn six_steps_return_to_start() {
        for start in 0..THEMES.len() {
            let mut cursor = ThemeCursor::new(start);
            for _ in 0..6 {
                cursor.next();
            }
            assert_eq!(cursor.index(), start);
        }
    }

    #[test]
    fn apply_sets_all_colors_together() {
        let mut target = MemoryTarget::new();
        let mut cursor = ThemeCursor::default();
        cursor.advance_and_apply(1, &mut target);

        assert_eq!(target.style_writes(), 5);
        assert_eq!(target.style(StyleProperty::BackgroundImage), Some("url(images/ocean.jpg)"));
        let ocean = &THEMES[1];
        for property in StyleProperty::COLORS {
            assert_eq!(target.style(property), ocean.color(property));
        }

        cursor.advance_and_apply(1, &mut target);
        assert_eq!(target.style_writes(), 10);
        for property in StyleProperty::COLORS {
            assert_eq!(target.style(property), THEMES[2].color(property));
        }
    }
}
