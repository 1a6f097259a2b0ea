/// Colour scheme for the treemap.
///
/// Files share one background; directories cycle through six backgrounds
/// by nesting depth so neighbouring levels are easy to tell apart. All
/// text is drawn white on top.
use crossterm::style::{Color, Colors};
use spacemap_core::layout::Category;

/// Backgrounds indexed by [`Category`]: files first, then directory tints.
const BACKGROUNDS: [Color; Category::COUNT] = [
    Color::Black,
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkCyan,
    Color::DarkBlue,
    Color::DarkMagenta,
];

/// Maps cell categories to terminal colours.
#[derive(Debug, Clone)]
pub struct Palette {
    foreground: Color,
    backgrounds: [Color; Category::COUNT],
}

impl Palette {
    pub fn standard() -> Self {
        Self {
            foreground: Color::White,
            backgrounds: BACKGROUNDS,
        }
    }

    /// Colours for a cell. Out-of-range categories wrap around.
    pub fn colors(&self, category: Category) -> Colors {
        let background = self.backgrounds[category.0 as usize % self.backgrounds.len()];
        Colors::new(self.foreground, background)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_and_directories_differ() {
        let palette = Palette::standard();
        let file = palette.colors(Category::FILE);
        for depth in 0..6 {
            assert_ne!(palette.colors(Category::directory(depth)), file);
        }
    }

    #[test]
    fn out_of_range_categories_wrap() {
        let palette = Palette::standard();
        assert_eq!(
            palette.colors(Category(Category::COUNT as u8)),
            palette.colors(Category::FILE)
        );
    }
}
