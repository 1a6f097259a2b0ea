/// Characters used to draw boxes and capsules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// End caps of a one-row capsule.
    pub cap_left: char,
    pub cap_right: char,
    /// End caps of a one-column capsule.
    pub cap_top: char,
    pub cap_bottom: char,
    /// A node squeezed into a single cell.
    pub marker: char,
}

impl GlyphSet {
    /// Unicode box-drawing borders.
    pub const BOX: GlyphSet = GlyphSet {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
        cap_left: '<',
        cap_right: '>',
        cap_top: '^',
        cap_bottom: 'v',
        marker: '*',
    };

    /// Plain ASCII borders for terminals without line-drawing support.
    pub const ASCII: GlyphSet = GlyphSet {
        top_left: '/',
        top_right: '\\',
        bottom_left: '\\',
        bottom_right: '/',
        horizontal: '-',
        vertical: '|',
        cap_left: '<',
        cap_right: '>',
        cap_top: '^',
        cap_bottom: 'v',
        marker: '*',
    };
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::BOX
    }
}
