/// Label fitting for box titles and one-row capsules.
use crate::model::size::{format_size_long, format_size_short};

/// What a node's label may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// Name followed by the size when there is room, e.g. `logs 12.00B`.
    #[default]
    NameWithSize,
    /// Name only.
    NameOnly,
}

/// Pick the longest label that fits in `width` characters.
///
/// Candidates are tried in order: name with the two-decimal size, name with
/// the rounded size, the bare name; if even the name is too long it is
/// truncated. Widths are counted in `char`s.
pub fn fit_label(name: &str, size: u64, width: usize, style: LabelStyle) -> String {
    if width == 0 {
        return String::new();
    }
    let name: String = name.chars().map(printable).collect();

    if style == LabelStyle::NameWithSize {
        for formatted in [format_size_long(size), format_size_short(size)] {
            let candidate = format!("{name} {formatted}");
            if candidate.chars().count() <= width {
                return candidate;
            }
        }
    }

    name.chars().take(width).collect()
}

/// Replace control characters with `?` so a file name can never emit
/// escape sequences or line breaks onto the terminal.
pub fn printable(ch: char) -> char {
    if ch.is_control() {
        '?'
    } else {
        ch
    }
}
