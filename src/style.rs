use std::ops::{BitOr, BitOrAssign};

/// Style flags applied to a whole text object.
///
/// Flags combine with `|`: `Style::BOLD | Style::UNDERLINED`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style(u8);

impl Style {
    /// No styling.
    pub const REGULAR: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const ITALIC: Self = Self(1 << 1);
    pub const UNDERLINED: Self = Self(1 << 2);
    pub const STRIKETHROUGH: Self = Self(1 << 3);

    /// Checks whether every flag in `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Style {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Style {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Policy applied when text exceeds the maximum box size.
pub enum Overflow {
    /// Keep everything on one visual line, truncating with an ellipsis when
    /// the width budget is exceeded.
    #[default]
    Clamp,
    /// Break text across multiple lines at the width/height budgets.
    Wrap,
}
