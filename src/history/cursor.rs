use std::fmt;

/// The playhead: the index of the last applied history entry.
///
/// `Cursor::START` is the position before any message, shown as `-1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(Option<usize>);

impl Cursor {
    pub const START: Cursor = Cursor(None);

    pub fn at(index: usize) -> Self {
        Self(Some(index))
    }

    /// The cursor on the last entry of a log of `len` entries.
    pub fn last(len: usize) -> Self {
        Self(len.checked_sub(1))
    }

    /// The cursor on the entry just before `index`.
    pub fn preceding(index: usize) -> Self {
        Self(index.checked_sub(1))
    }

    /// Validate a signed position (`-1..len`) against a log length.
    pub fn from_position(position: isize, len: usize) -> Option<Self> {
        match position {
            -1 => Some(Self::START),
            p if p >= 0 && (p as usize) < len => Some(Self::at(p as usize)),
            _ => None,
        }
    }

    pub fn index(self) -> Option<usize> {
        self.0
    }

    pub fn position(self) -> isize {
        self.0.map_or(-1, |index| index as isize)
    }

    /// How many entries are applied at this position.
    pub fn applied_len(self) -> usize {
        self.0.map_or(0, |index| index + 1)
    }

    pub fn is_start(self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position())
    }
}
