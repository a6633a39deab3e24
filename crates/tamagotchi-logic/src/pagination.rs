//! Position within the animal collection.

use std::fmt;

/// Zero-based `index` into a collection of `total` animals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub index: usize,
    pub total: usize,
}

impl Page {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }

    pub fn can_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_next(&self) -> bool {
        self.index + 1 < self.total
    }

    /// Move back one, staying put at the first animal.
    pub fn previous(self) -> Self {
        Self {
            index: if self.can_previous() { self.index - 1 } else { self.index },
            ..self
        }
    }

    /// Move forward one, staying put at the last animal.
    pub fn next(self) -> Self {
        Self {
            index: if self.can_next() { self.index + 1 } else { self.index },
            ..self
        }
    }

    /// The paginator only shows with more than one animal.
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.index + 1, self.total)
    }
}
