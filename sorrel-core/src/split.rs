// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::fmt;

use crate::constant::{TRAIN_DIR, VAL_DIR};

/// The train/val partition an image is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Val,
}

impl Split {
    /// Assign a split from a stable per-file discovery index
    ///
    /// Every tenth-block of discovered files sends positions 8 and 9 to the
    /// validation set, giving a deterministic, ordering-biased 80/20 split.
    /// The index counts all discovered files, including ones later skipped
    /// for a missing sidecar, so assignment depends only on traversal order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorrel_core::split::Split;
    ///
    /// assert_eq!(Split::from_index(3), Split::Train);
    /// assert_eq!(Split::from_index(8), Split::Val);
    /// ```
    pub fn from_index(index: usize) -> Split {
        if index % 10 >= 8 {
            Split::Val
        } else {
            Split::Train
        }
    }

    /// The output directory name for this split
    pub fn dir_name(&self) -> &'static str {
        match self {
            Split::Train => TRAIN_DIR,
            Split::Val => VAL_DIR,
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}
