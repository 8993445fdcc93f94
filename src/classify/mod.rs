//! Cell classification by corner unlock state
//!
//! Every cell of a window is labelled with a [`CellClass`] derived from how
//! many of its four corners are unlocked, optionally refined by looking at
//! its 4-connected neighbours. Classification never fails: data that cannot
//! be read is treated as fully locked.

pub mod class;
pub mod window;
pub mod classifier;

pub use class::{CellClass, ClassifyPolicy};
pub use window::{Cell, CellWindow, ClassifiedWindow};
pub use classifier::{CellClassifier, NEIGHBOR_OFFSETS};
