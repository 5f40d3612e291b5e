//! Time arithmetic on top of a resolved table row: the ordered adjustment
//! pipeline and the next-prayer resolver.

pub mod adjust;
pub mod next;

pub use adjust::{adjust, apply_offsets, AdjustmentContext, AdjustmentStep};
pub use next::{passed, resolve_next};
