//! lexcap-roi
//!
//! Savings estimate for captured expertise and the unbilled-time recovery
//! analysis behind it.

pub mod calculator;
pub mod recovery;

pub use calculator::{calculate_roi, calculate_roi_with, BreakdownItem, RoiReport, DEFAULT_LAWYERS};
pub use recovery::{ActivityKind, RecoveryError, RecoverySession, RecoverySummary, UnbilledActivity};
