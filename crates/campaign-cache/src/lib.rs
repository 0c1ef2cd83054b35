//! # Campaign Cache
//!
//! 排程結果緩存模組

pub mod memo;

// Re-export 主要類型
pub use memo::ScheduleMemo;
