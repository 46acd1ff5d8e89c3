//! CLI library components for the bugtab export processor.

pub mod logging;
pub mod pipeline;
