//! Campaign analytics — funnel conversion and drop-off metrics.

pub mod funnel;

pub use funnel::{
    compute_conversions, compute_conversions_with_precision, FunnelAnalyzer, FunnelDefinition,
    FunnelReport, FunnelStep, FunnelStepResult,
};
