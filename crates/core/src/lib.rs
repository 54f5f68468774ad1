//! Shared kernel for the campaign builder: channel and step enums,
//! configuration, and the common error type.

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult};
pub use types::{CampaignType, DeliveryTiming, DraftIssue, WizardStep};
