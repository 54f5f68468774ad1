//! Campaign builder backend — draft aggregate, five-step wizard, and the
//! collaborator seams it launches through.
//!
//! Data stored in DashMap (development); swap the `CampaignStore`
//! implementation for a durable backend in production.

pub mod draft;
pub mod models;
pub mod store;
pub mod wizard;

pub use draft::CampaignDraft;
pub use store::{CampaignStore, ManagementStore, SegmentProvider};
pub use wizard::CampaignWizard;
