use thiserror::Error;
use uuid::Uuid;

use crate::types::{DraftIssue, WizardStep};

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{step} is incomplete: {}", join_issues(.issues))]
    StepIncomplete {
        step: WizardStep,
        issues: Vec<DraftIssue>,
    },

    #[error("Draft cannot be launched: {}", join_issues(.0))]
    DraftIncomplete(Vec<DraftIssue>),

    #[error("Launch is only available from the review step, currently at {0}")]
    NotAtReview(WizardStep),

    #[error("Wizard session already launched")]
    SessionClosed,

    #[error("Audience segment not found: {0}")]
    SegmentNotFound(Uuid),

    #[error("Campaign store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CampaignError {
    /// Field-level issues carried by a validation failure, empty for other errors.
    pub fn issues(&self) -> &[DraftIssue] {
        match self {
            CampaignError::StepIncomplete { issues, .. } => issues.as_slice(),
            CampaignError::DraftIncomplete(issues) => issues.as_slice(),
            _ => &[],
        }
    }
}

impl From<config::ConfigError> for CampaignError {
    fn from(err: config::ConfigError) -> Self {
        CampaignError::Config(err.to_string())
    }
}

fn join_issues(issues: &[DraftIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
