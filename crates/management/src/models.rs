//! Management domain types — draft sub-records, edit patches, launched
//! campaigns, audit log.

use campaign_core::{CampaignType, DeliveryTiming, DraftIssue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Message ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignMessage {
    /// Only meaningful for email and ads campaigns.
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub ai_optimized: bool,
}

/// Partial update for [`CampaignMessage`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagePatch {
    pub subject: Option<String>,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub goal: Option<String>,
    pub ai_optimized: Option<bool>,
}

impl MessagePatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

// ─── Automation ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRule {
    pub trigger: String,
    pub action: String,
    #[serde(default)]
    pub wait_hours: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationSettings {
    #[serde(default)]
    pub timing: DeliveryTiming,
    /// Required iff `timing` is `Scheduled`.
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub conditions: Vec<AutomationRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutomationPatch {
    pub timing: Option<DeliveryTiming>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub conditions: Option<Vec<AutomationRule>>,
}

impl AutomationPatch {
    pub fn timing(timing: DeliveryTiming) -> Self {
        Self {
            timing: Some(timing),
            ..Default::default()
        }
    }

    pub fn scheduled_at(date: DateTime<Utc>) -> Self {
        Self {
            timing: Some(DeliveryTiming::Scheduled),
            scheduled_date: Some(date),
            ..Default::default()
        }
    }
}

// ─── Audience filters ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    IsSet,
    IsNotSet,
    InList,
}

/// Extra narrowing applied on top of the selected segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl FilterCriterion {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: serde_json::Value,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

// ─── Review ────────────────────────────────────────────────────────────────

/// Non-blocking observations shown on the review step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftWarning {
    NoAudienceSelected,
    MissingSubject,
    SubjectIgnored,
    ScheduledDateIgnored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftReview {
    pub issues: Vec<DraftIssue>,
    pub warnings: Vec<DraftWarning>,
    pub can_launch: bool,
}

// ─── Segments ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceSegment {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
}

// ─── Launched campaign ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Scheduled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchedCampaign {
    pub id: Uuid,
    pub name: String,
    pub campaign_type: CampaignType,
    pub status: CampaignStatus,
    pub audience_segment_id: Option<Uuid>,
    pub audience_size: u64,
    pub filters: Vec<FilterCriterion>,
    pub message: CampaignMessage,
    pub automation: AutomationSettings,
    pub launched_at: DateTime<Utc>,
}

// ─── Audit Log ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    SaveDraft,
    Launch,
}
