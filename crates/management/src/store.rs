//! Collaborator seams for the wizard and an in-memory store backed by DashMap.
//!
//! The in-memory store implements both traits for development and tests.

use campaign_core::{CampaignError, CampaignResult, DeliveryTiming, DraftIssue};
use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use crate::draft::CampaignDraft;
use crate::models::*;

/// Resolves an audience segment to its current member count.
pub trait SegmentProvider {
    fn segment_size(&self, segment_id: &Uuid) -> Option<u64>;
}

/// Receives saved drafts and launched campaigns.
pub trait CampaignStore {
    fn save_draft(&self, session_id: Uuid, draft: &CampaignDraft) -> CampaignResult<()>;

    /// Accepts a submittable draft and turns it into a campaign record.
    fn launch(&self, draft: CampaignDraft) -> CampaignResult<LaunchedCampaign>;
}

/// Thread-safe in-memory store for segments, drafts, launched campaigns, and audit log.
pub struct ManagementStore {
    segments: DashMap<Uuid, AudienceSegment>,
    drafts: DashMap<Uuid, CampaignDraft>,
    campaigns: DashMap<Uuid, LaunchedCampaign>,
    audit_log: DashMap<Uuid, AuditLogEntry>,
}

impl ManagementStore {
    pub fn new() -> Self {
        info!("Management store initialized (in-memory)");
        Self {
            segments: DashMap::new(),
            drafts: DashMap::new(),
            campaigns: DashMap::new(),
            audit_log: DashMap::new(),
        }
    }

    // ─── Segments ──────────────────────────────────────────────────────────

    pub fn add_segment(&self, name: impl Into<String>, size: u64) -> AudienceSegment {
        let segment = AudienceSegment {
            id: Uuid::new_v4(),
            name: name.into(),
            size,
        };
        self.segments.insert(segment.id, segment.clone());
        segment
    }

    /// Changes a segment's live count. Drafts keep the size captured at selection.
    pub fn resize_segment(&self, id: Uuid, size: u64) -> Option<AudienceSegment> {
        self.segments.get_mut(&id).map(|mut entry| {
            entry.value_mut().size = size;
            entry.value().clone()
        })
    }

    pub fn list_segments(&self) -> Vec<AudienceSegment> {
        let mut segments: Vec<AudienceSegment> =
            self.segments.iter().map(|r| r.value().clone()).collect();
        segments.sort_by(|a, b| a.name.cmp(&b.name));
        segments
    }

    // ─── Drafts ────────────────────────────────────────────────────────────

    pub fn get_draft(&self, session_id: Uuid) -> Option<CampaignDraft> {
        self.drafts.get(&session_id).map(|r| r.value().clone())
    }

    pub fn draft_count(&self) -> usize {
        self.drafts.len()
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn list_campaigns(&self) -> Vec<LaunchedCampaign> {
        let mut campaigns: Vec<LaunchedCampaign> =
            self.campaigns.iter().map(|r| r.value().clone()).collect();
        campaigns.sort_by(|a, b| b.launched_at.cmp(&a.launched_at));
        campaigns
    }

    pub fn get_campaign(&self, id: Uuid) -> Option<LaunchedCampaign> {
        self.campaigns.get(&id).map(|r| r.value().clone())
    }

    // ─── Audit Log ─────────────────────────────────────────────────────────

    pub fn get_audit_log(&self) -> Vec<AuditLogEntry> {
        let mut entries: Vec<AuditLogEntry> =
            self.audit_log.iter().map(|r| r.value().clone()).collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    fn log_audit(
        &self,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        details: serde_json::Value,
    ) {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            action,
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            details,
            timestamp: Utc::now(),
        };
        self.audit_log.insert(entry.id, entry);
    }
}

impl Default for ManagementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentProvider for ManagementStore {
    fn segment_size(&self, segment_id: &Uuid) -> Option<u64> {
        self.segments.get(segment_id).map(|s| s.size)
    }
}

impl CampaignStore for ManagementStore {
    fn save_draft(&self, session_id: Uuid, draft: &CampaignDraft) -> CampaignResult<()> {
        self.drafts.insert(session_id, draft.clone());
        self.log_audit(
            AuditAction::SaveDraft,
            "draft",
            &session_id.to_string(),
            serde_json::json!({"name": &draft.name}),
        );
        info!(session_id = %session_id, "Draft saved");
        Ok(())
    }

    fn launch(&self, draft: CampaignDraft) -> CampaignResult<LaunchedCampaign> {
        let issues = draft.issues();
        if !issues.is_empty() {
            return Err(CampaignError::DraftIncomplete(issues));
        }
        let Some(campaign_type) = draft.campaign_type else {
            return Err(CampaignError::DraftIncomplete(vec![DraftIssue::MissingType]));
        };

        let status = match draft.automation.timing {
            DeliveryTiming::Scheduled => CampaignStatus::Scheduled,
            DeliveryTiming::Now | DeliveryTiming::Recurring => CampaignStatus::Active,
        };
        let campaign = LaunchedCampaign {
            id: Uuid::new_v4(),
            name: draft.name,
            campaign_type,
            status,
            audience_segment_id: draft.audience_segment_id,
            audience_size: draft.audience_size,
            filters: draft.filters,
            message: draft.message,
            automation: draft.automation,
            launched_at: Utc::now(),
        };
        self.campaigns.insert(campaign.id, campaign.clone());
        self.log_audit(
            AuditAction::Launch,
            "campaign",
            &campaign.id.to_string(),
            serde_json::json!({"name": &campaign.name, "type": campaign_type}),
        );
        info!(campaign_id = %campaign.id, campaign_type = %campaign_type, "Campaign launched");
        Ok(campaign)
    }
}
