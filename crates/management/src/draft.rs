//! The in-progress campaign configuration shared by every wizard step.
//!
//! Mutators never validate; an incomplete draft is always representable.
//! Completeness is checked by [`CampaignDraft::issues`] and
//! [`CampaignDraft::review`] when the draft is about to be launched.

use campaign_core::{CampaignType, DeliveryTiming, DraftIssue, WizardStep};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub campaign_type: Option<CampaignType>,
    #[serde(default)]
    pub audience_segment_id: Option<Uuid>,
    /// Segment size captured when the segment was selected; not kept live.
    #[serde(default)]
    pub audience_size: u64,
    #[serde(default)]
    pub filters: Vec<FilterCriterion>,
    #[serde(default)]
    pub message: CampaignMessage,
    #[serde(default)]
    pub automation: AutomationSettings,
}

impl CampaignDraft {
    /// An empty draft: no type, no audience, empty content, immediate delivery.
    pub fn create() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_type(&mut self, campaign_type: CampaignType) {
        self.campaign_type = Some(campaign_type);
    }

    pub fn set_audience(&mut self, segment_id: Uuid, size: u64) {
        self.audience_segment_id = Some(segment_id);
        self.audience_size = size;
    }

    pub fn update_message(&mut self, patch: MessagePatch) {
        let m = &mut self.message;
        if let Some(subject) = patch.subject {
            m.subject = Some(subject);
        }
        if let Some(content) = patch.content {
            m.content = content;
        }
        if let Some(url) = patch.media_url {
            m.media_url = Some(url);
        }
        if let Some(goal) = patch.goal {
            m.goal = Some(goal);
        }
        if let Some(ai) = patch.ai_optimized {
            m.ai_optimized = ai;
        }
    }

    pub fn update_automation(&mut self, patch: AutomationPatch) {
        let a = &mut self.automation;
        if let Some(timing) = patch.timing {
            a.timing = timing;
        }
        if let Some(date) = patch.scheduled_date {
            a.scheduled_date = Some(date);
        }
        if let Some(conditions) = patch.conditions {
            a.conditions = conditions;
        }
    }

    pub fn add_filter(&mut self, filter: FilterCriterion) {
        self.filters.push(filter);
    }

    /// Removes the filter at `index`, returning it if present.
    pub fn remove_filter(&mut self, index: usize) -> Option<FilterCriterion> {
        (index < self.filters.len()).then(|| self.filters.remove(index))
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Every condition that currently blocks submission, in field order.
    pub fn issues(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();
        if self.campaign_type.is_none() {
            issues.push(DraftIssue::MissingType);
        }
        if self.message.content.is_empty() {
            issues.push(DraftIssue::EmptyContent);
        }
        if self.automation.timing == DeliveryTiming::Scheduled
            && self.automation.scheduled_date.is_none()
        {
            issues.push(DraftIssue::MissingScheduledDate);
        }
        issues
    }

    pub fn is_submittable(&self) -> bool {
        self.issues().is_empty()
    }

    /// Issues owned by a single wizard step. Audience selection is only
    /// enforced here; it never blocks launch.
    pub fn step_issues(&self, step: WizardStep) -> Vec<DraftIssue> {
        match step {
            WizardStep::Type if self.campaign_type.is_none() => vec![DraftIssue::MissingType],
            WizardStep::Audience if self.audience_segment_id.is_none() => {
                vec![DraftIssue::MissingAudience]
            }
            WizardStep::Message if self.message.content.is_empty() => {
                vec![DraftIssue::EmptyContent]
            }
            WizardStep::Automation => self
                .issues()
                .into_iter()
                .filter(|i| *i == DraftIssue::MissingScheduledDate)
                .collect(),
            WizardStep::Review => self.issues(),
            _ => Vec::new(),
        }
    }

    pub fn review(&self) -> DraftReview {
        let issues = self.issues();
        let mut warnings = Vec::new();

        if self.audience_segment_id.is_none() {
            warnings.push(DraftWarning::NoAudienceSelected);
        }
        if let Some(kind) = self.campaign_type {
            let has_subject = self
                .message
                .subject
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty());
            if kind.uses_subject() && !has_subject {
                warnings.push(DraftWarning::MissingSubject);
            } else if !kind.uses_subject() && has_subject {
                warnings.push(DraftWarning::SubjectIgnored);
            }
        }
        if self.automation.timing != DeliveryTiming::Scheduled
            && self.automation.scheduled_date.is_some()
        {
            warnings.push(DraftWarning::ScheduledDateIgnored);
        }

        DraftReview {
            can_launch: issues.is_empty(),
            issues,
            warnings,
        }
    }

    /// Discards everything accumulated so far.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::create();
        self
    }
}
