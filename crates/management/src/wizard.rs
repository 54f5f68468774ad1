//! Five-step campaign builder session.
//!
//! The wizard owns one [`CampaignDraft`] and tracks the current step. Step
//! components edit the draft through [`CampaignWizard::draft_mut`] or the
//! typed edit helpers; nothing is shared outside the session.

use campaign_core::config::WizardConfig;
use campaign_core::{CampaignError, CampaignResult, CampaignType, WizardStep};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::draft::CampaignDraft;
use crate::models::*;
use crate::store::{CampaignStore, SegmentProvider};

pub struct CampaignWizard<'a> {
    session_id: Uuid,
    step: WizardStep,
    draft: CampaignDraft,
    strict_step_gate: bool,
    segments: &'a dyn SegmentProvider,
    store: &'a dyn CampaignStore,
    launched: Option<Uuid>,
}

impl<'a> CampaignWizard<'a> {
    pub fn new(
        config: &WizardConfig,
        segments: &'a dyn SegmentProvider,
        store: &'a dyn CampaignStore,
    ) -> Self {
        let session_id = Uuid::new_v4();
        debug!(
            session_id = %session_id,
            strict = config.strict_step_gate,
            "Wizard session started"
        );
        Self {
            session_id,
            step: WizardStep::Type,
            draft: CampaignDraft::create(),
            strict_step_gate: config.strict_step_gate,
            segments,
            store,
            launched: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    /// Direct access for step components that edit several fields at once.
    pub fn draft_mut(&mut self) -> &mut CampaignDraft {
        &mut self.draft
    }

    /// Id of the launched campaign once the session has completed.
    pub fn launched_campaign_id(&self) -> Option<Uuid> {
        self.launched
    }

    pub fn is_closed(&self) -> bool {
        self.launched.is_some()
    }

    // ─── Navigation ────────────────────────────────────────────────────────

    /// Advances one step. A no-op on the review step.
    ///
    /// With the strict gate on, refuses to leave a step that still has issues.
    pub fn go_next(&mut self) -> CampaignResult<WizardStep> {
        if self.is_closed() {
            return Err(CampaignError::SessionClosed);
        }
        let Some(next) = self.step.next() else {
            return Ok(self.step);
        };
        if self.strict_step_gate {
            let issues = self.draft.step_issues(self.step);
            if !issues.is_empty() {
                warn!(
                    session_id = %self.session_id,
                    step = %self.step,
                    ?issues,
                    "Step gate refused"
                );
                return Err(CampaignError::StepIncomplete {
                    step: self.step,
                    issues,
                });
            }
        }
        debug!(session_id = %self.session_id, from = %self.step, to = %next, "Wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Moves back one step. A no-op on the first step.
    pub fn go_back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            debug!(
                session_id = %self.session_id,
                from = %self.step,
                to = %previous,
                "Wizard went back"
            );
            self.step = previous;
        }
        self.step
    }

    // ─── Edits ─────────────────────────────────────────────────────────────

    pub fn rename(&mut self, name: impl Into<String>) {
        self.draft.set_name(name);
    }

    pub fn select_type(&mut self, campaign_type: CampaignType) {
        self.draft.set_type(campaign_type);
    }

    /// Selects a segment and snapshots its current size into the draft.
    pub fn select_audience(&mut self, segment_id: Uuid) -> CampaignResult<u64> {
        let size = self
            .segments
            .segment_size(&segment_id)
            .ok_or(CampaignError::SegmentNotFound(segment_id))?;
        self.draft.set_audience(segment_id, size);
        Ok(size)
    }

    pub fn add_filter(&mut self, filter: FilterCriterion) {
        self.draft.add_filter(filter);
    }

    pub fn edit_message(&mut self, patch: MessagePatch) {
        self.draft.update_message(patch);
    }

    pub fn edit_automation(&mut self, patch: AutomationPatch) {
        self.draft.update_automation(patch);
    }

    // ─── Submission ────────────────────────────────────────────────────────

    pub fn review(&self) -> DraftReview {
        self.draft.review()
    }

    /// Hands the draft to the store without moving the wizard.
    pub fn save_draft(&self) -> CampaignResult<()> {
        if self.is_closed() {
            return Err(CampaignError::SessionClosed);
        }
        self.store.save_draft(self.session_id, &self.draft)
    }

    /// Launches from the review step. On any failure the draft and the
    /// current step are left untouched so the user can correct it.
    pub fn launch(&mut self) -> CampaignResult<LaunchedCampaign> {
        if self.is_closed() {
            return Err(CampaignError::SessionClosed);
        }
        if self.step != WizardStep::Review {
            return Err(CampaignError::NotAtReview(self.step));
        }
        let issues = self.draft.issues();
        if !issues.is_empty() {
            warn!(session_id = %self.session_id, ?issues, "Launch refused");
            return Err(CampaignError::DraftIncomplete(issues));
        }

        let campaign = self.store.launch(self.draft.clone())?;
        info!(session_id = %self.session_id, campaign_id = %campaign.id, "Wizard session launched");
        self.launched = Some(campaign.id);
        Ok(campaign)
    }

    /// Throws the draft away and starts over at the first step. A launched
    /// session is reopened under a fresh session id.
    pub fn discard(&mut self) {
        debug!(session_id = %self.session_id, "Draft discarded");
        self.draft.reset();
        self.step = WizardStep::Type;
        if self.launched.take().is_some() {
            self.session_id = Uuid::new_v4();
            debug!(session_id = %self.session_id, "Wizard session restarted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ManagementStore;
    use campaign_core::{DeliveryTiming, DraftIssue};
    use chrono::{Duration, Utc};
    use std::cell::Cell;

    fn strict() -> WizardConfig {
        WizardConfig {
            strict_step_gate: true,
        }
    }

    fn advance_to_review(wizard: &mut CampaignWizard<'_>) {
        while wizard.current_step() != WizardStep::Review {
            wizard.go_next().unwrap();
        }
    }

    /// A store that refuses every launch.
    struct RejectingStore {
        attempts: Cell<u32>,
    }

    impl CampaignStore for RejectingStore {
        fn save_draft(&self, _session_id: Uuid, _draft: &CampaignDraft) -> CampaignResult<()> {
            Ok(())
        }

        fn launch(&self, _draft: CampaignDraft) -> CampaignResult<LaunchedCampaign> {
            self.attempts.set(self.attempts.get() + 1);
            Err(CampaignError::Store("backend unavailable".to_string()))
        }
    }

    #[test]
    fn test_navigation_bounds() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        assert_eq!(wizard.current_step(), WizardStep::Type);
        assert_eq!(wizard.go_back(), WizardStep::Type);

        for expected in 2..=5 {
            let step = wizard.go_next().unwrap();
            assert_eq!(step.number(), expected);
        }
        assert_eq!(wizard.go_next().unwrap(), WizardStep::Review);
        assert_eq!(wizard.go_back(), WizardStep::Automation);
    }

    #[test]
    fn test_free_navigation_ignores_empty_steps() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        advance_to_review(&mut wizard);
        assert!(!wizard.draft().is_submittable());
    }

    #[test]
    fn test_strict_gate_blocks_until_step_complete() {
        let store = ManagementStore::new();
        let segment = store.add_segment("Loyal customers", 800);
        let mut wizard = CampaignWizard::new(&strict(), &store, &store);

        let err = wizard.go_next().unwrap_err();
        assert!(matches!(
            err,
            CampaignError::StepIncomplete { step: WizardStep::Type, .. }
        ));
        assert_eq!(wizard.current_step(), WizardStep::Type);

        wizard.select_type(CampaignType::Sms);
        assert_eq!(wizard.go_next().unwrap(), WizardStep::Audience);

        assert_eq!(wizard.go_next().unwrap_err().issues(), &[DraftIssue::MissingAudience]);
        wizard.select_audience(segment.id).unwrap();
        wizard.go_next().unwrap();

        assert!(wizard.go_next().is_err());
        wizard.edit_message(MessagePatch::content("Flash sale tonight"));
        wizard.go_next().unwrap();

        wizard.edit_automation(AutomationPatch::timing(DeliveryTiming::Scheduled));
        assert_eq!(
            wizard.go_next().unwrap_err().issues(),
            &[DraftIssue::MissingScheduledDate]
        );
        wizard.edit_automation(AutomationPatch::scheduled_at(Utc::now() + Duration::hours(3)));
        assert_eq!(wizard.go_next().unwrap(), WizardStep::Review);

        // going back is never gated
        assert_eq!(wizard.go_back(), WizardStep::Automation);
    }

    #[test]
    fn test_select_unknown_segment() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        let missing = Uuid::new_v4();
        let err = wizard.select_audience(missing).unwrap_err();
        assert!(matches!(err, CampaignError::SegmentNotFound(id) if id == missing));
        assert!(wizard.draft().audience_segment_id.is_none());
    }

    #[test]
    fn test_audience_size_is_a_snapshot() {
        let store = ManagementStore::new();
        let segment = store.add_segment("Trial users", 5_000);
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        assert_eq!(wizard.select_audience(segment.id).unwrap(), 5_000);

        store.resize_segment(segment.id, 9_000);
        assert_eq!(wizard.draft().audience_size, 5_000);
    }

    #[test]
    fn test_launch_outside_review_step() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        wizard.select_type(CampaignType::Email);
        wizard.edit_message(MessagePatch::content("hello"));

        let err = wizard.launch().unwrap_err();
        assert!(matches!(err, CampaignError::NotAtReview(WizardStep::Type)));
        assert!(store.list_campaigns().is_empty());
    }

    #[test]
    fn test_failed_launch_reports_fields_and_stays_on_review() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        wizard.rename("Half done");
        advance_to_review(&mut wizard);

        let err = wizard.launch().unwrap_err();
        assert_eq!(err.issues(), &[DraftIssue::MissingType, DraftIssue::EmptyContent]);
        assert_eq!(wizard.current_step(), WizardStep::Review);
        assert_eq!(wizard.draft().name, "Half done");
        assert!(!wizard.is_closed());
    }

    #[test]
    fn test_successful_launch_closes_session() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        wizard.select_type(CampaignType::Email);
        wizard.edit_message(MessagePatch::content("hello"));
        advance_to_review(&mut wizard);

        let campaign = wizard.launch().unwrap();
        assert_eq!(wizard.launched_campaign_id(), Some(campaign.id));
        assert!(matches!(wizard.launch(), Err(CampaignError::SessionClosed)));
        assert!(matches!(wizard.save_draft(), Err(CampaignError::SessionClosed)));
        assert!(matches!(wizard.go_next(), Err(CampaignError::SessionClosed)));
        assert_eq!(store.list_campaigns().len(), 1);
    }

    #[test]
    fn test_discard_after_launch_opens_new_session() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        wizard.select_type(CampaignType::Sms);
        wizard.edit_message(MessagePatch::content("Doors open at 9"));
        advance_to_review(&mut wizard);
        wizard.launch().unwrap();
        let first_session = wizard.session_id();

        wizard.discard();
        assert!(!wizard.is_closed());
        assert_eq!(wizard.launched_campaign_id(), None);
        assert_ne!(wizard.session_id(), first_session);
        assert_eq!(wizard.current_step(), WizardStep::Type);
        assert_eq!(wizard.draft(), &CampaignDraft::create());

        assert_eq!(wizard.go_next().unwrap(), WizardStep::Audience);
        wizard.save_draft().unwrap();
        assert!(store.get_draft(wizard.session_id()).is_some());
    }

    #[test]
    fn test_store_failure_keeps_draft() {
        let segments = ManagementStore::new();
        let rejecting = RejectingStore {
            attempts: Cell::new(0),
        };
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &segments, &rejecting);
        wizard.select_type(CampaignType::Ads);
        wizard.edit_message(MessagePatch::content("Summer collection"));
        advance_to_review(&mut wizard);

        assert!(matches!(wizard.launch(), Err(CampaignError::Store(_))));
        assert!(wizard.launch().is_err());
        assert_eq!(rejecting.attempts.get(), 2);
        assert!(!wizard.is_closed());
        assert_eq!(wizard.current_step(), WizardStep::Review);
        assert_eq!(wizard.draft().message.content, "Summer collection");
    }

    #[test]
    fn test_save_draft_does_not_advance() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        wizard.go_next().unwrap();
        wizard.draft_mut().set_name("Autumn");
        wizard.save_draft().unwrap();

        assert_eq!(wizard.current_step(), WizardStep::Audience);
        assert_eq!(store.get_draft(wizard.session_id()).unwrap().name, "Autumn");
    }

    #[test]
    fn test_discard_resets_draft_and_step() {
        let store = ManagementStore::new();
        let mut wizard = CampaignWizard::new(&WizardConfig::default(), &store, &store);
        wizard.select_type(CampaignType::Whatsapp);
        wizard.go_next().unwrap();
        wizard.go_next().unwrap();
        wizard.discard();

        assert_eq!(wizard.current_step(), WizardStep::Type);
        assert_eq!(wizard.draft(), &CampaignDraft::create());
    }
}
