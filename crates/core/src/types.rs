use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery channel chosen in the first wizard step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    Email,
    Sms,
    Whatsapp,
    Ads,
}

impl CampaignType {
    /// Email and ad campaigns carry a subject/headline; messaging channels don't.
    pub fn uses_subject(&self) -> bool {
        matches!(self, CampaignType::Email | CampaignType::Ads)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::Email => "email",
            CampaignType::Sms => "sms",
            CampaignType::Whatsapp => "whatsapp",
            CampaignType::Ads => "ads",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTiming {
    #[default]
    Now,
    Scheduled,
    Recurring,
}

/// The five stages of the campaign builder, in order.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Type,
    Audience,
    Message,
    Automation,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Type,
        WizardStep::Audience,
        WizardStep::Message,
        WizardStep::Automation,
        WizardStep::Review,
    ];

    /// 1-based position as shown in the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Type => 1,
            WizardStep::Audience => 2,
            WizardStep::Message => 3,
            WizardStep::Automation => 4,
            WizardStep::Review => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_first(&self) -> bool {
        *self == WizardStep::Type
    }

    pub fn is_last(&self) -> bool {
        *self == WizardStep::Review
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WizardStep::Type => "type",
            WizardStep::Audience => "audience",
            WizardStep::Message => "message",
            WizardStep::Automation => "automation",
            WizardStep::Review => "review",
        };
        write!(f, "step {} ({})", self.number(), label)
    }
}

/// A blocking problem with a draft. Each variant names the field at fault.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DraftIssue {
    MissingType,
    MissingAudience,
    EmptyContent,
    MissingScheduledDate,
}

impl DraftIssue {
    pub fn field(&self) -> &'static str {
        match self {
            DraftIssue::MissingType => "type",
            DraftIssue::MissingAudience => "audience_segment_id",
            DraftIssue::EmptyContent => "message.content",
            DraftIssue::MissingScheduledDate => "automation.scheduled_date",
        }
    }
}

impl fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DraftIssue::MissingType => "campaign type has not been selected",
            DraftIssue::MissingAudience => "no audience segment selected",
            DraftIssue::EmptyContent => "message content is empty",
            DraftIssue::MissingScheduledDate => "scheduled delivery requires a date",
        };
        write!(f, "{}: {}", self.field(), msg)
    }
}
