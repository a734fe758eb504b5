//! Inquiry form state: field values, wizard step and status

use super::field::FieldName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wizard step. Always one of the three steps; there is no out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    #[default]
    One,
    Two,
    Three,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("step {0} is outside 1..=3")]
pub struct InvalidStep(pub u8);

impl Step {
    pub const ALL: [Step; 3] = [Step::One, Step::Two, Step::Three];

    pub fn number(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::One => "Company Information",
            Self::Two => "Business Details",
            Self::Three => "Requirements",
        }
    }

    /// Following step, saturating at the last one
    pub fn next(&self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two | Self::Three => Self::Three,
        }
    }

    /// Preceding step, saturating at the first one
    pub fn prev(&self) -> Self {
        match self {
            Self::One | Self::Two => Self::One,
            Self::Three => Self::Two,
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Self::One)
    }

    pub fn is_last(&self) -> bool {
        matches!(self, Self::Three)
    }
}

impl TryFrom<u8> for Step {
    type Error = InvalidStep;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            n => Err(InvalidStep(n)),
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

/// Outcome of the most recent submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Draft",
            Self::Submitting => "Submitting…",
            Self::Succeeded => "Submitted",
            Self::Failed => "Submission failed",
        }
    }
}

/// Autosave bookkeeping shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistenceMeta {
    pub last_saved_at: Option<DateTime<Utc>>,
    pub has_unsaved_changes: bool,
}

/// Values of every inquiry field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InquiryFields {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub annual_volume: String,
    pub primary_markets: String,
    /// Selected fabric types in the order they were picked
    pub fabric_types: Vec<String>,
    pub specifications: String,
    pub timeline: String,
    pub message: String,
}

impl InquiryFields {
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::CompanyName => &self.company_name,
            FieldName::ContactPerson => &self.contact_person,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
            FieldName::BusinessType => &self.business_type,
            FieldName::AnnualVolume => &self.annual_volume,
            FieldName::PrimaryMarkets => &self.primary_markets,
            FieldName::Specifications => &self.specifications,
            FieldName::Timeline => &self.timeline,
            FieldName::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, name: FieldName) -> &mut String {
        match name {
            FieldName::CompanyName => &mut self.company_name,
            FieldName::ContactPerson => &mut self.contact_person,
            FieldName::Email => &mut self.email,
            FieldName::Phone => &mut self.phone,
            FieldName::BusinessType => &mut self.business_type,
            FieldName::AnnualVolume => &mut self.annual_volume,
            FieldName::PrimaryMarkets => &mut self.primary_markets,
            FieldName::Specifications => &mut self.specifications,
            FieldName::Timeline => &mut self.timeline,
            FieldName::Message => &mut self.message,
        }
    }

    pub fn has_fabric_type(&self, fabric: &str) -> bool {
        self.fabric_types.iter().any(|f| f == fabric)
    }

    /// Add the fabric type if absent, remove it if present
    pub fn toggle_fabric_type(&mut self, fabric: &str) {
        if self.has_fabric_type(fabric) {
            self.fabric_types.retain(|f| f != fabric);
        } else {
            self.fabric_types.push(fabric.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fabric_types.is_empty() && FieldName::ALL.iter().all(|n| self.get(*n).is_empty())
    }
}

/// The single mutable entity owned by the wizard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub fields: InquiryFields,
    pub current_step: Step,
    pub submission_status: SubmissionStatus,
    pub persistence_meta: PersistenceMeta,
}
