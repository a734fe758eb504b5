//! Inquiry field definitions

use super::form_state::Step;

/// Fabric types offered on the requirements step, in display order
pub const FABRIC_TYPES: [&str; 8] = [
    "Cotton",
    "Silk",
    "Polyester",
    "Blends",
    "Linen",
    "Wool",
    "Technical",
    "Denim",
];

/// A selectable option: stored value and display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

const BUSINESS_TYPES: &[SelectOption] = &[
    option("garment-manufacturer", "Garment Manufacturer"),
    option("clothing-retailer", "Clothing Retailer"),
    option("fabric-importer", "Fabric Importer"),
    option("trading-company", "Trading Company"),
    option("other", "Other"),
];

const ANNUAL_VOLUMES: &[SelectOption] = &[
    option("under-10k", "Under 10,000 meters"),
    option("10k-50k", "10,000 - 50,000 meters"),
    option("50k-100k", "50,000 - 100,000 meters"),
    option("100k-500k", "100,000 - 500,000 meters"),
    option("over-500k", "Over 500,000 meters"),
];

const TIMELINES: &[SelectOption] = &[
    option("immediate", "Immediate (Within 1 month)"),
    option("1-3-months", "1-3 months"),
    option("3-6-months", "3-6 months"),
    option("6-months-plus", "6+ months"),
];

/// How a field takes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { multiline: bool },
    Select(&'static [SelectOption]),
}

/// The closed set of text-valued inquiry fields.
///
/// Fabric types are set-valued and handled separately by
/// [`InquiryFields::toggle_fabric_type`](super::InquiryFields::toggle_fabric_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    CompanyName,
    ContactPerson,
    Email,
    Phone,
    BusinessType,
    AnnualVolume,
    PrimaryMarkets,
    Specifications,
    Timeline,
    Message,
}

impl FieldName {
    pub const ALL: [FieldName; 10] = [
        FieldName::CompanyName,
        FieldName::ContactPerson,
        FieldName::Email,
        FieldName::Phone,
        FieldName::BusinessType,
        FieldName::AnnualVolume,
        FieldName::PrimaryMarkets,
        FieldName::Specifications,
        FieldName::Timeline,
        FieldName::Message,
    ];

    /// Text fields rendered on a step, in display order
    pub fn for_step(step: Step) -> &'static [FieldName] {
        match step {
            Step::One => &[
                FieldName::CompanyName,
                FieldName::ContactPerson,
                FieldName::Email,
                FieldName::Phone,
            ],
            Step::Two => &[
                FieldName::BusinessType,
                FieldName::AnnualVolume,
                FieldName::PrimaryMarkets,
            ],
            Step::Three => &[
                FieldName::Specifications,
                FieldName::Timeline,
                FieldName::Message,
            ],
        }
    }

    /// Stable identifier used in logs
    pub fn key(&self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::ContactPerson => "contactPerson",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::BusinessType => "businessType",
            Self::AnnualVolume => "annualVolume",
            Self::PrimaryMarkets => "primaryMarkets",
            Self::Specifications => "specifications",
            Self::Timeline => "timeline",
            Self::Message => "message",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "Company Name",
            Self::ContactPerson => "Contact Person",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::BusinessType => "Business Type",
            Self::AnnualVolume => "Annual Fabric Volume",
            Self::PrimaryMarkets => "Primary Markets",
            Self::Specifications => "Specifications & Requirements",
            Self::Timeline => "Timeline",
            Self::Message => "Additional Message",
        }
    }

    /// Hint shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::CompanyName => "Your company name",
            Self::ContactPerson => "Your full name",
            Self::Email => "your@company.com",
            Self::Phone => "+1 (555) 123-4567",
            Self::BusinessType => "Select business type",
            Self::AnnualVolume => "Select volume range",
            Self::PrimaryMarkets => "e.g., North America, Europe, Asia",
            Self::Specifications => "Weight, width, color requirements, etc.",
            Self::Timeline => "Select timeline",
            Self::Message => "Any additional requirements or questions...",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::BusinessType => FieldKind::Select(BUSINESS_TYPES),
            Self::AnnualVolume => FieldKind::Select(ANNUAL_VOLUMES),
            Self::Timeline => FieldKind::Select(TIMELINES),
            Self::Specifications | Self::Message => FieldKind::Text { multiline: true },
            _ => FieldKind::Text { multiline: false },
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind(), FieldKind::Text { multiline: true })
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Self::CompanyName | Self::ContactPerson | Self::Email | Self::Phone | Self::BusinessType
        )
    }

    /// Display text for a stored value; select values map to their label
    pub fn display_value<'a>(&self, value: &'a str) -> &'a str {
        match self.kind() {
            FieldKind::Select(options) => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.label)
                .unwrap_or(value),
            FieldKind::Text { .. } => value,
        }
    }

    /// Next (or previous) option value for a select field, wrapping around.
    /// Returns `None` for text fields.
    pub fn cycle_option(&self, current: &str, forward: bool) -> Option<&'static str> {
        let FieldKind::Select(options) = self.kind() else {
            return None;
        };
        let len = options.len();
        let position = options.iter().position(|o| o.value == current);
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
        };
        Some(options[next].value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_lists_cover_all_fields_once() {
        let total: usize = [Step::One, Step::Two, Step::Three]
            .iter()
            .map(|s| FieldName::for_step(*s).len())
            .sum();
        assert_eq!(total, FieldName::ALL.len());
    }

    #[test]
    fn test_multiline_fields() {
        assert!(FieldName::Specifications.is_multiline());
        assert!(FieldName::Message.is_multiline());
        assert!(!FieldName::CompanyName.is_multiline());
        assert!(!FieldName::Timeline.is_multiline());
    }

    #[test]
    fn test_cycle_option_from_empty() {
        assert_eq!(
            FieldName::BusinessType.cycle_option("", true),
            Some("garment-manufacturer")
        );
        assert_eq!(
            FieldName::BusinessType.cycle_option("", false),
            Some("other")
        );
    }

    #[test]
    fn test_cycle_option_wraps() {
        assert_eq!(
            FieldName::Timeline.cycle_option("6-months-plus", true),
            Some("immediate")
        );
        assert_eq!(
            FieldName::Timeline.cycle_option("immediate", false),
            Some("6-months-plus")
        );
    }

    #[test]
    fn test_cycle_option_text_field_is_none() {
        assert!(FieldName::Email.cycle_option("", true).is_none());
    }

    #[test]
    fn test_display_value_maps_select_labels() {
        assert_eq!(
            FieldName::AnnualVolume.display_value("10k-50k"),
            "10,000 - 50,000 meters"
        );
        assert_eq!(FieldName::CompanyName.display_value("Acme"), "Acme");
    }
}
