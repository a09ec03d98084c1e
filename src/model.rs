//! Core domain types for the booking wizard.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::Amount;
use crate::pricing::PricingError;

/// Package size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PackageType {
    #[default]
    Small,
    Medium,
    Large,
}

impl PackageType {
    pub const ALL: [PackageType; 3] = [PackageType::Small, PackageType::Medium, PackageType::Large];

    pub fn name(&self) -> &'static str {
        match self {
            PackageType::Small => "Small",
            PackageType::Medium => "Medium",
            PackageType::Large => "Large",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageType {
    type Err = PricingError;

    /// Case-insensitive lookup by tier name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageType::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PricingError::InvalidPackageType(s.to_string()))
    }
}

/// Weight ceiling and base price of one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub package_type: PackageType,
    /// Inclusive ceiling, in kg.
    pub max_weight: f64,
    pub base_price: Amount,
}

/// The package type catalog.
pub const PACKAGE_CATALOG: [Tier; 3] = [
    Tier {
        package_type: PackageType::Small,
        max_weight: 2.0,
        base_price: Amount::from_whole(5),
    },
    Tier {
        package_type: PackageType::Medium,
        max_weight: 10.0,
        base_price: Amount::from_whole(12),
    },
    Tier {
        package_type: PackageType::Large,
        max_weight: 25.0,
        base_price: Amount::from_whole(25),
    },
];

/// Look up a tier in the catalog.
pub fn tier(package_type: PackageType) -> Option<&'static Tier> {
    PACKAGE_CATALOG
        .iter()
        .find(|entry| entry.package_type == package_type)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressInfo {
    pub pickup: String,
    pub drop: String,
    /// Free text for the rider; never validated.
    pub instructions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PackageInfo {
    pub package_type: PackageType,
    /// Weight in kg.
    pub weight: f64,
    pub is_express: bool,
}

impl Default for PackageInfo {
    /// Starting value of the package form.
    fn default() -> Self {
        Self {
            package_type: PackageType::Small,
            weight: 0.5,
            is_express: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub name: String,
    /// Stored with the country code prefix.
    pub phone: String,
}

/// Cost breakdown, always derived from [`PackageInfo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Pricing {
    pub base: Amount,
    /// Weight-based component. Kept under this name for output compatibility;
    /// no real distance feeds into it.
    pub distance: Amount,
    pub express_surcharge: Amount,
    pub total: Amount,
}

/// The booking aggregate for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingRecord {
    pub address: AddressInfo,
    pub package: PackageInfo,
    pub user: UserInfo,
    pub pricing: Pricing,
    /// Set from the confirmation step onward.
    pub booking_id: Option<String>,
}

/// Ordered stages of the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[repr(u8)]
pub enum WizardStep {
    #[default]
    Details = 0,
    Package = 1,
    Summary = 2,
    Checkout = 3,
    Confirmation = 4,
    Tracking = 5,
}

impl WizardStep {
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WizardStep::Details),
            1 => Ok(WizardStep::Package),
            2 => Ok(WizardStep::Summary),
            3 => Ok(WizardStep::Checkout),
            4 => Ok(WizardStep::Confirmation),
            5 => Ok(WizardStep::Tracking),
            other => Err(other),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Inbound events accepted by the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// Details step: addresses and the express toggle.
    SubmitAddress {
        pickup: String,
        drop: String,
        instructions: String,
        is_express: bool,
    },
    /// Package step: tier and weight. Express is carried from the details step.
    SubmitPackage {
        package_type: PackageType,
        weight: f64,
    },
    ConfirmSummary,
    /// Checkout step: contact details as typed, without the country code.
    CompleteCheckout { name: String, phone: String },
    /// Jump to an earlier step by index (used from the summary).
    Edit { step: u8 },
    /// Return to the previous screen.
    Back,
    LaunchTracker,
    TrackLookup { id: String },
    Reset,
}

impl WizardEvent {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SubmitAddress { .. } => "submit-address",
            WizardEvent::SubmitPackage { .. } => "submit-package",
            WizardEvent::ConfirmSummary => "confirm-summary",
            WizardEvent::CompleteCheckout { .. } => "complete-checkout",
            WizardEvent::Edit { .. } => "edit",
            WizardEvent::Back => "back",
            WizardEvent::LaunchTracker => "launch-tracker",
            WizardEvent::TrackLookup { .. } => "track-lookup",
            WizardEvent::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entries() {
        let small = tier(PackageType::Small).unwrap();
        assert_eq!(small.max_weight, 2.0);
        assert_eq!(small.base_price, Amount::from_whole(5));

        let medium = tier(PackageType::Medium).unwrap();
        assert_eq!(medium.max_weight, 10.0);
        assert_eq!(medium.base_price, Amount::from_whole(12));

        let large = tier(PackageType::Large).unwrap();
        assert_eq!(large.max_weight, 25.0);
        assert_eq!(large.base_price, Amount::from_whole(25));
    }

    #[test]
    fn package_type_parses_case_insensitively() {
        assert_eq!("Medium".parse::<PackageType>().unwrap(), PackageType::Medium);
        assert_eq!(" large ".parse::<PackageType>().unwrap(), PackageType::Large);
        assert!(matches!(
            "Huge".parse::<PackageType>(),
            Err(PricingError::InvalidPackageType(name)) if name == "Huge"
        ));
    }

    #[test]
    fn default_record() {
        let record = BookingRecord::default();
        assert_eq!(record.address, AddressInfo::default());
        assert_eq!(record.package.package_type, PackageType::Small);
        assert_eq!(record.package.weight, 0.5);
        assert!(!record.package.is_express);
        assert_eq!(record.user, UserInfo::default());
        assert_eq!(record.pricing, Pricing::default());
        assert!(record.booking_id.is_none());
    }

    #[test]
    fn step_index_round_trips_and_rejects_out_of_range() {
        for index in 0..=5u8 {
            assert_eq!(WizardStep::try_from(index).unwrap().index(), index);
        }
        assert_eq!(WizardStep::try_from(6), Err(6));
        assert!(WizardStep::Details < WizardStep::Tracking);
    }
}
