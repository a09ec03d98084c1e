//! Step validators.
//!
//! Pure predicates over candidate field values. Each returns every
//! field-scoped problem it finds so a caller can show them inline; an empty
//! result means the step may move forward.

use std::fmt;
use thiserror::Error;

use crate::model::{AddressInfo, PackageType, tier};
use crate::tracking_id::TRACKING_PREFIX;

/// Addresses need strictly more characters than this.
pub const MIN_ADDRESS_LEN: usize = 5;

/// Names need strictly more characters than this once trimmed.
pub const MIN_NAME_LEN: usize = 2;

pub const PHONE_DIGITS: usize = 10;

/// Prefixed to the phone number on a successful checkout.
pub const COUNTRY_CODE: &str = "+91";

/// Pickup substrings outside the operational zone, lowercase.
const BLOCKED_PICKUP_KEYWORDS: [&str; 2] = ["mars", "123 test"];

/// A field-scoped validation message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("pickup address must be longer than {} characters", MIN_ADDRESS_LEN)]
    PickupTooShort,
    #[error("This location is outside our operational zone.")]
    OutsideOperationalZone,
    #[error("drop address must be longer than {} characters", MIN_ADDRESS_LEN)]
    DropTooShort,
    #[error("weight must be greater than 0 kg")]
    WeightNotPositive,
    #[error("{package_type} packages take at most {max_weight} kg, got {weight} kg")]
    WeightExceedsTier {
        package_type: PackageType,
        max_weight: f64,
        weight: f64,
    },
    #[error("unknown package type {0}")]
    UnknownTier(PackageType),
    #[error("name must be longer than {} characters", MIN_NAME_LEN)]
    NameTooShort,
    #[error("name may only contain letters and spaces")]
    NameInvalidCharacters,
    #[error("phone number must be exactly {} digits", PHONE_DIGITS)]
    PhoneInvalid,
    #[error("Please enter a valid Tracking ID starting with LS- (e.g., LS-X82F1S)")]
    TrackingIdPrefix,
}

/// All messages raised against one submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rejection(pub Vec<ValidationError>);

impl Rejection {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    /// `Ok(())` when nothing was raised.
    fn into_result(self) -> Result<(), Rejection> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Rejection {}

impl From<ValidationError> for Rejection {
    fn from(error: ValidationError) -> Self {
        Rejection(vec![error])
    }
}

/// Flag a pickup inside a blocked zone, regardless of its length.
pub fn pickup_zone_error(pickup: &str) -> Option<ValidationError> {
    let lowered = pickup.to_lowercase();
    BLOCKED_PICKUP_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
        .then_some(ValidationError::OutsideOperationalZone)
}

/// Details step. Instructions are never checked.
pub fn validate_address(address: &AddressInfo) -> Result<(), Rejection> {
    let mut rejection = Rejection::default();
    if address.pickup.chars().count() <= MIN_ADDRESS_LEN {
        rejection.0.push(ValidationError::PickupTooShort);
    }
    if let Some(error) = pickup_zone_error(&address.pickup) {
        rejection.0.push(error);
    }
    if address.drop.chars().count() <= MIN_ADDRESS_LEN {
        rejection.0.push(ValidationError::DropTooShort);
    }
    rejection.into_result()
}

/// Package step: `0 < weight <= max_weight` of the selected tier.
///
/// The weight is never clamped, so switching to a smaller tier can turn a
/// valid weight invalid.
pub fn validate_package(package_type: PackageType, weight: f64) -> Result<(), ValidationError> {
    let entry = tier(package_type).ok_or(ValidationError::UnknownTier(package_type))?;
    if weight.is_nan() || weight <= 0.0 {
        return Err(ValidationError::WeightNotPositive);
    }
    if weight > entry.max_weight {
        return Err(ValidationError::WeightExceedsTier {
            package_type,
            max_weight: entry.max_weight,
            weight,
        });
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace()
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if !name.chars().all(is_name_char) {
        return Err(ValidationError::NameInvalidCharacters);
    }
    if name.trim().chars().count() <= MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

/// Exactly ten ASCII digits, without the country code.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::PhoneInvalid)
    }
}

/// Checkout step; both fields are checked independently.
pub fn validate_contact(name: &str, phone: &str) -> Result<(), Rejection> {
    let rejection = Rejection(
        [validate_name(name).err(), validate_phone(phone).err()]
            .into_iter()
            .flatten()
            .collect(),
    );
    rejection.into_result()
}

/// Tracking lookup: the trimmed input must carry the prefix.
pub fn validate_tracking_lookup(input: &str) -> Result<(), ValidationError> {
    if input.trim().starts_with(TRACKING_PREFIX) {
        Ok(())
    } else {
        Err(ValidationError::TrackingIdPrefix)
    }
}

/// Checkout form draft.
///
/// Keystrokes are filtered as they arrive: a candidate value with
/// characters the field can never hold is refused and the previous value
/// kept, so e.g. an eleventh phone digit cannot be entered at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    phone: String,
}

impl ContactForm {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns whether the candidate was accepted.
    pub fn set_name(&mut self, candidate: &str) -> bool {
        let accepted = candidate.chars().all(is_name_char);
        if accepted {
            self.name = candidate.to_string();
        }
        accepted
    }

    /// Returns whether the candidate was accepted.
    pub fn set_phone(&mut self, candidate: &str) -> bool {
        let accepted =
            candidate.len() <= PHONE_DIGITS && candidate.bytes().all(|b| b.is_ascii_digit());
        if accepted {
            self.phone = candidate.to_string();
        }
        accepted
    }

    /// Live validation; the confirm action is enabled on `Ok`.
    pub fn validate(&self) -> Result<(), Rejection> {
        validate_contact(&self.name, &self.phone)
    }
}
