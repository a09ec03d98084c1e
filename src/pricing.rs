//! Price calculation for a package.

use thiserror::Error;

use crate::Amount;
use crate::model::{PackageInfo, Pricing, tier};

/// Flat per-kg rate standing in for a distance charge.
pub const RATE_PER_KG: f64 = 1.5;

/// Flat surcharge for express handling.
pub const EXPRESS_SURCHARGE: Amount = Amount::from_whole(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("invalid package type '{0}'")]
    InvalidPackageType(String),
}

/// Compute the cost breakdown for a package. Pure; callable with weight `0`.
pub fn calculate_price(package: &PackageInfo) -> Result<Pricing, PricingError> {
    let entry = tier(package.package_type)
        .ok_or_else(|| PricingError::InvalidPackageType(package.package_type.to_string()))?;

    let base = entry.base_price;
    let distance = Amount::from_float(package.weight * RATE_PER_KG);
    let express_surcharge = if package.is_express {
        EXPRESS_SURCHARGE
    } else {
        Amount::ZERO
    };

    Ok(Pricing {
        base,
        distance,
        express_surcharge,
        total: base + distance + express_surcharge,
    })
}
