pub mod amount;
pub mod csv;
pub mod model;
pub mod pricing;
pub mod tracker;
pub mod tracking_id;
pub mod validate;
pub mod wizard;

pub use amount::Amount;
pub use model::{BookingRecord, PackageType, WizardEvent, WizardStep};
pub use wizard::{Snapshot, Wizard, WizardConfig, WizardError};
