use crate::model::{AddressInfo, BookingRecord, PackageInfo, UserInfo, WizardStep};
use crate::pricing::{PricingError, calculate_price};
use crate::tracking_id::IdGenerator;

/// The booking record and the current step.
///
/// Transitions here never validate; the caller gates them. The only failure
/// is the pricing catalog guard, checked before anything is written so a
/// failed transition leaves the store untouched.
pub struct BookingStore {
    record: BookingRecord,
    step: WizardStep,
    ids: Box<dyn IdGenerator>,
}

impl BookingStore {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            record: BookingRecord::default(),
            step: WizardStep::Details,
            ids,
        }
    }

    pub fn record(&self) -> &BookingRecord {
        &self.record
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Details → Package. Sets the address and the express flag, then reprices.
    pub fn submit_address(
        &mut self,
        address: AddressInfo,
        is_express: bool,
    ) -> Result<(), PricingError> {
        let package = PackageInfo {
            is_express,
            ..self.record.package
        };
        let pricing = calculate_price(&package)?;

        self.record.address = address;
        self.record.package = package;
        self.record.pricing = pricing;
        self.step = WizardStep::Package;
        Ok(())
    }

    /// Package → Summary. Replaces the package and reprices.
    pub fn submit_package(&mut self, package: PackageInfo) -> Result<(), PricingError> {
        let pricing = calculate_price(&package)?;

        self.record.package = package;
        self.record.pricing = pricing;
        self.step = WizardStep::Summary;
        Ok(())
    }

    /// Summary → Checkout.
    pub fn confirm_summary(&mut self) {
        self.step = WizardStep::Checkout;
    }

    /// Checkout → Confirmation. Attaches a freshly generated booking id.
    pub fn complete_checkout(&mut self, user: UserInfo) -> &str {
        self.record.user = user;
        self.step = WizardStep::Confirmation;
        self.record.booking_id.insert(self.ids.generate())
    }

    /// Confirmation → Tracking.
    pub fn launch_tracker(&mut self) {
        self.step = WizardStep::Tracking;
    }

    /// Jump straight to Tracking for an id entered by the user.
    pub fn track_booking(&mut self, booking_id: String) {
        self.record.booking_id = Some(booking_id);
        self.step = WizardStep::Tracking;
    }

    /// Move to any step. Later-step data is kept.
    pub fn edit_step(&mut self, target: WizardStep) {
        self.step = target;
    }

    pub fn reset(&mut self) {
        self.record = BookingRecord::default();
        self.step = WizardStep::Details;
    }
}
