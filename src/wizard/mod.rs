//! Booking wizard.
//!
//! The wizard sits between inbound UI events and the [`BookingStore`]. It
//! only forwards an event when the current step offers it and the step's
//! validators accept the input, so every transition is all-or-nothing.
//! It also owns the tracking timer: started when the tracking view is
//! entered, dropped as soon as the wizard leaves it by any path.
//! Also supports an async stream of events.

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::model::{AddressInfo, BookingRecord, PackageInfo, UserInfo, WizardEvent, WizardStep};
use crate::tracker::{StatusCursor, Tracker};
use crate::tracking_id::{IdGenerator, RandomIds};
use crate::validate::{
    COUNTRY_CODE, ContactForm, validate_address, validate_package, validate_tracking_lookup,
};

mod store;
pub use store::BookingStore;

mod error;
pub use error::WizardError;

mod config;
pub use config::{CHECKOUT_DELAY_VAR, ConfigError, TRACKER_INTERVAL_VAR, WizardConfig};

/// Everything a presentation layer needs to redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: WizardStep,
    pub record: BookingRecord,
    /// Present while on the tracking step.
    pub status: Option<StatusCursor>,
}

/// One booking session.
pub struct Wizard {
    store: BookingStore,
    config: WizardConfig,
    tracker: Option<Tracker>,
    /// Tracking id as typed into the lookup field, upper-cased.
    lookup_input: String,
    /// Checkout form draft.
    contact: ContactForm,
}

/// Public API
impl Wizard {
    pub fn new() -> Self {
        Self::with_config(WizardConfig::default())
    }

    pub fn with_config(config: WizardConfig) -> Self {
        Self::with_ids(config, Box::new(RandomIds::new()))
    }

    /// Use a specific identifier source, e.g. a seeded one.
    pub fn with_ids(config: WizardConfig, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            store: BookingStore::new(ids),
            config,
            tracker: None,
            lookup_input: String::new(),
            contact: ContactForm::default(),
        }
    }

    /// Run the wizard over the given event stream.
    ///
    /// A checkout waits for the configured processing delay first.
    pub async fn run(&mut self, mut stream: impl Stream<Item = WizardEvent> + Unpin) {
        while let Some(event) = stream.next().await {
            if matches!(event, WizardEvent::CompleteCheckout { .. })
                && self.step() == WizardStep::Checkout
                && !self.config.checkout_delay.is_zero()
            {
                sleep(self.config.checkout_delay).await;
            }
            // a rejected event must not stop the session
            let _ = self.apply(event);
        }
    }

    pub fn step(&self) -> WizardStep {
        self.store.step()
    }

    pub fn record(&self) -> &BookingRecord {
        self.store.record()
    }

    /// Current tracking status, while the tracking view is open.
    pub fn tracking_status(&self) -> Option<StatusCursor> {
        self.tracker.as_ref().map(Tracker::status)
    }

    /// Receiver for tracking status updates, while the tracking view is open.
    pub fn subscribe_tracking(&self) -> Option<watch::Receiver<StatusCursor>> {
        self.tracker.as_ref().map(Tracker::subscribe)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step(),
            record: self.record().clone(),
            status: self.tracking_status(),
        }
    }

    pub fn lookup_input(&self) -> &str {
        &self.lookup_input
    }

    /// Update the lookup field draft.
    pub fn type_lookup_input(&mut self, input: &str) {
        self.lookup_input = input.to_uppercase();
    }

    pub fn contact_form(&self) -> &ContactForm {
        &self.contact
    }

    /// Type into the checkout name field. Returns whether the input was kept.
    pub fn type_name(&mut self, input: &str) -> bool {
        self.contact.set_name(input)
    }

    /// Type into the checkout phone field. Returns whether the input was kept.
    pub fn type_phone(&mut self, input: &str) -> bool {
        self.contact.set_phone(input)
    }

    /// Submit the checkout form draft.
    pub fn submit_checkout(&mut self) -> Result<(), WizardError> {
        let name = self.contact.name().to_string();
        let phone = self.contact.phone().to_string();
        self.apply(WizardEvent::CompleteCheckout { name, phone })
    }

    /// Submit the lookup field draft.
    pub fn submit_lookup(&mut self) -> Result<(), WizardError> {
        let id = self.lookup_input.clone();
        self.apply(WizardEvent::TrackLookup { id })
    }

    /// Apply a single event on top of the current wizard state.
    ///
    /// Entering the tracking step requires a Tokio runtime; without one the
    /// event fails with [`WizardError::NoRuntime`] and nothing changes.
    pub fn apply(&mut self, event: WizardEvent) -> Result<(), WizardError> {
        let name = event.name();
        let from = self.step();
        let result = self.dispatch(event);
        self.stop_tracker_if_left();
        Self::log_result(name, from, self.step(), &result);
        result
    }
}

/// Private API
impl Wizard {
    fn log_result(
        event: &str,
        from: WizardStep,
        to: WizardStep,
        result: &Result<(), WizardError>,
    ) {
        match result {
            Ok(()) => info!(from = %from, to = %to, "{event} applied"),
            Err(e) => info!(step = %from, reason = %e, "{event} skipped"),
        }
    }

    /// Ensure `event` is offered on the current step.
    fn expect_step(&self, event: &'static str, offered: &[WizardStep]) -> Result<(), WizardError> {
        let step = self.step();
        if offered.contains(&step) {
            Ok(())
        } else {
            Err(WizardError::OutOfOrder { event, step })
        }
    }

    fn dispatch(&mut self, event: WizardEvent) -> Result<(), WizardError> {
        let name = event.name();
        match event {
            WizardEvent::SubmitAddress {
                pickup,
                drop,
                instructions,
                is_express,
            } => {
                self.expect_step(name, &[WizardStep::Details])?;
                let address = AddressInfo {
                    pickup,
                    drop,
                    instructions,
                };
                validate_address(&address)?;
                self.store.submit_address(address, is_express)?;
            }
            WizardEvent::SubmitPackage {
                package_type,
                weight,
            } => {
                self.expect_step(name, &[WizardStep::Package])?;
                validate_package(package_type, weight)?;
                let package = PackageInfo {
                    package_type,
                    weight,
                    is_express: self.record().package.is_express,
                };
                self.store.submit_package(package)?;
            }
            WizardEvent::ConfirmSummary => {
                self.expect_step(name, &[WizardStep::Summary])?;
                self.store.confirm_summary();
            }
            WizardEvent::CompleteCheckout { name: user, phone } => {
                self.expect_step(name, &[WizardStep::Checkout])?;
                // same keystroke filter as the form fields
                if !self.contact.set_name(&user) {
                    debug!(input = %user, "name input refused");
                }
                if !self.contact.set_phone(&phone) {
                    debug!(input = %phone, "phone input refused");
                }
                self.contact.validate()?;
                let booking_id = self.store.complete_checkout(UserInfo {
                    name: self.contact.name().to_string(),
                    phone: format!("{COUNTRY_CODE}{}", self.contact.phone()),
                });
                info!(booking_id, "booking confirmed");
            }
            WizardEvent::Edit { step } => {
                self.expect_step(name, &[WizardStep::Summary])?;
                let target = WizardStep::try_from(step).map_err(WizardError::InvalidStep)?;
                let tracker = if target == WizardStep::Tracking {
                    Some(self.start_tracker()?)
                } else {
                    None
                };
                self.store.edit_step(target);
                self.tracker = tracker;
            }
            WizardEvent::Back => {
                let previous = match self.step() {
                    WizardStep::Package => WizardStep::Details,
                    WizardStep::Checkout => WizardStep::Summary,
                    WizardStep::Tracking => WizardStep::Confirmation,
                    step => return Err(WizardError::OutOfOrder { event: name, step }),
                };
                self.store.edit_step(previous);
            }
            WizardEvent::LaunchTracker => {
                self.expect_step(name, &[WizardStep::Confirmation])?;
                let tracker = self.start_tracker()?;
                self.store.launch_tracker();
                self.tracker = Some(tracker);
            }
            WizardEvent::TrackLookup { id } => {
                self.expect_step(name, &[WizardStep::Details, WizardStep::Package])?;
                self.type_lookup_input(&id);
                validate_tracking_lookup(&self.lookup_input)?;
                let tracker = self.start_tracker()?;
                self.store.track_booking(self.lookup_input.clone());
                self.tracker = Some(tracker);
            }
            WizardEvent::Reset => {
                self.store.reset();
                self.lookup_input.clear();
                self.contact = ContactForm::default();
            }
        }
        Ok(())
    }

    /// Timer for a freshly entered tracking view. Called before the step
    /// changes so a failure leaves the wizard where it was.
    fn start_tracker(&self) -> Result<Tracker, WizardError> {
        Ok(Tracker::start(self.config.tracker_interval)?)
    }

    /// Drop the tracker once the wizard is off the tracking step.
    fn stop_tracker_if_left(&mut self) {
        if self.step() != WizardStep::Tracking {
            self.tracker = None;
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
