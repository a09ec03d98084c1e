//! CSV event scripts and snapshot output for the headless driver.
//!
//! A script has one event per row:
//!
//! ```text
//! event,pickup,drop,instructions,express,package,weight,name,phone,step,id
//! address,221B Baker Street,10 Downing Street,,false,,,,,,
//! package,,,,,Medium,3,,,,
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::model::{PackageType, WizardEvent};
use crate::wizard::Snapshot;

/// Errors that can occur when reading an event script
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open event script: {0}")]
    Open(csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized event '{event}'")]
    UnrecognizedEvent { line: usize, event: String },

    #[error("line {line}: {event} missing {field}")]
    MissingField {
        line: usize,
        event: String,
        field: &'static str,
    },

    #[error("line {line}: {source}")]
    InvalidPackage {
        line: usize,
        source: crate::pricing::PricingError,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    event: String,
    pickup: Option<String>,
    drop: Option<String>,
    instructions: Option<String>,
    express: Option<bool>,
    package: Option<String>,
    weight: Option<f64>,
    name: Option<String>,
    phone: Option<String>,
    step: Option<u8>,
    id: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    step: String,
    pickup: &'a str,
    drop: &'a str,
    instructions: &'a str,
    package: &'a str,
    weight: f64,
    express: bool,
    name: &'a str,
    phone: &'a str,
    base: String,
    distance: String,
    express_surcharge: String,
    total: String,
    booking_id: &'a str,
    status: &'a str,
}

impl InputRow {
    fn required<T>(value: Option<T>, line: usize, event: &str, field: &'static str) -> Result<T, CsvError> {
        value.ok_or_else(|| CsvError::MissingField {
            line,
            event: event.to_string(),
            field,
        })
    }

    fn into_event(self, line: usize) -> Result<WizardEvent, CsvError> {
        let event = self.event.as_str();
        match event {
            "address" => Ok(WizardEvent::SubmitAddress {
                pickup: Self::required(self.pickup, line, event, "pickup")?,
                drop: Self::required(self.drop, line, event, "drop")?,
                instructions: self.instructions.unwrap_or_default(),
                is_express: self.express.unwrap_or(false),
            }),
            "package" => {
                let name = Self::required(self.package, line, event, "package")?;
                let package_type = name
                    .parse::<PackageType>()
                    .map_err(|source| CsvError::InvalidPackage { line, source })?;
                Ok(WizardEvent::SubmitPackage {
                    package_type,
                    weight: Self::required(self.weight, line, event, "weight")?,
                })
            }
            "summary" => Ok(WizardEvent::ConfirmSummary),
            "checkout" => Ok(WizardEvent::CompleteCheckout {
                name: Self::required(self.name, line, event, "name")?,
                phone: Self::required(self.phone, line, event, "phone")?,
            }),
            "edit" => Ok(WizardEvent::Edit {
                step: Self::required(self.step, line, event, "step")?,
            }),
            "back" => Ok(WizardEvent::Back),
            "track" => Ok(WizardEvent::LaunchTracker),
            "lookup" => Ok(WizardEvent::TrackLookup {
                id: Self::required(self.id, line, event, "id")?,
            }),
            "reset" => Ok(WizardEvent::Reset),
            other => Err(CsvError::UnrecognizedEvent {
                line,
                event: other.to_string(),
            }),
        }
    }
}

/// Read wizard events from a csv file
pub fn read_events(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<WizardEvent, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            row.into_event(line)
        }))
}

/// Write a snapshot as a single csv row with a header
pub fn write_snapshot(writer: impl io::Write, snapshot: &Snapshot) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    let record = &snapshot.record;
    let pricing = &record.pricing;

    writer.serialize(OutputRow {
        step: snapshot.step.to_string(),
        pickup: &record.address.pickup,
        drop: &record.address.drop,
        instructions: &record.address.instructions,
        package: record.package.package_type.name(),
        weight: record.package.weight,
        express: record.package.is_express,
        name: &record.user.name,
        phone: &record.user.phone,
        base: pricing.base.to_string(),
        distance: pricing.distance.to_string(),
        express_surcharge: pricing.express_surcharge.to_string(),
        total: pricing.total.to_string(),
        booking_id: record.booking_id.as_deref().unwrap_or_default(),
        status: snapshot
            .status
            .map(|cursor| cursor.message())
            .unwrap_or_default(),
    })?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Wizard;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "event,pickup,drop,instructions,express,package,weight,name,phone,step,id\n";

    fn write_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(rows.as_bytes()).unwrap();
        file
    }

    fn read_all(rows: &str) -> Vec<Result<WizardEvent, CsvError>> {
        let file = write_csv(rows);
        read_events(file.path()).unwrap().collect()
    }

    #[test]
    fn read_address() {
        let results = read_all("address,221B Baker Street,10 Downing Street,Ring twice,true,,,,,,\n");
        assert_eq!(results.len(), 1);

        let event = results.into_iter().next().unwrap().unwrap();
        assert_eq!(
            event,
            WizardEvent::SubmitAddress {
                pickup: "221B Baker Street".to_string(),
                drop: "10 Downing Street".to_string(),
                instructions: "Ring twice".to_string(),
                is_express: true,
            }
        );
    }

    #[test]
    fn read_package_and_simple_events() {
        let results = read_all(
            "package,,,,,medium,3,,,,\nsummary,,,,,,,,,,\nedit,,,,,,,,,1,\nback,,,,,,,,,,\ntrack,,,,,,,,,,\nreset,,,,,,,,,,\n",
        );
        let events: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            events,
            vec![
                WizardEvent::SubmitPackage {
                    package_type: PackageType::Medium,
                    weight: 3.0
                },
                WizardEvent::ConfirmSummary,
                WizardEvent::Edit { step: 1 },
                WizardEvent::Back,
                WizardEvent::LaunchTracker,
                WizardEvent::Reset,
            ]
        );
    }

    #[test]
    fn read_checkout_keeps_phone_digits_as_text() {
        let results = read_all("checkout,,,,,,,Jane Doe,0876543210,,\n");
        assert_eq!(
            results[0].as_ref().unwrap(),
            &WizardEvent::CompleteCheckout {
                name: "Jane Doe".to_string(),
                phone: "0876543210".to_string(),
            }
        );
    }

    #[test]
    fn read_returns_error_for_unknown_event() {
        let results = read_all("teleport,,,,,,,,,,\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedEvent { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_missing_field() {
        let results = read_all("summary,,,,,,,,,,\nlookup,,,,,,,,,,\n");
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(matches!(
            err,
            CsvError::MissingField {
                line: 3,
                field: "id",
                ..
            }
        ));
    }

    #[test]
    fn read_returns_error_for_unknown_package() {
        let results = read_all("package,,,,,Huge,3,,,,\n");
        assert!(matches!(
            results[0].as_ref().unwrap_err(),
            CsvError::InvalidPackage { line: 2, .. }
        ));
    }

    #[test]
    fn open_missing_file_fails() {
        assert!(matches!(
            read_events("does/not/exist.csv"),
            Err(CsvError::Open(_))
        ));
    }

    #[test]
    fn write_default_snapshot() {
        let wizard = Wizard::new();
        let mut out = Vec::new();
        write_snapshot(&mut out, &wizard.snapshot()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "step,pickup,drop,instructions,package,weight,express,name,phone,base,distance,express_surcharge,total,booking_id,status"
        );
        assert_eq!(lines[1], "Details,,,,Small,0.5,false,,,0.00,0.00,0.00,0.00,,");
    }
}
