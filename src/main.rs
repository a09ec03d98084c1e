use std::{env, io, process};

use localshyp::csv::{read_events, write_snapshot};
use localshyp::{Wizard, WizardConfig};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: localshyp <events.csv>");
        process::exit(2);
    };

    if !path.ends_with(".csv") {
        warn!(path, "event script seems to not be a csv file");
    }

    let config = WizardConfig::from_env().unwrap_or_else(|e| {
        warn!("{e}, using defaults");
        WizardConfig::default()
    });

    let events = match read_events(path) {
        Ok(events) => events,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let mut wizard = Wizard::with_config(config);
    let (event_sender, event_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in events {
            match result {
                Ok(event) => {
                    if event_sender.send(event).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    wizard.run(ReceiverStream::new(event_receiver)).await;

    if let Err(e) = write_snapshot(io::stdout().lock(), &wizard.snapshot()) {
        error!("failed to write snapshot: {e}");
        process::exit(1);
    }
}
