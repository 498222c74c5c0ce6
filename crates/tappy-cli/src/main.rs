//! `tappy-demo` – drives the wrapper against a simulated reader.
//!
//! Runs one scripted session: connect, scan a tag, write a URI and a text
//! record, read the NDEF back, lock the tag, stop and disconnect. The mock
//! reader answers each command the way a real Tappy would. Every published
//! event is printed to stdout as one JSON line; diagnostics go through
//! `tracing` (`RUST_LOG`, default `info`).

mod config;
mod summary;

use anyhow::{Context, Result};
use config::DemoConfig;
use summary::EventSummary;
use tappy_driver::mock::{MockTappy, MockTappyConfig, MockTappyHandle};
use tappy_ndef::{NdefMessage, NdefRecord};
use tappy_protocol::basic_nfc::{ApplicationError, NdefFound, TagFound, TagLocked, TagWritten};
use tappy_protocol::{ResolverMux, TypedMessage};
use tappy_wrapper::{Event, Topic, Wrapper};
use tokio::sync::mpsc;
use tracing::{info, trace, warn};

/// NTAG216 as reported by the reader.
const DEMO_TAG_TYPE: u8 = 20;
const DEMO_UID: [u8; 7] = [0x04, 0x50, 0x51, 0x52, 0x53, 0x54, 0x81];

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::load()?;
    info!(name = %config.name, "Starting Tappy demo");

    let wrapper = Wrapper::<MockTappy>::open(MockTappyConfig::default().with_name(&config.name))
        .context("failed to open mock reader")?;
    let reader = wrapper.driver().handle();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    for topic in Topic::ALL {
        let tx = tx.clone();
        wrapper.on(topic, move |event| {
            if tx.send(event.clone()).is_err() {
                trace!(%topic, "Event printer stopped");
            }
        });
    }
    drop(tx);

    let printer = tokio::spawn(async move {
        let resolver = ResolverMux::standard();
        while let Some(event) = rx.recv().await {
            if let Event::Sent(sent) = &event {
                match resolver.resolve_command(&sent.message) {
                    Ok(command) => info!(?command, "Sent command"),
                    Err(error) => warn!(%error, "Sent unresolvable command"),
                }
            }
            match serde_json::to_string(&EventSummary::from(&event)) {
                Ok(line) => println!("{line}"),
                Err(error) => warn!(%error, "Failed to serialize event"),
            }
        }
    });

    run_session(&wrapper, &reader, &config)?;

    // Release the subscribers so the printer sees the channel close
    for topic in Topic::ALL {
        wrapper.off(topic);
    }
    printer.await.context("event printer panicked")?;

    info!("Demo finished");
    Ok(())
}

/// Drive one session, answering each command from the reader side.
fn run_session(
    wrapper: &Wrapper<MockTappy>,
    reader: &MockTappyHandle,
    config: &DemoConfig,
) -> Result<()> {
    wrapper.connect();
    anyhow::ensure!(wrapper.is_connected(), "mock reader did not connect");

    wrapper.detect_tag(false);
    reader.reply(TagFound::new(DEMO_TAG_TYPE, DEMO_UID.to_vec()).to_message());

    wrapper.write_uri(&config.uri, false);
    reader.reply(TagWritten::new(DEMO_TAG_TYPE, DEMO_UID.to_vec()).to_message());

    wrapper.write_text(&config.text, false);
    reader.reply(TagWritten::new(DEMO_TAG_TYPE, DEMO_UID.to_vec()).to_message());

    let stored = NdefMessage::new(vec![NdefRecord::text(&config.text, "en")])
        .to_bytes()
        .context("failed to encode stored NDEF message")?;
    wrapper.detect_ndef(false);
    reader.reply(NdefFound::new(DEMO_TAG_TYPE, DEMO_UID.to_vec(), stored.clone()).to_message());

    if config.lock {
        wrapper.lock_tag(Some(&DEMO_UID));
        reader.reply(TagLocked::new(DEMO_TAG_TYPE, DEMO_UID.to_vec()).to_message());
    } else {
        // A second write without a tag in range times out on the reader
        wrapper.write_ndef(stored, false);
        reader.reply(ApplicationError::new(0x03, 0x00, 0x00, "No tag presented").to_message());
    }

    wrapper.stop();
    wrapper.disconnect();
    Ok(())
}
