//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured control events to the
//! logger (UART / USB-CDC on a real board, stderr on the host). A future
//! network adapter would implement the same trait.

use log::{info, warn};

use crate::events::ControlEvent;
use crate::ports::EventSink;

/// Adapter that logs every [`ControlEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::Started(state) => {
                info!("START | initial_state={state:?}");
            }
            ControlEvent::StateChanged { from, to } => {
                info!("STATE | {from:?} -> {to:?}");
            }
            ControlEvent::Telemetry(t) => match serde_json::to_string(t) {
                Ok(json) => info!("TELEM | {json}"),
                Err(e) => warn!("TELEM | serialisation failed: {e}"),
            },
        }
    }
}
