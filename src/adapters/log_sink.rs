//! Event sink that writes every application event to the serial log.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("event: started in {}", state.label());
            }
            AppEvent::StateChanged { from, to } => {
                info!("event: state {} -> {}", from.label(), to.label());
            }
            AppEvent::HistoryLogged { timestamp } => {
                info!("event: history logged at {}", timestamp);
            }
            AppEvent::UploadFailed(e) => {
                warn!("event: upload failed ({})", e);
            }
        }
    }
}
