//! Firebase Realtime Database client (REST).
//!
//! Two endpoints, matching the dashboard backend's layout:
//!
//! - `PUT /AQUA/Current/<field>.json` — overwrite one live-state scalar.
//! - `POST /AQUA/History.json` — push one history record.
//!
//! Strictly fire-and-forget: one short-lived HTTPS connection per write,
//! no retry, no response body parsing beyond the status code. The `ready`
//! flag is fixed at construction from the boot-time WiFi outcome; there
//! is no reconnection, a reboot is the recovery path.

use serde::Serialize;

use crate::app::events::HistoryRecord;
use crate::app::ports::{LiveField, TelemetryPort};
use crate::error::TelemetryError;

/// Database base URL, overridable at build time.
pub const RTDB_BASE_URL: &str = match option_env!("AQUA_RTDB_URL") {
    Some(url) => url,
    None => "https://aqua-sentry-default-rtdb.asia-southeast1.firebasedatabase.app",
};

const CURRENT_PATH: &str = "/AQUA/Current";
const HISTORY_PATH: &str = "/AQUA/History";

pub struct RtdbClient {
    ready: bool,
    #[cfg(not(target_os = "espidf"))]
    sim: SimState,
}

#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
struct SimState {
    fields: Vec<LiveField>,
    records: Vec<HistoryRecord>,
}

impl RtdbClient {
    /// `ready` reflects whether the network came up during boot.
    pub fn new(ready: bool) -> Self {
        Self {
            ready,
            #[cfg(not(target_os = "espidf"))]
            sim: SimState::default(),
        }
    }

    fn field_name(field: &LiveField) -> &'static str {
        match field {
            LiveField::Water(_) => "water",
            LiveField::Soil(_) => "soil",
            LiveField::Rain(_) => "rain",
            LiveField::Status(_) => "status",
        }
    }

    fn field_body(field: &LiveField) -> Result<std::string::String, TelemetryError> {
        let encoded = match field {
            LiveField::Water(v) => serde_json::to_string(v),
            LiveField::Soil(v) => serde_json::to_string(v),
            LiveField::Rain(v) => serde_json::to_string(v),
            LiveField::Status(v) => serde_json::to_string(v),
        };
        encoded.map_err(|_| TelemetryError::EncodeFailed)
    }

    fn encode<T: Serialize>(value: &T) -> Result<std::string::String, TelemetryError> {
        serde_json::to_string(value).map_err(|_| TelemetryError::EncodeFailed)
    }

    // ── Platform-specific transport ───────────────────────────

    #[cfg(target_os = "espidf")]
    fn send(
        &mut self,
        method: embedded_svc::http::Method,
        url: &str,
        body: &[u8],
    ) -> Result<(), TelemetryError> {
        use embedded_svc::http::client::Client;
        use embedded_svc::io::Write as _;
        use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

        let connection = EspHttpConnection::new(&Configuration {
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        })
        .map_err(|_| TelemetryError::RequestFailed)?;
        let mut client = Client::wrap(connection);

        let headers = [("Content-Type", "application/json")];
        let mut request = client
            .request(method, url, &headers)
            .map_err(|_| TelemetryError::RequestFailed)?;
        request
            .write_all(body)
            .map_err(|_| TelemetryError::RequestFailed)?;
        let response = request.submit().map_err(|_| TelemetryError::RequestFailed)?;

        let status = response.status();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(TelemetryError::Rejected(status))
        }
    }
}

#[cfg(target_os = "espidf")]
impl TelemetryPort for RtdbClient {
    fn ready(&self) -> bool {
        self.ready
    }

    fn upload_field(&mut self, field: LiveField) -> Result<(), TelemetryError> {
        let url = std::format!(
            "{}{}/{}.json",
            RTDB_BASE_URL,
            CURRENT_PATH,
            Self::field_name(&field)
        );
        let body = Self::field_body(&field)?;
        self.send(embedded_svc::http::Method::Put, &url, body.as_bytes())
    }

    fn append_record(&mut self, record: &HistoryRecord) -> Result<(), TelemetryError> {
        let url = std::format!("{}{}.json", RTDB_BASE_URL, HISTORY_PATH);
        let body = Self::encode(record)?;
        self.send(embedded_svc::http::Method::Post, &url, body.as_bytes())
    }
}

#[cfg(not(target_os = "espidf"))]
impl TelemetryPort for RtdbClient {
    fn ready(&self) -> bool {
        self.ready
    }

    fn upload_field(&mut self, field: LiveField) -> Result<(), TelemetryError> {
        // Encoding still runs so host tests exercise the full path.
        Self::field_body(&field)?;
        self.sim.fields.push(field);
        Ok(())
    }

    fn append_record(&mut self, record: &HistoryRecord) -> Result<(), TelemetryError> {
        Self::encode(record)?;
        self.sim.records.push(record.clone());
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
impl RtdbClient {
    /// Live-state writes captured by the simulation.
    pub fn sim_fields(&self) -> &[LiveField] {
        &self.sim.fields
    }

    /// History records captured by the simulation.
    pub fn sim_records(&self) -> &[HistoryRecord] {
        &self.sim.records
    }
}
