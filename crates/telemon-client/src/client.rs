//! Telemetry client: typed operations against the sensor backend

use std::collections::HashSet;
use std::io;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use telemon_core::{NewReading, Reading, Sensor};
use tracing::{debug, info, instrument, warn};

use crate::config::{Endpoint, EndpointSource};
use crate::error::{ConfigError, Result, TelemetryError};
use crate::transport::{HttpTransport, Transport};
use crate::types::ConnectionReport;

const SENSORS_PATH: &str = "sensores";
const READINGS_PATH: &str = "readings";

/// Sensor backend client
///
/// Holds no data between calls: every operation resolves the endpoint once,
/// issues its request against that snapshot and returns a fresh result.
#[derive(Clone)]
pub struct TelemetryClient {
    transport: Arc<dyn Transport>,
    endpoints: Arc<dyn EndpointSource>,
}

impl std::fmt::Debug for TelemetryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryClient")
            .field("endpoint", &self.endpoints.current())
            .finish_non_exhaustive()
    }
}

impl TelemetryClient {
    /// Client over HTTP using the given endpoint source
    pub fn new(endpoints: impl EndpointSource + 'static) -> Result<Self> {
        Ok(Self::with_transport(
            Arc::new(endpoints),
            Arc::new(HttpTransport::new()?),
        ))
    }

    /// Client with an explicit transport
    pub fn with_transport(
        endpoints: Arc<dyn EndpointSource>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Snapshot of the current endpoint
    ///
    /// The source may read a config file, so it is queried on the blocking pool.
    pub async fn endpoint(&self) -> Result<Endpoint> {
        let endpoints = Arc::clone(&self.endpoints);
        let config = tokio::task::spawn_blocking(move || endpoints.current())
            .await
            .map_err(|e| ConfigError::Io(io::Error::other(e.to_string())))?;
        config.resolve()
    }

    /// `GET /api/sensores`
    #[instrument(skip(self))]
    pub async fn list_sensors(&self) -> Result<Vec<Sensor>> {
        let endpoint = self.endpoint().await?;
        let url = endpoint.api_url(&[SENSORS_PATH]);

        let payload = self.transport.get_json(&url).await?;
        let sensors: Vec<Sensor> = decode_list(payload, "sensor")?;
        ensure_unique(sensors.iter().map(|s| s.id.as_str()), "sensor")?;

        debug!(count = sensors.len(), "Listed sensors");
        Ok(sensors)
    }

    /// `GET /api/readings` or `GET /api/readings/{sensor_id}`
    ///
    /// An empty list is a normal result.
    #[instrument(skip(self))]
    pub async fn list_readings(&self, sensor_id: Option<&str>) -> Result<Vec<Reading>> {
        let endpoint = self.endpoint().await?;
        let url = match sensor_id {
            Some(id) => endpoint.api_url(&[READINGS_PATH, checked_sensor_id(id)?]),
            None => endpoint.api_url(&[READINGS_PATH]),
        };

        let payload = self.transport.get_json(&url).await?;
        let readings: Vec<Reading> = decode_list(payload, "reading")?;
        let ids: Vec<String> = readings.iter().map(|r| r.id.to_string()).collect();
        ensure_unique(ids.iter().map(String::as_str), "reading")?;

        debug!(count = readings.len(), "Listed readings");
        Ok(readings)
    }

    /// `POST /api/readings`, stamped with the current time
    ///
    /// Returns the reading as confirmed by the server. Each call creates a new
    /// reading; nothing is cached locally.
    #[instrument(skip(self))]
    pub async fn submit_reading(&self, sensor_id: &str, value: f64) -> Result<Reading> {
        let endpoint = self.endpoint().await?;
        let sensor_id = checked_sensor_id(sensor_id)?;
        if !value.is_finite() {
            return Err(TelemetryError::InvalidInput(format!(
                "reading value must be a finite number, got {}",
                value
            )));
        }

        let body = serde_json::to_value(NewReading::now(sensor_id, value))
            .map_err(|e| TelemetryError::InvalidInput(e.to_string()))?;
        let url = endpoint.api_url(&[READINGS_PATH]);

        let payload = self.transport.post_json(&url, &body).await?;
        let reading: Reading = serde_json::from_value(payload)
            .map_err(|e| TelemetryError::malformed(format!("reading: {}", e)))?;

        info!(id = reading.id, sensor_id = %reading.sensor_id, "Reading submitted");
        Ok(reading)
    }

    /// Probe the backend by listing sensors; failures are reported, never raised
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> ConnectionReport {
        match self.list_sensors().await {
            Ok(sensors) => {
                info!(count = sensors.len(), "Connection test succeeded");
                ConnectionReport::ok(sensors.len())
            }
            Err(e) => {
                warn!(error = %e, "Connection test failed");
                ConnectionReport::failed(e.to_string())
            }
        }
    }
}

fn checked_sensor_id(sensor_id: &str) -> Result<&str> {
    if sensor_id.trim().is_empty() {
        Err(TelemetryError::InvalidInput("sensor id must not be empty".to_string()))
    } else {
        Ok(sensor_id)
    }
}

/// Decode a JSON array element by element, naming the first bad entry
fn decode_list<T: DeserializeOwned>(payload: Value, what: &str) -> Result<Vec<T>> {
    let items = match payload {
        Value::Array(items) => items,
        other => {
            return Err(TelemetryError::malformed(format!(
                "expected an array of {} records, got {}",
                what,
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| TelemetryError::malformed(format!("{} #{}: {}", what, index, e)))
        })
        .collect()
}

fn ensure_unique<'a>(ids: impl Iterator<Item = &'a str>, what: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TelemetryError::malformed(format!(
                "duplicate {} id {:?}",
                what, id
            )));
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EndpointConfig, EndpointStore};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use telemon_core::SensorStatus;
    use url::Url;

    /// Transport that replays a canned response and records what it was asked
    struct FakeTransport {
        response: Mutex<Option<Result<Value>>>,
        requests: Mutex<Vec<(String, Url, Option<Value>)>>,
    }

    impl FakeTransport {
        fn replying(response: Result<Value>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(response)),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<(String, Url, Option<Value>)> {
            self.requests.lock().clone()
        }

        fn reply(&self) -> Result<Value> {
            self.response
                .lock()
                .take()
                .unwrap_or_else(|| Err(TelemetryError::network("no canned response")))
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get_json(&self, url: &Url) -> Result<Value> {
            self.requests
                .lock()
                .push(("GET".to_string(), url.clone(), None));
            self.reply()
        }

        async fn post_json(&self, url: &Url, body: &Value) -> Result<Value> {
            self.requests
                .lock()
                .push(("POST".to_string(), url.clone(), Some(body.clone())));
            self.reply()
        }
    }

    fn client(transport: Arc<FakeTransport>) -> TelemetryClient {
        TelemetryClient::with_transport(
            Arc::new(EndpointConfig::new("http://backend:8080")),
            transport,
        )
    }

    #[tokio::test]
    async fn test_list_sensors_maps_status() {
        let transport = FakeTransport::replying(Ok(json!([
            {"id": "1", "name": "Temp", "status": "alerta", "currentValue": 85.2}
        ])));
        let sensors = client(transport.clone()).list_sensors().await.unwrap();

        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].status, SensorStatus::Alert);
        assert_eq!(sensors[0].current_value, 85.2);

        let requests = transport.requests();
        assert_eq!(requests[0].1.as_str(), "http://backend:8080/api/sensores");
    }

    #[tokio::test]
    async fn test_list_sensors_rejects_non_array() {
        let transport = FakeTransport::replying(Ok(json!({"items": []})));
        let err = client(transport).list_sensors().await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_list_sensors_rejects_missing_status() {
        let transport = FakeTransport::replying(Ok(json!([
            {"id": "1", "name": "Temp", "status": "ok", "currentValue": 1.0},
            {"id": "2", "name": "Pressão", "currentValue": 2.0}
        ])));
        let err = client(transport).list_sensors().await.unwrap_err();
        match err {
            TelemetryError::MalformedResponse(msg) => assert!(msg.contains("#1"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_sensors_rejects_duplicate_ids() {
        let transport = FakeTransport::replying(Ok(json!([
            {"id": "1", "name": "A", "status": "ok", "currentValue": 1.0},
            {"id": 1, "name": "B", "status": "ok", "currentValue": 2.0}
        ])));
        let err = client(transport).list_sensors().await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_network_error_propagates() {
        let transport = FakeTransport::replying(Err(TelemetryError::network("connection refused")));
        let err = client(transport).list_sensors().await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint() {
        let transport = FakeTransport::replying(Ok(json!([])));
        let client = TelemetryClient::with_transport(
            Arc::new(EndpointConfig::unconfigured()),
            transport.clone(),
        );

        let err = client.list_sensors().await.unwrap_err();
        assert!(matches!(err, TelemetryError::UnconfiguredEndpoint));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_readings_for_sensor() {
        let transport = FakeTransport::replying(Ok(json!([])));
        let readings = client(transport.clone())
            .list_readings(Some("1"))
            .await
            .unwrap();

        assert!(readings.is_empty());
        assert_eq!(
            transport.requests()[0].1.as_str(),
            "http://backend:8080/api/readings/1"
        );
    }

    #[tokio::test]
    async fn test_list_readings_rejects_blank_sensor() {
        let transport = FakeTransport::replying(Ok(json!([])));
        let err = client(transport).list_readings(Some(" ")).await.unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_submit_reading_posts_body() {
        let transport = FakeTransport::replying(Ok(json!({
            "id": 99,
            "sensorId": "4",
            "value": 45.2,
            "timestamp": "2025-03-01T10:15:00.000Z"
        })));
        let reading = client(transport.clone())
            .submit_reading("4", 45.2)
            .await
            .unwrap();
        assert_eq!(reading.id, 99);

        let (method, url, body) = transport.requests().remove(0);
        assert_eq!(method, "POST");
        assert_eq!(url.as_str(), "http://backend:8080/api/readings");
        let body = body.unwrap();
        assert_eq!(body["sensorId"], json!("4"));
        assert_eq!(body["value"], json!(45.2));
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_submit_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let transport = FakeTransport::replying(Ok(json!({})));
            let err = client(transport.clone())
                .submit_reading("1", value)
                .await
                .unwrap_err();
            assert!(matches!(err, TelemetryError::InvalidInput(_)));
            assert!(transport.requests().is_empty());
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_confirmation() {
        let transport = FakeTransport::replying(Ok(json!({"ok": true})));
        let err = client(transport).submit_reading("1", 3.0).await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_connection_report_success() {
        let transport = FakeTransport::replying(Ok(json!([
            {"id": "1", "name": "A", "status": "ok", "currentValue": 1.0},
            {"id": "2", "name": "B", "status": "aviso", "currentValue": 70.0}
        ])));
        let report = client(transport).test_connection().await;
        assert!(report.success);
        assert_eq!(report.count, Some(2));
    }

    #[tokio::test]
    async fn test_connection_report_failure() {
        let transport = FakeTransport::replying(Err(TelemetryError::network("timed out")));
        let report = client(transport).test_connection().await;
        assert!(!report.success);
        assert!(report.message.contains("timed out"));
        assert_eq!(report.count, None);
    }

    /// Transport that changes the persisted endpoint while a request is in flight
    struct ReconfiguringTransport {
        store: EndpointStore,
        seen: Mutex<Vec<Url>>,
    }

    #[async_trait]
    impl Transport for ReconfiguringTransport {
        async fn get_json(&self, url: &Url) -> Result<Value> {
            self.store.set("http://other-host:9090").unwrap();
            self.seen.lock().push(url.clone());
            Ok(json!([]))
        }

        async fn post_json(&self, _url: &Url, _body: &Value) -> Result<Value> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn test_operation_uses_snapshot_taken_at_start() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = EndpointStore::at(dir.path().join("config.toml"));
        store.set("http://first-host:8080").unwrap();

        let transport = Arc::new(ReconfiguringTransport {
            store: store.clone(),
            seen: Mutex::new(Vec::new()),
        });
        let client = TelemetryClient::with_transport(Arc::new(store.clone()), transport.clone());

        client.list_readings(None).await.unwrap();
        assert_eq!(
            transport.seen.lock()[0].as_str(),
            "http://first-host:8080/api/readings"
        );

        // The next operation sees the new value
        client.list_readings(None).await.unwrap();
        assert_eq!(
            transport.seen.lock()[1].as_str(),
            "http://other-host:9090/api/readings"
        );
    }

    struct ThreadRecordingSource {
        threads: Mutex<Vec<std::thread::ThreadId>>,
    }

    impl EndpointSource for ThreadRecordingSource {
        fn current(&self) -> EndpointConfig {
            self.threads.lock().push(std::thread::current().id());
            EndpointConfig::new("http://sensors.local:8080")
        }
    }

    #[tokio::test]
    async fn test_endpoint_source_is_read_off_the_runtime_thread() {
        let source = Arc::new(ThreadRecordingSource {
            threads: Mutex::new(Vec::new()),
        });
        let client = TelemetryClient::with_transport(
            source.clone(),
            FakeTransport::replying(Ok(json!([]))),
        );

        let endpoint = client.endpoint().await.unwrap();
        assert_eq!(endpoint.base_url().as_str(), "http://sensors.local:8080/");

        let threads = source.threads.lock();
        assert_eq!(threads.len(), 1);
        assert_ne!(threads[0], std::thread::current().id());
    }
}
