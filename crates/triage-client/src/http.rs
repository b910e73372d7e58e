//! HTTP implementation of `TriagePipeline`.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use triage_contracts::{
    error::{DeskError, DeskResult},
    pipeline::{IntakeRequest, PipelineResponse},
};
use triage_core::traits::TriagePipeline;

use crate::config::ClientConfig;

/// `POST {api_base}/api/triage` with a JSON body and a fixed timeout.
///
/// No retries: any transport failure, timeout, non-2xx status or non-JSON
/// body ends the submission.
#[derive(Debug, Clone)]
pub struct HttpPipeline {
    client: Client,
    url: String,
    timeout_secs: u64,
}

impl HttpPipeline {
    pub fn new(config: &ClientConfig) -> DeskResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DeskError::ConfigError {
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            url: config.triage_url(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> DeskError {
        let reason = if err.is_timeout() {
            format!("request to {} timed out after {}s", self.url, self.timeout_secs)
        } else {
            format!("request to {} failed: {}", self.url, err)
        };
        warn!(url = %self.url, %reason, "triage request failed");
        DeskError::Transport { reason }
    }
}

impl TriagePipeline for HttpPipeline {
    fn submit(&self, request: &IntakeRequest) -> DeskResult<PipelineResponse> {
        debug!(url = %self.url, "posting triage request");
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "triage backend rejected request");
            return Err(DeskError::Backend { status: status.as_u16() });
        }

        let body = response.text().map_err(|e| self.transport_error(e))?;
        let value: Value = serde_json::from_str(&body).map_err(|e| DeskError::MalformedResponse {
            reason: format!("response body is not JSON: {}", e),
        })?;
        debug!(bytes = body.len(), "triage response received");
        Ok(PipelineResponse::from_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{BufRead, BufReader, Read, Write},
        net::TcpListener,
        thread,
    };
    use triage_contracts::pipeline::IntakeVitals;

    fn make_request() -> IntakeRequest {
        IntakeRequest {
            patient_name: "Asha".into(),
            age: 54.0,
            sex: "female".into(),
            symptoms_text: "chest pain".into(),
            duration_hours: 2.0,
            vitals: IntakeVitals::default(),
            location_hint: "Zone A".into(),
        }
    }

    /// Serve exactly one HTTP exchange on a local port and hand back the
    /// request body the client sent.
    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(len) = lower.strip_prefix("content-length:") {
                    content_length = len.trim().parse().unwrap();
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let mut stream = stream;
            write!(
                stream,
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
            String::from_utf8(request_body).unwrap()
        });
        (format!("http://{addr}"), handle)
    }

    // Bypass any proxy configured in the environment; the server is local.
    fn pipeline_for(api_base: String) -> HttpPipeline {
        let config = ClientConfig {
            api_base,
            request_timeout_secs: 5,
            ..ClientConfig::default()
        };
        let client = Client::builder()
            .no_proxy()
            .timeout(config.request_timeout())
            .build()
            .unwrap();
        HttpPipeline {
            client,
            url: config.triage_url(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    #[test]
    fn success_parses_response_and_posts_camel_case() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"final":{"severityBand":"critical","priority":"P1"},"ledger":[]}"#,
        );
        let response = pipeline_for(base).submit(&make_request()).unwrap();
        assert_eq!(response.decision.priority.as_deref(), Some("P1"));

        let sent: Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["patientName"], "Asha");
        assert_eq!(sent["locationHint"], "Zone A");
    }

    #[test]
    fn non_success_status_is_backend_error() {
        let (base, server) = serve_once("HTTP/1.1 503 Service Unavailable", "{}");
        let err = pipeline_for(base).submit(&make_request()).unwrap_err();
        assert!(matches!(err, DeskError::Backend { status: 503 }));
        server.join().unwrap();
    }

    #[test]
    fn non_json_body_is_malformed_response() {
        let (base, server) = serve_once("HTTP/1.1 200 OK", "<html>oops</html>");
        let err = pipeline_for(base).submit(&make_request()).unwrap_err();
        assert!(matches!(err, DeskError::MalformedResponse { .. }));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_backend_is_transport_error() {
        // Bind then drop to get a local port with nothing listening.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let err = pipeline_for(format!("http://127.0.0.1:{port}"))
            .submit(&make_request())
            .unwrap_err();
        assert!(matches!(err, DeskError::Transport { .. }));
        assert_eq!(err.status_message(), "Failed. Check inputs or backend status.");
    }
}
