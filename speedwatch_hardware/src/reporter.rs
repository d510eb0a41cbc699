//! Collector transport: speed reports as fire-and-forget HTTP GETs.
//!
//! The collector accepts `GET /?speed=<value>&vid=<id>`; the response body
//! is irrelevant, so the request is written and the connection dropped.
//! All blocking is bounded by the configured timeout.

use crate::error::HwError;
use speedwatch_traits::Reporter;
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

pub struct HttpReporter {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpReporter {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }
}

/// Request path for one report, `%.3f`-style speed plus the vehicle id.
pub fn request_path(velocity_mps: f32, vehicle_id: u32) -> String {
    format!("/?speed={velocity_mps:.3}&vid={vehicle_id}")
}

impl Reporter for HttpReporter {
    fn report(
        &mut self,
        velocity_mps: f32,
        vehicle_id: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| HwError::Unreachable(format!("{}:{}: {e}", self.host, self.port)))?
            .next()
            .ok_or_else(|| {
                HwError::Unreachable(format!("{}:{} did not resolve", self.host, self.port))
            })?;

        let mut stream = TcpStream::connect_timeout(&addr, self.timeout)
            .map_err(|e| HwError::Unreachable(e.to_string()))?;
        stream
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| HwError::Unreachable(e.to_string()))?;

        let path = request_path(velocity_mps, vehicle_id);
        let request = format!(
            "GET {path} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            self.host
        );
        stream
            .write_all(request.as_bytes())
            .map_err(|e| HwError::Unreachable(e.to_string()))?;
        tracing::debug!(host = %self.host, port = self.port, %path, "report dispatched");
        Ok(())
    }
}

/// Stand-in transport when no collector is configured: reports become log
/// events instead of network calls.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(
        &mut self,
        velocity_mps: f32,
        vehicle_id: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(velocity_mps, vehicle_id, "report (no collector configured)");
        Ok(())
    }
}
