#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and credential parsing for the speed watcher.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The credential loader reads a headerless key,value CSV holding the
//!   `ssid`/`pass` entries the collector-side network expects.
use serde::Deserialize;

/// Sensor sampling settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorCfg {
    /// Tick rate of the read-process-report loop in Hz
    pub sample_rate_hz: u32,
    /// Max time to wait for one accelerometer read before failing (ms)
    pub read_timeout_ms: u64,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            sample_rate_hz: 100,
            read_timeout_ms: 50,
        }
    }
}

/// Startup bias calibration settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CalibrationCfg {
    /// Number of at-rest samples averaged into the bias
    pub samples: u32,
    /// Spacing between calibration samples (ms)
    pub interval_ms: u64,
}

impl Default for CalibrationCfg {
    fn default() -> Self {
        Self {
            samples: 100,
            interval_ms: 10,
        }
    }
}

/// Which per-tick acceleration value feeds the velocity integrator.
///
/// Single-axis integration is the default; `magnitude` switches to the
/// Euclidean norm of all three axes and is an observable behavior change,
/// so it must be opted into explicitly.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationInput {
    #[default]
    X,
    Y,
    Z,
    Magnitude,
}

/// Thresholds of the signal-processing pipeline.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PipelineCfg {
    /// Per-axis noise band snapped to zero, m/s^2 (strict inequality)
    pub dead_zone_mps2: f32,
    /// |accel| below this counts toward a stationary run, m/s^2
    pub stationary_band_mps2: f32,
    /// Consecutive in-band ticks before velocity is reset
    pub stationary_run_ticks: u32,
    /// |velocity| at or above this raises the notification flag, m/s
    pub notify_threshold_mps: f32,
    /// Acceleration input for integration: "x" | "y" | "z" | "magnitude"
    pub integrate: IntegrationInput,
}

impl Default for PipelineCfg {
    fn default() -> Self {
        Self {
            dead_zone_mps2: 0.3,
            stationary_band_mps2: 1.0,
            stationary_run_ticks: 100,
            notify_threshold_mps: 2.0,
            integrate: IntegrationInput::X,
        }
    }
}

/// Collector reporting settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportCfg {
    /// Report cadence in ticks of the fixed-period loop
    pub every_ticks: u32,
    /// Identifier sent alongside the speed value
    pub vehicle_id: u32,
    /// Collector host; when absent, reports are logged instead of sent
    pub collector_host: Option<String>,
    pub collector_port: u16,
    /// Max time for one report round-trip (ms)
    pub send_timeout_ms: u64,
}

impl Default for ReportCfg {
    fn default() -> Self {
        Self {
            every_ticks: 200,
            vehicle_id: 1,
            collector_host: None,
            collector_port: 1080,
            send_timeout_ms: 500,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NetworkCfg {
    /// Optional key,value CSV holding `ssid` and `pass` entries
    pub credentials_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub sensor: SensorCfg,
    pub calibration: CalibrationCfg,
    pub pipeline: PipelineCfg,
    pub report: ReportCfg,
    pub network: NetworkCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Sensor
        if self.sensor.sample_rate_hz == 0 {
            eyre::bail!("sensor.sample_rate_hz must be > 0");
        }
        if self.sensor.sample_rate_hz > 1000 {
            eyre::bail!("sensor.sample_rate_hz is unreasonably high (>1000)");
        }
        if self.sensor.read_timeout_ms == 0 {
            eyre::bail!("sensor.read_timeout_ms must be >= 1");
        }

        // Calibration
        if self.calibration.samples == 0 {
            eyre::bail!("calibration.samples must be >= 1");
        }
        if self.calibration.interval_ms == 0 {
            eyre::bail!("calibration.interval_ms must be >= 1");
        }

        // Pipeline
        if !self.pipeline.dead_zone_mps2.is_finite() || self.pipeline.dead_zone_mps2 < 0.0 {
            eyre::bail!("pipeline.dead_zone_mps2 must be finite and >= 0");
        }
        if !self.pipeline.stationary_band_mps2.is_finite()
            || self.pipeline.stationary_band_mps2 < 0.0
        {
            eyre::bail!("pipeline.stationary_band_mps2 must be finite and >= 0");
        }
        if self.pipeline.stationary_run_ticks == 0 {
            eyre::bail!("pipeline.stationary_run_ticks must be >= 1");
        }
        if !self.pipeline.notify_threshold_mps.is_finite()
            || self.pipeline.notify_threshold_mps < 0.0
        {
            eyre::bail!("pipeline.notify_threshold_mps must be finite and >= 0");
        }

        // Report
        if self.report.every_ticks == 0 {
            eyre::bail!("report.every_ticks must be >= 1");
        }
        if self.report.collector_host.is_some() && self.report.collector_port == 0 {
            eyre::bail!("report.collector_port must be > 0 when a host is set");
        }
        if self.report.send_timeout_ms == 0 {
            eyre::bail!("report.send_timeout_ms must be >= 1");
        }

        Ok(())
    }
}

/// Network credentials persisted outside the core, keyed by fixed names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: String,
    pub pass: String,
}

impl Credentials {
    /// Load credentials from a headerless key,value CSV.
    ///
    /// Expected rows (order-insensitive, '#'-prefixed keys are skipped):
    /// ssid,<network name>
    /// pass,<passphrase>
    pub fn load_csv(path: &std::path::Path) -> eyre::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| eyre::eyre!("open credentials CSV {:?}: {}", path, e))?;

        let mut ssid: Option<String> = None;
        let mut pass: Option<String> = None;
        for (idx, rec) in rdr.records().enumerate() {
            let record = rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {}", idx + 1, e))?;
            if record.len() < 2 {
                continue;
            }
            let key = record[0].trim();
            if key.starts_with('#') || key.is_empty() {
                continue;
            }
            let value = record[1].trim().to_string();
            match key {
                "ssid" => ssid = Some(value),
                "pass" => pass = Some(value),
                other => {
                    eyre::bail!("unknown credentials key '{}' at row {}", other, idx + 1);
                }
            }
        }

        let ssid = ssid.ok_or_else(|| eyre::eyre!("credentials CSV missing 'ssid' entry"))?;
        let pass = pass.ok_or_else(|| eyre::eyre!("credentials CSV missing 'pass' entry"))?;
        if ssid.is_empty() {
            eyre::bail!("credentials 'ssid' entry is empty");
        }
        Ok(Self { ssid, pass })
    }
}
