//! Mappings from `speedwatch_config` schemas into core types.

use crate::{IntegrationInput, PipelineCfg};

impl From<speedwatch_config::IntegrationInput> for IntegrationInput {
    fn from(v: speedwatch_config::IntegrationInput) -> Self {
        match v {
            speedwatch_config::IntegrationInput::X => Self::X,
            speedwatch_config::IntegrationInput::Y => Self::Y,
            speedwatch_config::IntegrationInput::Z => Self::Z,
            speedwatch_config::IntegrationInput::Magnitude => Self::Magnitude,
        }
    }
}

impl From<&speedwatch_config::PipelineCfg> for PipelineCfg {
    fn from(c: &speedwatch_config::PipelineCfg) -> Self {
        Self {
            dead_zone_mps2: c.dead_zone_mps2,
            stationary_band_mps2: c.stationary_band_mps2,
            stationary_run_ticks: c.stationary_run_ticks,
            notify_threshold_mps: c.notify_threshold_mps,
            input: c.integrate.into(),
        }
    }
}
