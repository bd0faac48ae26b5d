//! Playback service configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for [`PlayerService`](crate::PlayerService).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Period of the background state sampler. Commands additionally
    /// trigger an immediate out-of-band sample, so observers see command
    /// feedback well inside one period.
    ///
    /// Default: 1000 ms.
    #[serde(default = "default_sample_interval")]
    pub sample_interval: Duration,

    /// Capacity of the command channel between handles and the
    /// orchestrator task. Commands are applied strictly in send order and
    /// never coalesced; the buffer only absorbs bursts.
    ///
    /// Default: 32.
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sample_interval: default_sample_interval(),
            command_buffer: default_command_buffer(),
        }
    }
}

impl PlayerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_interval.is_zero() {
            return Err("sample_interval must be > 0".to_string());
        }
        if self.command_buffer == 0 {
            return Err("command_buffer must be > 0".to_string());
        }
        Ok(())
    }
}

fn default_sample_interval() -> Duration {
    Duration::from_millis(1000)
}

fn default_command_buffer() -> usize {
    32
}
