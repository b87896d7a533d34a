use super::error::JunctionError;
use crate::{band::MaterialConstants, current::CurrentParameters};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::env;

/// Settings for every calculation the binary runs
///
/// Every section falls back to its built-in defaults, so no configuration file is required.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Configuration {
    pub(crate) material: MaterialConstants<f64>,
    pub(crate) current: CurrentParameters<f64>,
    pub(crate) sampling: SamplingConfiguration,
}

/// Resolution of the sampled sequences
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct SamplingConfiguration {
    /// Energy step in eV of the occupation distribution
    pub(crate) occupation_step: f64,
    pub(crate) electrostatic_points: usize,
    pub(crate) band_diagram_points: usize,
    pub(crate) carrier_points: usize,
    /// Number of equal steps spanning the reverse part of the I-V sweep
    pub(crate) iv_intervals: usize,
}

impl Default for SamplingConfiguration {
    fn default() -> Self {
        Self {
            occupation_step: 0.005,
            electrostatic_points: 501,
            band_diagram_points: 301,
            carrier_points: 401,
            iv_intervals: 100,
        }
    }
}

impl Configuration {
    pub(crate) fn build() -> Result<Self, JunctionError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // The default settings shipped with the binary
            .add_source(File::with_name(".config/default").required(false))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false))
            // Overrides such as `JUNCTION__CURRENT__LIFETIME=1e-6`
            .add_source(Environment::with_prefix("JUNCTION").separator("__"));

        Self::from_builder(builder)
    }

    pub(crate) fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, JunctionError> {
        let configuration: Self = builder.build()?.try_deserialize()?;
        configuration.validate()?;
        tracing::debug!(?configuration, "Loaded configuration");
        Ok(configuration)
    }

    /// Rejects transport parameters which the current model divides by or takes the root of
    fn validate(&self) -> Result<(), JunctionError> {
        let current = &self.current;
        [
            ("current.electron_mobility", current.electron_mobility),
            ("current.hole_mobility", current.hole_mobility),
            ("current.lifetime", current.lifetime),
            ("current.thermal_voltage", current.thermal_voltage),
            ("current.intrinsic_concentration", current.intrinsic_concentration),
        ]
        .into_iter()
        .try_for_each(|(name, value)| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(JunctionError::InvalidParameter { name, value })
            }
        })
    }
}
