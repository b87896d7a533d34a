// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error type for the binary

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub(crate) enum JunctionError {
    #[error(transparent)]
    #[diagnostic(code(junction::io_error))]
    Io(#[from] std::io::Error),
    #[error("Failed to load the configuration: {0}")]
    #[diagnostic(
        code(junction::config_error),
        help("Check `.config/default.toml` and any `JUNCTION__` environment variables")
    )]
    Config(#[from] config::ConfigError),
    #[error("{name} must be a finite, non-negative concentration, got {value}")]
    #[diagnostic(code(junction::invalid_input), help("Concentrations are given in cm^-3"))]
    InvalidConcentration { name: &'static str, value: f64 },
    #[error("{name} must be finite and positive, got {value}")]
    #[diagnostic(code(junction::config_error), help("Set it under the `[current]` section"))]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    #[diagnostic(code(junction::invalid_input))]
    NonFinite { name: &'static str, value: f64 },
}

/// Rejects a concentration that is negative, NaN or infinite
pub(crate) fn validate_concentration(name: &'static str, value: f64) -> Result<f64, JunctionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(JunctionError::InvalidConcentration { name, value })
    }
}

pub(crate) fn validate_finite(name: &'static str, value: f64) -> Result<f64, JunctionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(JunctionError::NonFinite { name, value })
    }
}
