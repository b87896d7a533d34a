//! # Calculations
//!
//! Delegated functions from `App` which run a single calculation and write it as text tables
//!

use super::{
    error::{validate_concentration, validate_finite},
    Configuration, JunctionError, Styles,
};
use crate::{
    band::BandModel,
    current::{CurrentModel, IvPoint},
    electrostatics::{calculate_pn_junction, JunctionResult},
    fermi::{Carrier, DopingProfile, FermiSolver},
};
use itertools::Itertools;
use owo_colors::OwoColorize;
use rayon::prelude::*;
use std::{fmt::Display, io::Write};

pub(crate) struct FermiInput {
    pub(crate) temperature: f64,
    pub(crate) donors: f64,
    pub(crate) acceptors: f64,
    pub(crate) holes: bool,
}

pub(crate) struct JunctionInput {
    pub(crate) acceptors: f64,
    pub(crate) donors: f64,
    pub(crate) bias: f64,
    pub(crate) temperature: f64,
    pub(crate) reference_acceptors: f64,
    pub(crate) reference_donors: f64,
}

pub(crate) fn band_structure(
    config: &Configuration,
    styles: &Styles,
    out: &mut impl Write,
    temperature: f64,
) -> Result<(), JunctionError> {
    let temperature = validate_finite("temperature", temperature)?;
    tracing::info!(temperature, "Band structure");

    let state = BandModel::new(config.material).state(temperature);
    heading(out, styles, "Band structure")?;
    field(out, styles, "Temperature (K)", format!("{:.2}", state.temperature))?;
    field(out, styles, "Band gap (eV)", format!("{:.5}", state.band_gap))?;
    field(out, styles, "Nc (cm^-3)", format!("{:.4e}", state.conduction_density))?;
    field(out, styles, "Nv (cm^-3)", format!("{:.4e}", state.valence_density))?;
    field(out, styles, "ni (cm^-3)", format!("{:.4e}", state.intrinsic_concentration))?;
    Ok(())
}

pub(crate) fn fermi_level(
    config: &Configuration,
    styles: &Styles,
    out: &mut impl Write,
    input: FermiInput,
) -> Result<(), JunctionError> {
    let temperature = validate_finite("temperature", input.temperature)?;
    let doping = DopingProfile::new(
        validate_concentration("donors", input.donors)?,
        validate_concentration("acceptors", input.acceptors)?,
    );
    tracing::info!(temperature, donors = input.donors, acceptors = input.acceptors, "Fermi level");

    let solver = FermiSolver::new(BandModel::new(config.material));
    let level = solver.solve(temperature, &doping);

    heading(out, styles, "Fermi level")?;
    field(out, styles, "Doping", level.dopant)?;
    field(out, styles, "Regime", format!("{:?}", level.regime))?;
    field(out, styles, "Ef - Ev (eV)", format!("{:.5}", level.energy))?;
    field(out, styles, "Ec (eV)", format!("{:.5}", level.conduction_band_edge()))?;
    if doping.is_compensated() {
        warning(out, styles, "Both dopants present, the acceptors are ignored")?;
    }

    let carrier = if input.holes {
        Carrier::Hole
    } else {
        Carrier::Electron
    };
    let distribution = solver.occupation_distribution(
        temperature,
        &doping,
        carrier,
        config.sampling.occupation_step,
    );
    heading(out, styles, "Occupation")?;
    table_header(out, styles, &["E (eV)", "occupation"])?;
    for sample in distribution.iter() {
        writeln_line(out, &row(&[sample.energy, sample.occupation]))?;
    }
    Ok(())
}

pub(crate) fn junction(
    config: &Configuration,
    styles: &Styles,
    out: &mut impl Write,
    input: JunctionInput,
) -> Result<(), JunctionError> {
    let acceptors = validate_concentration("acceptors", input.acceptors)?;
    let donors = validate_concentration("donors", input.donors)?;
    let bias = validate_finite("bias", input.bias)?;
    let temperature = validate_finite("temperature", input.temperature)?;
    let reference_acceptors = validate_concentration("reference acceptors", input.reference_acceptors)?;
    let reference_donors = validate_concentration("reference donors", input.reference_donors)?;
    tracing::info!(acceptors, donors, bias, "Junction electrostatics");

    let active = match calculate_pn_junction(acceptors, donors, bias, temperature) {
        Some(active) => active,
        None => return warning(out, styles, "No depletion region, the junction is at flat band"),
    };
    let reference = calculate_pn_junction(reference_acceptors, reference_donors, 0.0, temperature);

    heading(out, styles, "Junction")?;
    junction_fields(out, styles, &active)?;
    if reference.is_none() {
        warning(
            out,
            styles,
            "The reference doping has no depletion region, the reference column is omitted",
        )?;
    }

    let profile = active.profile(reference.as_ref(), config.sampling.electrostatic_points);
    heading(out, styles, "Electrostatic profile")?;
    let columns = ["x (cm)", "rho (C/cm^3)", "E (V/cm)", "V (V)", "V ref (V)"];
    table_header(out, styles, &columns[..if reference.is_some() { 5 } else { 4 }])?;
    for sample in profile.iter() {
        let mut values = vec![
            sample.position,
            sample.active.charge_density,
            sample.active.electric_field,
            sample.active.potential,
        ];
        values.extend(sample.reference.map(|reference| reference.potential));
        writeln_line(out, &row(&values))?;
    }
    Ok(())
}

pub(crate) fn current(
    config: &Configuration,
    styles: &Styles,
    out: &mut impl Write,
    acceptors: f64,
    donors: f64,
    bias: f64,
) -> Result<(), JunctionError> {
    let acceptors = validate_concentration("acceptors", acceptors)?;
    let donors = validate_concentration("donors", donors)?;
    let bias = validate_finite("bias", bias)?;
    tracing::info!(acceptors, donors, bias, "Diode current");

    let model = CurrentModel::new(config.current);
    let result = model.calculate(acceptors, donors, bias);

    heading(out, styles, "Current")?;
    field(out, styles, "Current density (A/cm^2)", format!("{:.4e}", result.current))?;
    field(out, styles, "Diode current (A/cm^2)", format!("{:.4e}", result.diode_current))?;
    field(out, styles, "Breakdown current (A/cm^2)", format!("{:.4e}", result.breakdown_current))?;
    field(out, styles, "Saturation current (A/cm^2)", format!("{:.4e}", result.saturation_current))?;
    field(out, styles, "Breakdown voltage (V)", format!("{:.3}", result.breakdown_voltage))?;
    field(out, styles, "Excess np (cm^-3)", format!("{:.4e}", result.excess_electron_density))?;
    field(out, styles, "Excess pn (cm^-3)", format!("{:.4e}", result.excess_hole_density))?;
    field(out, styles, "Ln (cm)", format!("{:.4e}", result.electron_diffusion_length))?;
    field(out, styles, "Lp (cm)", format!("{:.4e}", result.hole_diffusion_length))?;
    if result.is_avalanche() {
        warning(out, styles, "Reverse bias exceeds the breakdown voltage")?;
    }

    let curve = model.iv_curve(acceptors, donors, config.sampling.iv_intervals);
    let biases: Vec<f64> = curve.biases().collect();
    let points: Vec<IvPoint<f64>> = biases.par_iter().map(|&bias| curve.point(bias)).collect();
    heading(out, styles, "I-V sweep")?;
    table_header(out, styles, &["V (V)", "J (A/cm^2)"])?;
    for point in &points {
        writeln_line(out, &row(&[point.bias, point.current]))?;
    }

    // Profiles are drawn from the depletion region at this bias
    let junction = match calculate_pn_junction(acceptors, donors, bias, 300.0) {
        Some(junction) => junction,
        None => {
            return warning(
                out,
                styles,
                "No depletion region, carrier profile and band diagram are unavailable",
            )
        }
    };

    let profile = model.carrier_profile(
        acceptors,
        donors,
        bias,
        &junction,
        config.sampling.carrier_points,
    );
    heading(out, styles, "Carrier profile")?;
    table_header(out, styles, &["x (cm)", "n (cm^-3)", "p (cm^-3)"])?;
    for sample in profile.iter() {
        writeln_line(out, &row(&[sample.position, sample.electrons, sample.holes]))?;
    }

    let diagram = model.band_diagram(acceptors, bias, &junction, config.sampling.band_diagram_points);
    heading(out, styles, "Band diagram")?;
    table_header(out, styles, &["x (cm)", "Ec (eV)", "Ev (eV)", "Efn (eV)", "Efp (eV)"])?;
    for sample in diagram.iter() {
        writeln_line(out, &row(&[
            sample.position,
            sample.conduction_band_edge,
            sample.valence_band_edge,
            sample.electron_quasi_fermi_level,
            sample.hole_quasi_fermi_level,
        ]))?;
    }
    Ok(())
}

fn junction_fields(
    out: &mut impl Write,
    styles: &Styles,
    junction: &JunctionResult<f64>,
) -> Result<(), JunctionError> {
    field(out, styles, "Vbi (V)", format!("{:.4}", junction.built_in_potential))?;
    field(out, styles, "Vbi - Va (V)", format!("{:.4}", junction.total_potential))?;
    field(out, styles, "W (cm)", format!("{:.4e}", junction.depletion_width))?;
    field(out, styles, "xn (cm)", format!("{:.4e}", junction.n_side_width))?;
    field(out, styles, "xp (cm)", format!("{:.4e}", junction.p_side_width))?;
    field(out, styles, "Emax (V/cm)", format!("{:.4e}", junction.peak_field))?;
    Ok(())
}

fn heading(out: &mut impl Write, styles: &Styles, text: &str) -> Result<(), JunctionError> {
    writeln_line(out, "")?;
    writeln_line(out, &text.style(styles.heading_style).to_string())?;
    Ok(())
}

fn field(
    out: &mut impl Write,
    styles: &Styles,
    label: &str,
    value: impl Display,
) -> Result<(), JunctionError> {
    writeln_line(out, &format!(
        "{} {}",
        format!("{:<28}", label).style(styles.label_style),
        value.to_string().style(styles.value_style)
    ))?;
    Ok(())
}

fn warning(out: &mut impl Write, styles: &Styles, text: &str) -> Result<(), JunctionError> {
    tracing::warn!("{}", text);
    writeln_line(out, &text.style(styles.warning_style).to_string())?;
    Ok(())
}

fn table_header(out: &mut impl Write, styles: &Styles, columns: &[&str]) -> Result<(), JunctionError> {
    let header = columns.iter().map(|column| format!("{:>12}", column)).join(" ");
    writeln_line(out, &header.style(styles.label_style).to_string())?;
    Ok(())
}

fn writeln_line(out: &mut impl Write, line: &str) -> Result<(), JunctionError> {
    writeln!(out, "{}", line)?;
    Ok(())
}

fn row(values: &[f64]) -> String {
    values.iter().map(|value| format!("{:>12.4e}", value)).join(" ")
}

#[cfg(test)]
mod test {
    use super::*;

    fn junction_report(reference_acceptors: f64, bias: f64) -> Result<String, JunctionError> {
        let mut config = Configuration::default();
        config.sampling.electrostatic_points = 5;
        let mut out = Vec::new();
        junction(
            &config,
            &Styles::default(),
            &mut out,
            JunctionInput {
                acceptors: 1e16,
                donors: 1e16,
                bias,
                temperature: 300.,
                reference_acceptors,
                reference_donors: 1e16,
            },
        )?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn reference_column_is_printed_alongside_the_active_junction() {
        let report = junction_report(1e16, -1.).unwrap();
        assert!(report.contains("V ref (V)"));
        assert!(!report.contains("reference column is omitted"));
    }

    #[test]
    fn reference_without_depletion_region_is_reported() {
        let report = junction_report(0., -1.).unwrap();
        assert!(report.contains("reference column is omitted"));
        assert!(!report.contains("V ref (V)"));
        assert!(report.contains("Electrostatic profile"));
    }

    #[test]
    fn flat_band_junction_is_reported_instead_of_a_profile() {
        let report = junction_report(1e16, 1.5).unwrap();
        assert!(report.contains("No depletion region"));
        assert!(!report.contains("Electrostatic profile"));
    }

    #[test]
    fn negative_reference_doping_is_rejected() {
        assert!(matches!(
            junction_report(-1., 0.),
            Err(JunctionError::InvalidConcentration { name: "reference acceptors", .. })
        ));
    }

    #[test]
    fn rows_are_fixed_width_scientific() {
        let line = row(&[1.5e-5, -2.0]);
        assert_eq!(line, format!("{:>12} {:>12}", "1.5000e-5", "-2.0000e0"));
    }
}
