use nalgebra::RealField;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
/// Enum with all implemented material types
///
/// Only silicon is supported, but the engine is written against `MaterialConstants` so the
/// enum is labelled as `non_exhaustive`
pub enum Material {
    /// Silicon
    Si,
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Material::Si => {
                write!(f, "Si")
            }
        }
    }
}

impl Material {
    /// Returns the fixed band parameters for the given `Material` variant
    pub fn constants<T: Copy + RealField>(&self) -> MaterialConstants<T> {
        match self {
            Material::Si => MaterialConstants::silicon(),
        }
    }
}

/// Band-structure parameters of a single material
///
/// Energies are in eV, densities in cm^-3 and temperatures in K. Fields missing from a
/// deserialized table take their silicon values.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, bound(deserialize = "T: Copy + RealField + Deserialize<'de>"))]
pub struct MaterialConstants<T> {
    /// Band gap extrapolated to zero temperature
    pub band_gap_zero: T,
    /// Varshni coefficient `alpha` in eV / K
    pub varshni_alpha: T,
    /// Varshni coefficient `beta` in K
    pub varshni_beta: T,
    /// Effective conduction band density of states at 300K
    pub conduction_density_300: T,
    /// Effective valence band density of states at 300K
    pub valence_density_300: T,
    /// Donor ionization energy, measured down from the conduction band edge
    pub donor_ionization_energy: T,
    /// Acceptor ionization energy, measured up from the valence band edge
    pub acceptor_ionization_energy: T,
}

impl<T: Copy + RealField> MaterialConstants<T> {
    /// Fixed band parameters of silicon
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn silicon() -> Self {
        Self {
            band_gap_zero: 1.166,
            varshni_alpha: 4.73e-4,
            varshni_beta: 636.0,
            conduction_density_300: 2.8e19,
            valence_density_300: 1.04e19,
            donor_ionization_energy: 0.045,
            acceptor_ionization_energy: 0.057,
        }
    }
}

impl<T: Copy + RealField> Default for MaterialConstants<T> {
    fn default() -> Self {
        Self::silicon()
    }
}

#[cfg(test)]
mod test {
    use super::{Material, MaterialConstants};

    #[test]
    fn silicon_variant_returns_silicon_constants() {
        let constants: MaterialConstants<f64> = Material::Si.constants();
        assert_eq!(constants, MaterialConstants::silicon());
        assert_eq!(constants.band_gap_zero, 1.166);
        assert_eq!(constants.conduction_density_300, 2.8e19);
    }

    #[test]
    fn material_deserializes_from_its_symbol() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            material: Material,
        }
        let wrapper: Wrapper = config::Config::builder()
            .add_source(config::File::from_str(
                "material = \"Si\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(wrapper.material, Material::Si);
        assert_eq!(wrapper.material.to_string(), "Si");
    }
}
