use nalgebra::RealField;

/// Which dopant species sets the carrier statistics
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dopant {
    /// n-type, set by the donor density
    Donor,
    /// p-type, set by the acceptor density
    Acceptor,
    /// Undoped
    Intrinsic,
}

impl std::fmt::Display for Dopant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Dopant::Donor => write!(f, "n-type"),
            Dopant::Acceptor => write!(f, "p-type"),
            Dopant::Intrinsic => write!(f, "intrinsic"),
        }
    }
}

/// Donor and acceptor densities of a homogeneous region in cm^-3
///
/// Negative and NaN densities saturate to zero on construction, so both fields are always
/// non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DopingProfile<T> {
    donor_density: T,
    acceptor_density: T,
}

impl<T: Copy + RealField> DopingProfile<T> {
    /// Negative and NaN densities are saturated to zero
    pub fn new(donor_density: T, acceptor_density: T) -> Self {
        Self {
            donor_density: non_negative(donor_density),
            acceptor_density: non_negative(acceptor_density),
        }
    }

    /// Donors only
    pub fn n_type(donor_density: T) -> Self {
        Self::new(donor_density, T::zero())
    }

    /// Acceptors only
    pub fn p_type(acceptor_density: T) -> Self {
        Self::new(T::zero(), acceptor_density)
    }

    /// No dopants
    pub fn intrinsic() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// Donor density in cm^-3
    pub fn donor_density(&self) -> T {
        self.donor_density
    }

    /// Acceptor density in cm^-3
    pub fn acceptor_density(&self) -> T {
        self.acceptor_density
    }

    /// The dopant that governs the Fermi level
    ///
    /// Donors are checked first. A profile carrying both species is treated as n-type with no
    /// compensation from the acceptors.
    pub fn dominant(&self) -> Dopant {
        if self.donor_density > T::zero() {
            Dopant::Donor
        } else if self.acceptor_density > T::zero() {
            Dopant::Acceptor
        } else {
            Dopant::Intrinsic
        }
    }

    /// Whether both species are present, in which case the acceptors are ignored
    pub fn is_compensated(&self) -> bool {
        self.donor_density > T::zero() && self.acceptor_density > T::zero()
    }
}

fn non_negative<T: Copy + RealField>(density: T) -> T {
    if density > T::zero() {
        density
    } else {
        T::zero()
    }
}
