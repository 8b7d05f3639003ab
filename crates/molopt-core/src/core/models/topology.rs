use std::fmt;

/// Harmonic bond stretch between two atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub atoms: [usize; 2],
    /// Force constant in kJ/(mol·nm²).
    pub force_constant: f64,
    /// Equilibrium length in nm.
    pub equilibrium_length: f64,
}

impl Bond {
    pub fn new(atoms: [usize; 2], force_constant: f64, equilibrium_length: f64) -> Self {
        Self {
            atoms,
            force_constant,
            equilibrium_length,
        }
    }
}

/// Harmonic bend of the angle `i-j-k`, with `j` as the vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    pub atoms: [usize; 3],
    /// Force constant in kJ/(mol·rad²).
    pub force_constant: f64,
    /// Equilibrium angle in radians.
    pub equilibrium_angle: f64,
}

impl Angle {
    pub fn new(atoms: [usize; 3], force_constant: f64, equilibrium_angle: f64) -> Self {
        Self {
            atoms,
            force_constant,
            equilibrium_angle,
        }
    }
}

/// Functional form of a torsion term. Coefficients are in kJ/mol.
#[derive(Debug, Clone, PartialEq)]
pub enum DihedralPotential {
    /// `sum_n f_n * (1 + cos(n * phi))`, with `n` starting at 1.
    Fourier(Vec<f64>),
    /// `sum_n C_n * cos(psi)^n` with `psi = phi - pi`, `n` starting at 0.
    RyckaertBellemans(Vec<f64>),
}

impl fmt::Display for DihedralPotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Fourier(_) => "Fourier",
                Self::RyckaertBellemans(_) => "Ryckaert-Bellemans",
            }
        )
    }
}

/// Torsion about the `j-k` bond of the quadruplet `i-j-k-l`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dihedral {
    pub atoms: [usize; 4],
    pub potential: DihedralPotential,
}

impl Dihedral {
    pub fn new(atoms: [usize; 4], potential: DihedralPotential) -> Self {
        Self { atoms, potential }
    }
}

/// The bonded interactions of a molecular system, expressed as indices into its
/// atom list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    pub bonds: Vec<Bond>,
    pub angles: Vec<Angle>,
    pub dihedrals: Vec<Dihedral>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of bonded terms.
    pub fn len(&self) -> usize {
        self.bonds.len() + self.angles.len() + self.dihedrals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest atom index referenced by any term, `None` for an empty topology.
    pub fn max_atom_index(&self) -> Option<usize> {
        let bonds = self.bonds.iter().flat_map(|b| b.atoms);
        let angles = self.angles.iter().flat_map(|a| a.atoms);
        let dihedrals = self.dihedrals.iter().flat_map(|d| d.atoms);
        bonds.chain(angles).chain(dihedrals).max()
    }
}
