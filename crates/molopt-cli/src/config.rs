use crate::cli::RelaxArgs;
use crate::error::{CliError, Result};
use molopt::core::models::atom::Atom;
use molopt::core::models::system::MolecularSystem;
use molopt::core::models::topology::{Angle, Bond, Dihedral, DihedralPotential, Topology};
use molopt::engine::config::{self as core_config, SpsaConfigBuilder};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const DEFAULT_ITERATIONS: usize = 1000;
const DEFAULT_NOISE_STD_DEV: f64 = 0.0;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSpsaConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    big_a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gamma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    perturbation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialNoiseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    std_dev: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialBoundsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct AtomEntry {
    name: String,
    position: [f64; 3],
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct BondEntry {
    atoms: [usize; 2],
    kb: f64,
    r0: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct AngleEntry {
    atoms: [usize; 3],
    kt: f64,
    t0: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum DihedralKind {
    Fourier,
    RyckaertBellemans,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct DihedralEntry {
    atoms: [usize; 4],
    #[serde(rename = "type")]
    kind: DihedralKind,
    coefficients: Vec<f64>,
}

impl From<&DihedralEntry> for Dihedral {
    fn from(entry: &DihedralEntry) -> Self {
        let coefficients = entry.coefficients.clone();
        let potential = match entry.kind {
            DihedralKind::Fourier => DihedralPotential::Fourier(coefficients),
            DihedralKind::RyckaertBellemans => DihedralPotential::RyckaertBellemans(coefficients),
        };
        Dihedral::new(entry.atoms, potential)
    }
}

/// A relaxation job: optimizer settings plus the molecular system.
///
/// The same schema is used for input and output, so a relaxed job can be fed
/// back in as the starting point of another run.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    spsa: Option<PartialSpsaConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    noise: Option<PartialNoiseConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<PartialBoundsConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    atoms: Vec<AtomEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    bonds: Vec<BondEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    angles: Vec<AngleEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dihedrals: Vec<DihedralEntry>,
}

impl JobFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading job description from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        debug!("Writing job description to file: {:?}", path);
        let content = toml::to_string_pretty(self).map_err(|e| {
            CliError::Other(
                anyhow::Error::new(e)
                    .context(format!("Failed to serialize job for {}", path.display())),
            )
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Builds the molecular system; every topology index must name a listed atom.
    pub fn to_system(&self) -> Result<MolecularSystem> {
        let atoms = self
            .atoms
            .iter()
            .map(|entry| Atom::new(&entry.name, Point3::from(entry.position)))
            .collect();

        let mut topology = Topology::new();
        topology.bonds = self
            .bonds
            .iter()
            .map(|b| Bond::new(b.atoms, b.kb, b.r0))
            .collect();
        topology.angles = self
            .angles
            .iter()
            .map(|a| Angle::new(a.atoms, a.kt, a.t0))
            .collect();
        topology.dihedrals = self.dihedrals.iter().map(Dihedral::from).collect();

        Ok(MolecularSystem::from_parts(atoms, topology)?)
    }

    /// Replaces the atom positions with those of `system`, keeping everything else.
    pub fn update_positions(&mut self, system: &MolecularSystem) -> Result<()> {
        if system.num_atoms() != self.atoms.len() {
            return Err(CliError::Config(format!(
                "Cannot write {} atom positions into a job with {} atoms.",
                system.num_atoms(),
                self.atoms.len()
            )));
        }
        for (entry, atom) in self.atoms.iter_mut().zip(system.atoms()) {
            entry.position = [atom.position.x, atom.position.y, atom.position.z];
        }
        Ok(())
    }

    /// Resolves the relaxation settings. Precedence: command-line flag, then
    /// `--set` override, then job file, then built-in default.
    ///
    /// `--set` values are written into the job itself, so they also appear in
    /// the job file written after the run.
    pub fn merge_with_cli(&mut self, args: &RelaxArgs) -> Result<core_config::RelaxConfig> {
        self.apply_set_values(&args.set_values)?;

        let spsa = self.spsa.clone().unwrap_or_default();
        let mut builder = SpsaConfigBuilder::new()
            .max_iterations(
                args.iterations
                    .or(spsa.iterations)
                    .unwrap_or(DEFAULT_ITERATIONS),
            )
            .seed(args.seed.or(spsa.seed));
        if let Some(a) = args.a.or(spsa.a) {
            builder = builder.a(a);
        }
        if let Some(c) = args.c.or(spsa.c) {
            builder = builder.c(c);
        }
        if let Some(big_a) = spsa.big_a {
            builder = builder.big_a(big_a);
        }
        if let Some(alpha) = spsa.alpha {
            builder = builder.alpha(alpha);
        }
        if let Some(gamma) = spsa.gamma {
            builder = builder.gamma(gamma);
        }
        if let Some(perturbation) = spsa.perturbation {
            builder = builder.perturbation_magnitude(perturbation);
        }
        let spsa_config = builder
            .build()
            .map_err(|e| CliError::Config(format!("[spsa] {e}")))?;

        let noise_std_dev = args
            .noise
            .or(self.noise.as_ref().and_then(|n| n.std_dev))
            .unwrap_or(DEFAULT_NOISE_STD_DEV);

        Ok(core_config::RelaxConfig {
            spsa: spsa_config,
            noise_std_dev,
            bounds: Self::merge_bounds(self.bounds.as_ref())?,
        })
    }

    fn merge_bounds(partial: Option<&PartialBoundsConfig>) -> Result<Option<core_config::Bounds>> {
        let Some(p) = partial else {
            return Ok(None);
        };
        let lower = p
            .lower
            .ok_or_else(|| CliError::Config("`bounds` requires `lower`".to_string()))?;
        let upper = p
            .upper
            .ok_or_else(|| CliError::Config("`bounds` requires `upper`".to_string()))?;
        core_config::Bounds::new(lower, upper)
            .map(Some)
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "spsa.a" => self.spsa_mut().a = Some(parse_value(key, value_str)?),
                "spsa.big-a" => self.spsa_mut().big_a = Some(parse_value(key, value_str)?),
                "spsa.alpha" => self.spsa_mut().alpha = Some(parse_value(key, value_str)?),
                "spsa.c" => self.spsa_mut().c = Some(parse_value(key, value_str)?),
                "spsa.gamma" => self.spsa_mut().gamma = Some(parse_value(key, value_str)?),
                "spsa.perturbation" => {
                    self.spsa_mut().perturbation = Some(parse_value(key, value_str)?)
                }
                "spsa.iterations" => {
                    self.spsa_mut().iterations = Some(parse_value(key, value_str)?)
                }
                "spsa.seed" => self.spsa_mut().seed = Some(parse_value(key, value_str)?),
                "noise.std-dev" => {
                    self.noise.get_or_insert_with(Default::default).std_dev =
                        Some(parse_value(key, value_str)?)
                }
                "bounds.lower" => {
                    self.bounds.get_or_insert_with(Default::default).lower =
                        Some(parse_value(key, value_str)?)
                }
                "bounds.upper" => {
                    self.bounds.get_or_insert_with(Default::default).upper =
                        Some(parse_value(key, value_str)?)
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn spsa_mut(&mut self) -> &mut PartialSpsaConfig {
        self.spsa.get_or_insert_with(Default::default)
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid value for {}: '{}' ({})",
            key,
            value_str,
            std::any::type_name::<T>()
        ))
    })
}
