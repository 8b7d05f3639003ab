use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Hyperparameters of an SPSA run in Spall's standard form.
///
/// `a_k = a / (k + 1 + A)^alpha` and `c_k = c / (k + 1)^gamma`, with Bernoulli
/// perturbations of magnitude `perturbation_magnitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpsaConfig {
    pub a: f64,
    /// Stability constant `A`, typically ~10% of the expected iteration count.
    pub big_a: f64,
    pub alpha: f64,
    pub c: f64,
    pub gamma: f64,
    pub perturbation_magnitude: f64,
    pub max_iterations: usize,
    /// `None` seeds the perturbation generator from system entropy.
    pub seed: Option<u64>,
}

impl SpsaConfig {
    /// Practically effective decay exponents from the SPSA literature.
    pub const STANDARD_ALPHA: f64 = 0.602;
    pub const STANDARD_GAMMA: f64 = 0.101;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

/// Configuration of a geometry relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxConfig {
    pub spsa: SpsaConfig,
    /// Standard deviation of the Gaussian noise added to every energy evaluation.
    pub noise_std_dev: f64,
    /// Per-coordinate box applied after every update.
    pub bounds: Option<Bounds>,
}

#[derive(Default)]
pub struct SpsaConfigBuilder {
    a: Option<f64>,
    big_a: Option<f64>,
    alpha: Option<f64>,
    c: Option<f64>,
    gamma: Option<f64>,
    perturbation_magnitude: Option<f64>,
    max_iterations: Option<usize>,
    seed: Option<u64>,
}

impl SpsaConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn a(mut self, a: f64) -> Self {
        self.a = Some(a);
        self
    }
    pub fn big_a(mut self, big_a: f64) -> Self {
        self.big_a = Some(big_a);
        self
    }
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
    pub fn c(mut self, c: f64) -> Self {
        self.c = Some(c);
        self
    }
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }
    pub fn perturbation_magnitude(mut self, magnitude: f64) -> Self {
        self.perturbation_magnitude = Some(magnitude);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// `a`, `c` and `max_iterations` are required. `A` defaults to `0`, the
    /// exponents to [`SpsaConfig::STANDARD_ALPHA`] / [`SpsaConfig::STANDARD_GAMMA`]
    /// and the perturbation magnitude to `1`.
    pub fn build(self) -> Result<SpsaConfig, ConfigError> {
        let config = SpsaConfig {
            a: self.a.ok_or(ConfigError::MissingParameter("a"))?,
            big_a: self.big_a.unwrap_or(0.0),
            alpha: self.alpha.unwrap_or(SpsaConfig::STANDARD_ALPHA),
            c: self.c.ok_or(ConfigError::MissingParameter("c"))?,
            gamma: self.gamma.unwrap_or(SpsaConfig::STANDARD_GAMMA),
            perturbation_magnitude: self.perturbation_magnitude.unwrap_or(1.0),
            max_iterations: self
                .max_iterations
                .ok_or(ConfigError::MissingParameter("max_iterations"))?,
            seed: self.seed,
        };

        positive("a", config.a)?;
        non_negative("big_a", config.big_a)?;
        non_negative("alpha", config.alpha)?;
        positive("c", config.c)?;
        non_negative("gamma", config.gamma)?;
        positive("perturbation_magnitude", config.perturbation_magnitude)?;

        Ok(config)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be a finite positive number",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be a finite non-negative number",
        })
    }
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(ConfigError::InvalidParameter {
                name: "bounds",
                value: lower,
                reason: "lower bound must not exceed the upper bound",
            });
        }
        Ok(Self { lower, upper })
    }
}
