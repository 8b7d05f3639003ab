use super::minimize;
use crate::core::forcefield::energy::EnergyCalculator;
use crate::core::forcefield::term::EnergyTerm;
use crate::core::models::system::MolecularSystem;
use crate::engine::config::RelaxConfig;
use crate::engine::conformation::ConformationLoss;
use crate::engine::constraint::BoxConstraint;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct RelaxationResult {
    pub system: MolecularSystem,
    pub initial_energy: EnergyTerm,
    pub final_energy: EnergyTerm,
    pub iterations: usize,
}

#[instrument(skip_all, name = "relax_workflow")]
pub fn run(
    initial_system: &MolecularSystem,
    config: &RelaxConfig,
    reporter: &ProgressReporter,
) -> Result<RelaxationResult, EngineError> {
    // === Phase 1: Initial energy and objective ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let initial_energy = EnergyCalculator::calculate(initial_system)?;
    info!(
        atoms = initial_system.num_atoms(),
        terms = initial_system.topology().len(),
        energy = initial_energy.total(),
        "Computed initial bonded energy."
    );
    reporter.report(Progress::Message(format!(
        "Initial energy: {:.4} kJ/mol",
        initial_energy.total()
    )));

    // Keep the noise stream distinct from the perturbation stream.
    let noise_seed = config.spsa.seed.map(|seed| seed.wrapping_add(1));
    let loss = ConformationLoss::new(
        initial_system.topology().clone(),
        config.noise_std_dev,
        noise_seed,
    )?;
    let constraint = config.bounds.map(BoxConstraint::new);
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: SPSA over the flattened coordinates ===
    reporter.report(Progress::PhaseStart {
        name: "SPSA Relaxation",
    });
    let result = minimize::run(
        loss,
        initial_system.coordinates(),
        &config.spsa,
        constraint,
        reporter,
    )?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Write back and re-evaluate ===
    let mut system = initial_system.clone();
    system.set_coordinates(&result.theta)?;
    let final_energy = EnergyCalculator::calculate(&system)?;

    info!(
        initial_energy = initial_energy.total(),
        final_energy = final_energy.total(),
        iterations = result.iterations,
        "Relaxation complete."
    );
    Ok(RelaxationResult {
        system,
        initial_energy,
        final_energy,
        iterations: result.iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::{Angle, Bond};
    use crate::engine::config::{Bounds, SpsaConfigBuilder};
    use crate::engine::conformation::NoiseError;
    use nalgebra::Point3;
    use std::sync::Mutex;

    fn stretched_diatomic() -> MolecularSystem {
        let mut system = MolecularSystem::new();
        let a = system.add_atom(Atom::new("O1", Point3::new(0.0, 0.0, 0.0)));
        let b = system.add_atom(Atom::new("O2", Point3::new(1.5, 0.0, 0.0)));
        system.add_bond(Bond::new([a, b], 100.0, 1.0)).unwrap();
        system
    }

    fn relax_config(iterations: usize, noise_std_dev: f64, bounds: Option<Bounds>) -> RelaxConfig {
        RelaxConfig {
            spsa: SpsaConfigBuilder::new()
                .a(0.001)
                .big_a(10.0)
                .c(0.01)
                .max_iterations(iterations)
                .seed(Some(2024))
                .build()
                .unwrap(),
            noise_std_dev,
            bounds,
        }
    }

    #[test]
    fn relaxation_lowers_energy_of_stretched_bond() {
        let system = stretched_diatomic();
        let reporter = ProgressReporter::new();
        let result = run(&system, &relax_config(1000, 0.0, None), &reporter).unwrap();

        assert!((result.initial_energy.total() - 25.0).abs() < 1e-9);
        assert!(result.final_energy.total() < result.initial_energy.total());
        assert_eq!(result.iterations, 1000);

        let relaxed = result.system.atoms();
        let length = Atom::distance(&relaxed[0], &relaxed[1]);
        assert!(length < 1.5, "bond length {length}");
        assert_eq!(relaxed[0].name, "O1");
    }

    #[test]
    fn final_energy_matches_returned_coordinates() {
        let system = stretched_diatomic();
        let reporter = ProgressReporter::new();
        let result = run(&system, &relax_config(100, 0.0, None), &reporter).unwrap();
        let recomputed = EnergyCalculator::calculate(&result.system).unwrap();
        assert_eq!(recomputed, result.final_energy);
    }

    #[test]
    fn noisy_relaxation_still_returns_a_valid_system() {
        let mut system = stretched_diatomic();
        let c = system.add_atom(Atom::new("H", Point3::new(1.5, 1.0, 0.0)));
        system
            .add_angle(Angle::new([0, 1, c], 50.0, std::f64::consts::FRAC_PI_2))
            .unwrap();
        let reporter = ProgressReporter::new();
        let result = run(&system, &relax_config(200, 0.01, None), &reporter).unwrap();
        assert_eq!(result.system.num_atoms(), 3);
        assert!(result.final_energy.total().is_finite());
    }

    #[test]
    fn bounds_clip_every_coordinate() {
        let system = stretched_diatomic();
        let bounds = Bounds::new(-0.1, 1.4).unwrap();
        let reporter = ProgressReporter::new();
        let result = run(&system, &relax_config(50, 0.0, Some(bounds)), &reporter).unwrap();
        assert!(
            result
                .system
                .coordinates()
                .iter()
                .all(|x| (-0.1..=1.4).contains(x))
        );
    }

    #[test]
    fn reports_both_phases_in_order() {
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));
        run(&stretched_diatomic(), &relax_config(3, 0.0, None), &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            phases.into_inner().unwrap(),
            vec!["Preparation", "SPSA Relaxation"]
        );
    }

    #[test]
    fn announces_initial_energy_during_preparation() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            events.lock().unwrap().push(event);
        }));
        run(&stretched_diatomic(), &relax_config(2, 0.0, None), &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert!(matches!(
            events[0],
            Progress::PhaseStart {
                name: "Preparation"
            }
        ));
        match &events[1] {
            Progress::Message(msg) => assert_eq!(msg, "Initial energy: 25.0000 kJ/mol"),
            other => panic!("Expected a message, got {other:?}"),
        }
        assert!(matches!(events[2], Progress::PhaseFinish));
    }

    #[test]
    fn invalid_noise_fails_before_optimizing() {
        let reporter = ProgressReporter::new();
        let result = run(
            &stretched_diatomic(),
            &relax_config(10, -1.0, None),
            &reporter,
        );
        assert!(matches!(
            result,
            Err(EngineError::Noise(NoiseError::InvalidStdDev(s))) if s == -1.0
        ));
    }
}
