use crate::cli::EnergyArgs;
use crate::config::JobFile;
use crate::error::Result;
use molopt::core::forcefield::energy::EnergyCalculator;
use molopt::core::forcefield::term::EnergyTerm;
use molopt::engine::error::EngineError;
use tracing::info;

pub fn run(args: EnergyArgs) -> Result<()> {
    let job = JobFile::from_file(&args.config)?;
    let system = job.to_system()?;
    info!(
        "Loaded system with {} atoms and {} bonded terms.",
        system.num_atoms(),
        system.topology().len()
    );

    let energy = EnergyCalculator::calculate(&system).map_err(EngineError::from)?;
    println!("{}", format_breakdown(&energy));
    Ok(())
}

pub(crate) fn format_breakdown(energy: &EnergyTerm) -> String {
    format!(
        "  Bond:     {:>14.6} kJ/mol\n  Angle:    {:>14.6} kJ/mol\n  Dihedral: {:>14.6} kJ/mol\n  Total:    {:>14.6} kJ/mol",
        energy.bond,
        energy.angle,
        energy.dihedral,
        energy.total()
    )
}
