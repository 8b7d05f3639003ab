use super::energy::format_breakdown;
use crate::cli::RelaxArgs;
use crate::config::JobFile;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use molopt::engine::progress::ProgressReporter;
use molopt::workflows;
use tracing::info;

pub fn run(args: RelaxArgs) -> Result<()> {
    let mut job = JobFile::from_file(&args.config)?;
    info!("Merging configuration from job file and CLI arguments...");
    let config = job.merge_with_cli(&args)?;
    let system = job.to_system()?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Relaxing {} atoms over {} SPSA iterations...",
        system.num_atoms(),
        config.spsa.max_iterations
    );
    info!("Invoking the core relaxation workflow...");
    let result = workflows::relax::run(&system, &config, &reporter)?;

    info!(
        "Workflow finished after {} iteration(s), energy {:.4} -> {:.4} kJ/mol.",
        result.iterations,
        result.initial_energy.total(),
        result.final_energy.total()
    );

    job.update_positions(&result.system)?;
    job.write_to_file(&args.output)?;

    println!("Initial energy:\n{}", format_breakdown(&result.initial_energy));
    println!("Final energy:\n{}", format_breakdown(&result.final_energy));
    println!("✓ Relaxed system written to: {}", args.output.display());
    Ok(())
}
