//! Example valuations.
//!
//! Set `RUST_LOG=debug` (or `trace`) to see lattice and nested valuations.

use optlattice::instruments::{Contract, OptionContract};
use optlattice::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("optlattice examples");

    let extendible = OptionContract::extendible_call(73.0, 0.25, 0.25, 0.02)?;
    println!("Extendible Call: {:.6}", extendible.lattice_value(75.0, 1000, None)?);

    let index_call = OptionContract::european_call(1470.37, 0.5, 0.12, 0.02)?;
    println!("European Call: {:.6}", index_call.analytic_value(1400.0)?);

    let put = OptionContract::european_put(63.75, 1.0, 0.2, 0.04)?;
    println!("European Put: {:.6}", put.analytic_value(75.0)?);

    let compound = OptionContract::compound_call(2.5, 3.0 / 12.0, 0.25, 0.01)?;
    println!("Compound Call: {:.6}", compound.lattice_value(80.0, 30, None)?);

    let reloadable = OptionContract::reloadable_call(110.0, 2.0, 0.32, 0.0195)?;
    println!(
        "Reloadable Call (spot 100): {:.6}",
        reloadable.lattice_value(100.0, 200, None)?
    );

    Ok(())
}
