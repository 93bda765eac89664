mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Game};
use common::{get_env_usize, ConfigLoader, FsExt};
use dotenv::dotenv;
use engine::GameEngine;
use env_logger::Env;
use log::info;
use solver::{solve, SolverOptions};
use subtraction::SubtractionOptions;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config_path = cli.config.relative_to_cwd()?;
    let config = ConfigLoader::new(config_path, "solver".to_string())?;

    let mut solver_options: SolverOptions = config.load()?;

    if let Some(ranks) = cli.ranks.or_else(|| get_env_usize("RANKS")) {
        solver_options.ranks = ranks;
    }

    info!("{:?}", solver_options);

    match cli.game {
        Game::Subtraction => {
            let subtraction_options: SubtractionOptions = config.scoped("subtraction").load()?;
            info!("{:?}", subtraction_options);

            let engine = subtraction::Engine::new(&subtraction_options);
            run(&engine, &solver_options)
        }
        Game::Tictactoe => {
            let engine = tictactoe::Engine::new();
            run(&engine, &solver_options)
        }
    }
}

fn run<E>(engine: &E, solver_options: &SolverOptions) -> Result<()>
where
    E: GameEngine + Sync,
{
    let root = engine.initial_state();
    let report = solve(engine, solver_options).context("Solver failed")?;

    for (rank, stats) in report.ranks.iter().enumerate() {
        info!("Rank {}: {}", rank, stats);
    }

    info!("Root {:?}: {}", root, report.root);

    Ok(())
}
