use std::time::{Duration, Instant};

use engine::GameEngine;
use log::info;

use super::{
    channel_mesh, Abort, Partition, Resolution, SolverError, SolverOptions, Worker,
    WorkerReport, WorkerStats,
};

#[derive(Debug)]
pub struct ClusterReport {
    pub root: Resolution,
    pub ranks: Vec<WorkerStats>,
    pub elapsed: Duration,
}

impl ClusterReport {
    pub fn totals(&self) -> WorkerStats {
        self.ranks
            .iter()
            .fold(WorkerStats::default(), |mut totals, stats| {
                totals.merge(stats);
                totals
            })
    }
}

/// Solves the engine's initial position.
pub fn solve<E>(engine: &E, options: &SolverOptions) -> Result<ClusterReport, SolverError>
where
    E: GameEngine + Sync,
{
    solve_from(engine, engine.initial_state(), options)
}

/// Runs `options.ranks` workers, one thread each, until `root` is resolved.
///
/// If a rank fails the others wind down once idle and the failing rank's error is returned.
pub fn solve_from<E>(
    engine: &E,
    root: E::State,
    options: &SolverOptions,
) -> Result<ClusterReport, SolverError>
where
    E: GameEngine + Sync,
{
    let partition = Partition::new(options.ranks)?;
    let start = Instant::now();
    let stats_interval = options.stats_interval;
    let abort = Abort::new();
    let abort = &abort;

    info!("Solving {:?} on {} ranks", root, partition.ranks());

    let results = crossbeam::scope(|s| {
        let handles = channel_mesh(partition.ranks())
            .into_iter()
            .enumerate()
            .map(|(rank, transport)| {
                let root = (rank == 0).then(|| root.clone());

                s.spawn(move |_| -> Result<WorkerReport, SolverError> {
                    let worker = Worker::new(engine, transport, stats_interval)
                        .map_err(|err| {
                            abort.raise(rank);
                            err
                        })?
                        .watch(abort);

                    match root {
                        Some(root) => worker.coordinate(root).run(),
                        None => worker.run(),
                    }
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .enumerate()
            .map(|(rank, handle)| match handle.join() {
                Ok(result) => result.map_err(|err| SolverError::Rank {
                    rank,
                    source: Box::new(err),
                }),
                Err(_) => Err(SolverError::Panicked { rank }),
            })
            .collect::<Vec<_>>()
    })
    .map_err(|_| SolverError::Panicked { rank: 0 })?;

    // Peers of a failed rank can fail in turn, the rank that raised the abort is the cause.
    let failed = abort.raised();
    let mut failure = None;
    let mut reports = Vec::with_capacity(results.len());

    for (rank, result) in results.into_iter().enumerate() {
        match result {
            Ok(report) => reports.push(report),
            Err(err) if failure.is_none() || failed == Some(rank) => failure = Some(err),
            Err(_) => {}
        }
    }

    if let Some(err) = failure {
        return Err(err);
    }

    let root = reports
        .first()
        .and_then(|report| report.root)
        .ok_or_else(|| {
            SolverError::protocol(0, "coordinator exited without the root resolution")
        })?;

    let report = ClusterReport {
        root,
        ranks: reports.into_iter().map(|report| report.stats).collect(),
        elapsed: start.elapsed(),
    };

    info!(
        "Solved in {:.2}s. {}",
        report.elapsed.as_secs_f32(),
        report.totals()
    );

    Ok(report)
}
