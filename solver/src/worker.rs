use std::fmt::{self, Display, Formatter};

use crossbeam::utils::Backoff;
use engine::GameEngine;
use log::{error, info, trace, warn};

use super::{
    combine, Abort, AbortWatch, Coordinator, Dependent, GameStateAdapter, Job, JobId,
    JobIdGenerator, JobKind, JobQueue, Partition, Rank, Request, Resolution, ResolutionTable,
    SolverError, Transport,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub lookups: usize,
    pub distributes: usize,
    pub resolves: usize,
    pub send_backs: usize,
    pub polls: usize,
    pub messages_sent: usize,
    pub messages_received: usize,
    pub positions_resolved: usize,
    pub peak_pending: usize,
}

impl WorkerStats {
    fn record(&mut self, kind: JobKind) {
        match kind {
            JobKind::Lookup => self.lookups += 1,
            JobKind::Distribute => self.distributes += 1,
            JobKind::Resolve => self.resolves += 1,
            JobKind::SendBack => self.send_backs += 1,
            JobKind::CheckForUpdates => self.polls += 1,
            JobKind::Finished => {}
        }
    }

    /// Jobs processed, not counting polls of the transport.
    pub fn jobs(&self) -> usize {
        self.lookups + self.distributes + self.resolves + self.send_backs
    }

    pub fn merge(&mut self, other: &WorkerStats) {
        self.lookups += other.lookups;
        self.distributes += other.distributes;
        self.resolves += other.resolves;
        self.send_backs += other.send_backs;
        self.polls += other.polls;
        self.messages_sent += other.messages_sent;
        self.messages_received += other.messages_received;
        self.positions_resolved += other.positions_resolved;
        self.peak_pending = self.peak_pending.max(other.peak_pending);
    }
}

impl Display for WorkerStats {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Jobs: {}, Lookups: {}, Distributes: {}, Resolves: {}, Send Backs: {}, Polls: {}, Sent: {}, Received: {}, Resolved: {}, Peak Pending: {}",
            self.jobs(),
            self.lookups,
            self.distributes,
            self.resolves,
            self.send_backs,
            self.polls,
            self.messages_sent,
            self.messages_received,
            self.positions_resolved,
            self.peak_pending
        )
    }
}

#[derive(Debug)]
pub struct WorkerReport {
    pub rank: Rank,
    pub stats: WorkerStats,
    /// Only rank 0 knows the root's resolution.
    pub root: Option<Resolution>,
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// One rank: its job queue, its share of the resolution table, and the loop that drives them.
pub struct Worker<'a, E, T>
where
    E: GameEngine,
{
    // Dropped before the transport, so a panicking rank is marked failed before peers see
    // its inbox disappear.
    abort: Option<AbortWatch<'a>>,
    rank: Rank,
    adapter: GameStateAdapter<'a, E>,
    transport: T,
    partition: Partition,
    queue: JobQueue<E::State>,
    table: ResolutionTable<E::State>,
    job_ids: JobIdGenerator,
    coordinator: Option<Coordinator<E::State>>,
    backoff: Backoff,
    stats: WorkerStats,
    stats_interval: usize,
}

impl<'a, E, T> Worker<'a, E, T>
where
    E: GameEngine,
    T: Transport<E::State>,
{
    pub fn new(engine: &'a E, transport: T, stats_interval: usize) -> Result<Self, SolverError> {
        let rank = transport.rank();
        let partition = Partition::new(transport.ranks())?;

        Ok(Self {
            abort: None,
            rank,
            adapter: GameStateAdapter::new(engine),
            transport,
            partition,
            queue: JobQueue::new(),
            table: ResolutionTable::new(rank),
            job_ids: JobIdGenerator::new(rank),
            coordinator: None,
            backoff: Backoff::new(),
            stats: WorkerStats::default(),
            stats_interval,
        })
    }

    /// Makes this worker the coordinator of a run solving `root`.
    pub fn coordinate(mut self, root: E::State) -> Self {
        self.coordinator = Some(Coordinator::new(self.rank, root));
        self
    }

    /// Shares `abort` with the other ranks of the run: this worker raises it when it fails
    /// and stops once it is idle and another rank has raised it.
    pub fn watch(mut self, abort: &'a Abort) -> Self {
        self.abort = Some(abort.watch(self.rank));
        self
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn run(mut self) -> Result<WorkerReport, SolverError> {
        info!(
            "Rank {} starting, Ranks: {}, Coordinator: {}",
            self.rank,
            self.partition.ranks(),
            self.coordinator.is_some()
        );

        if let Err(err) = self.drive() {
            if let Some(abort) = &self.abort {
                abort.raise();
            }

            return Err(err);
        }

        self.stats.peak_pending = self.table.peak_pending();
        info!("Rank {} finished. {}", self.rank, self.stats);

        Ok(WorkerReport {
            rank: self.rank,
            stats: self.stats,
            root: self.coordinator.and_then(|c| c.resolution()),
        })
    }

    fn drive(&mut self) -> Result<(), SolverError> {
        self.seed()?;

        loop {
            let job = match self.queue.pop() {
                Some(job) => job,
                None => {
                    self.idle()?;
                    continue;
                }
            };

            let kind = job.kind();
            self.stats.record(kind);
            trace!("Rank {} processing {:?}", self.rank, job);

            match self.dispatch(job) {
                Ok(Step::Continue) => {}
                Ok(Step::Exit) => return Ok(()),
                Err(err) => {
                    error!(
                        "Rank {} failed processing {:?} job: {}",
                        self.rank, kind, err
                    );
                    return Err(err);
                }
            }

            if kind != JobKind::CheckForUpdates {
                self.log_progress();
            }
        }
    }

    fn seed(&mut self) -> Result<(), SolverError> {
        let job_id = self.job_ids.next_id();

        if let Some(coordinator) = self.coordinator.as_mut() {
            let lookup = coordinator.seed(job_id);
            let owner = self.partition.owner(coordinator.root());

            info!(
                "Rank {} seeding root {:?} on rank {}",
                self.rank,
                coordinator.root(),
                owner
            );

            self.send(owner, &lookup)?;
        }

        Ok(())
    }

    /// The queue ran dry. The coordinator finishes the run once the root is known, everyone
    /// else goes looking for messages. A failure elsewhere in the cluster ends the run here.
    fn idle(&mut self) -> Result<(), SolverError> {
        if let Some(failed) = self.abort.as_ref().and_then(|abort| abort.raised()) {
            warn!("Rank {} stopping, rank {} failed", self.rank, failed);
            self.queue.push(Job::Finished);

            return Ok(());
        }

        let finish = self
            .coordinator
            .as_mut()
            .map(|c| c.take_finish())
            .unwrap_or(false);

        if finish {
            info!("Rank {} broadcasting finish", self.rank);

            let own_rank = self.rank;
            for rank in (0..self.partition.ranks()).filter(|r| *r != own_rank) {
                self.send(rank, &Job::Finished)?;
            }

            self.queue.push(Job::Finished);
        } else {
            self.queue.push(Job::CheckForUpdates);
        }

        Ok(())
    }

    fn dispatch(&mut self, job: Job<E::State>) -> Result<Step, SolverError> {
        match job {
            Job::Finished => return Ok(Step::Exit),
            Job::Lookup {
                position,
                origin,
                job_id,
            } => self.lookup(position, origin, job_id)?,
            Job::Distribute { position } => self.distribute(position)?,
            Job::Resolve {
                position,
                job_id,
                resolution,
            } => self.resolve(position, job_id, resolution)?,
            Job::SendBack {
                position,
                resolution,
                origin,
                job_id,
            } => self.send_back(position, resolution, origin, job_id)?,
            Job::CheckForUpdates => self.check_for_updates()?,
        }

        Ok(Step::Continue)
    }

    fn lookup(&mut self, position: E::State, origin: Rank, job_id: JobId) -> Result<(), SolverError> {
        let owner = self.partition.owner(&position);
        if owner != self.rank {
            return Err(SolverError::protocol(
                self.rank,
                format!(
                    "lookup for {:?} from rank {} belongs to rank {}",
                    position, origin, owner
                ),
            ));
        }

        if let Some(resolution) = self.table.resolved(&position) {
            self.queue.push(Job::SendBack {
                position,
                resolution,
                origin,
                job_id,
            });

            return Ok(());
        }

        if let Some(outcome) = self.adapter.terminal_value(&position) {
            let resolution = Resolution::primitive(outcome);
            self.complete(position.clone(), resolution)?;
            self.queue.push(Job::SendBack {
                position,
                resolution,
                origin,
                job_id,
            });

            return Ok(());
        }

        match self
            .table
            .request(position.clone(), Dependent { origin, job_id })
        {
            Request::First => self.queue.push(Job::Distribute { position }),
            Request::Pending => {
                trace!("Rank {} already computing {:?}", self.rank, position);
            }
        }

        Ok(())
    }

    fn distribute(&mut self, position: E::State) -> Result<(), SolverError> {
        let children = self.adapter.expand(&position).collect::<Vec<_>>();

        if children.is_empty() {
            return self.complete(position, combine(&[]));
        }

        let job_id = self.job_ids.next_id();
        self.table.open(job_id, position, children.len())?;

        for child in children {
            let owner = self.partition.owner(&child);
            let lookup = Job::Lookup {
                position: child,
                origin: self.rank,
                job_id,
            };

            self.send(owner, &lookup)?;
        }

        Ok(())
    }

    fn resolve(
        &mut self,
        position: E::State,
        job_id: JobId,
        resolution: Resolution,
    ) -> Result<(), SolverError> {
        if let Some(coordinator) = self.coordinator.as_mut() {
            if coordinator.is_root_request(job_id) {
                info!("Root {:?} resolved: {}", position, resolution);
                return coordinator.record(resolution);
            }
        }

        match self.table.aggregate(job_id, resolution)? {
            Some((parent, combined)) => self.complete(parent, combined),
            None => Ok(()),
        }
    }

    fn send_back(
        &mut self,
        position: E::State,
        resolution: Resolution,
        origin: Rank,
        job_id: JobId,
    ) -> Result<(), SolverError> {
        let resolve = Job::Resolve {
            position,
            job_id,
            resolution,
        };

        if origin == self.rank {
            self.queue.push(resolve);
            Ok(())
        } else {
            self.send(origin, &resolve)
        }
    }

    fn check_for_updates(&mut self) -> Result<(), SolverError> {
        match self.transport.try_receive()? {
            Some(job) => {
                self.stats.messages_received += 1;
                self.backoff.reset();
                self.queue.push(job);
            }
            None => self.backoff.snooze(),
        }

        Ok(())
    }

    /// Writes the resolution of an owned position and answers everyone waiting on it.
    fn complete(&mut self, position: E::State, resolution: Resolution) -> Result<(), SolverError> {
        let dependents = self.table.settle(position.clone(), resolution)?;
        self.stats.positions_resolved += 1;

        for Dependent { origin, job_id } in dependents {
            self.queue.push(Job::SendBack {
                position: position.clone(),
                resolution,
                origin,
                job_id,
            });
        }

        Ok(())
    }

    fn send(&mut self, to: Rank, job: &Job<E::State>) -> Result<(), SolverError> {
        self.transport.send(to, job)?;
        self.stats.messages_sent += 1;

        Ok(())
    }

    fn log_progress(&self) {
        if self.stats_interval == 0 {
            return;
        }

        let jobs = self.stats.jobs();
        if jobs > 0 && jobs % self.stats_interval == 0 {
            info!(
                "Rank {} progress. Jobs: {}, Resolved: {}, Pending: {}, Queued: {}",
                self.rank,
                jobs,
                self.table.resolved_len(),
                self.table.pending_len(),
                self.queue.len()
            );
        }
    }
}
