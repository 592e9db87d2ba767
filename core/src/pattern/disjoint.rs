use super::partition::validate_partitions;
use super::storage::partition_path;
use super::{BuildMethod, PartitionScheme, PatternConfig, PatternDatabase, PatternHeuristic};
use crate::error::{PuzzleError, Result};
use crate::heuristic::manhattan_for_tiles;
use crate::puzzle::Board;
use crossbeam_channel::RecvTimeoutError;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// One tile subset of a disjoint composite. A partition whose build failed
/// or timed out has no table and contributes its Manhattan sum instead.
#[derive(Debug, Clone)]
pub struct PartitionTable {
    tiles: Vec<u8>,
    database: Option<PatternDatabase>,
}

impl PartitionTable {
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn database(&self) -> Option<&PatternDatabase> {
        self.database.as_ref()
    }

    pub fn is_degraded(&self) -> bool {
        self.database.is_none()
    }

    fn lookup(&self, board: &Board, goal: &Board) -> Result<u32> {
        match &self.database {
            Some(database) => database.lookup(board),
            None => Ok(manhattan_for_tiles(board, goal, &self.tiles)),
        }
    }
}

/// Sum of per-partition pattern distances over disjoint tile subsets.
#[derive(Debug, Clone)]
pub struct DisjointPatternDatabase {
    goal: Board,
    partitions: Vec<PartitionTable>,
}

impl DisjointPatternDatabase {
    pub fn build(
        goal: &Board,
        partitions: &[Vec<u8>],
        method: BuildMethod,
        config: &PatternConfig,
    ) -> Result<Self> {
        validate_partitions(goal.dimension(), partitions)?;
        let goal_board = *goal;
        let tables = build_partitions(partitions, config, move |_, tiles, config| {
            PatternDatabase::build(&goal_board, tiles, method, config)
        })?;
        Ok(Self::assemble(goal, partitions, tables))
    }

    pub fn from_scheme(
        goal: &Board,
        scheme: PartitionScheme,
        method: BuildMethod,
        config: &PatternConfig,
    ) -> Result<Self> {
        if scheme.dimension() != goal.dimension() {
            return Err(PuzzleError::DimensionMismatch {
                expected: scheme.dimension(),
                actual: goal.dimension(),
            });
        }
        Self::build(goal, &scheme.partitions(), method, config)
    }

    /// Like [`build`](Self::build), but each partition is first looked up in
    /// `<prefix>_<index>.pdb` and written there after a rebuild.
    pub fn load_or_build(
        prefix: &Path,
        goal: &Board,
        partitions: &[Vec<u8>],
        method: BuildMethod,
        config: &PatternConfig,
    ) -> Result<Self> {
        validate_partitions(goal.dimension(), partitions)?;
        let goal_board = *goal;
        let prefix = prefix.to_path_buf();
        let tables = build_partitions(partitions, config, move |index, tiles, config| {
            let path = partition_path(&prefix, index);
            PatternDatabase::load_or_build(&path, &goal_board, tiles, method, config)
        })?;
        Ok(Self::assemble(goal, partitions, tables))
    }

    fn assemble(goal: &Board, partitions: &[Vec<u8>], tables: Vec<Option<PatternDatabase>>) -> Self {
        let partitions: Vec<PartitionTable> = partitions
            .iter()
            .zip(tables)
            .map(|(tiles, database)| PartitionTable {
                tiles: tiles.clone(),
                database,
            })
            .collect();

        let degraded = partitions.iter().filter(|p| p.is_degraded()).count();
        info!(
            partitions = partitions.len(),
            degraded,
            entries = partitions.iter().filter_map(|p| p.database()).map(|d| d.len()).sum::<usize>(),
            "disjoint pattern database ready"
        );

        Self {
            goal: *goal,
            partitions,
        }
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn partitions(&self) -> &[PartitionTable] {
        &self.partitions
    }

    /// Every partition has a table and every table was built to completion.
    pub fn is_exact(&self) -> bool {
        self.partitions
            .iter()
            .all(|partition| partition.database().is_some_and(|d| d.stats().complete))
    }

    /// Indices of partitions running on their Manhattan fallback.
    pub fn degraded_partitions(&self) -> Vec<usize> {
        self.partitions
            .iter()
            .enumerate()
            .filter(|(_, partition)| partition.is_degraded())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn lookup(&self, board: &Board) -> Result<u32> {
        if board.dimension() != self.goal.dimension() {
            return Err(PuzzleError::DimensionMismatch {
                expected: self.goal.dimension(),
                actual: board.dimension(),
            });
        }
        self.partitions
            .iter()
            .map(|partition| partition.lookup(board, &self.goal))
            .sum()
    }
}

impl PatternHeuristic for DisjointPatternDatabase {
    fn goal(&self) -> &Board {
        &self.goal
    }

    fn lookup(&self, board: &Board) -> Result<u32> {
        DisjointPatternDatabase::lookup(self, board)
    }

    fn describe(&self) -> String {
        let tiles: Vec<&[u8]> = self.partitions.iter().map(|p| p.tiles()).collect();
        format!("disjoint pattern {tiles:?}")
    }
}

/// Runs `build_one` for every partition and collects the tables by index.
/// Failures, panics and timeouts leave `None` in that slot. Pooled builds
/// still running when a wait times out see their config cancelled.
fn build_partitions<F>(
    partitions: &[Vec<u8>],
    config: &PatternConfig,
    build_one: F,
) -> Result<Vec<Option<PatternDatabase>>>
where
    F: Fn(usize, &[u8], &PatternConfig) -> Result<PatternDatabase> + Send + Sync + 'static,
{
    let mut tables: Vec<Option<PatternDatabase>> = partitions.iter().map(|_| None).collect();

    if !config.parallel || partitions.len() < 2 {
        for (index, tiles) in partitions.iter().enumerate() {
            match guarded(&build_one, index, tiles, config) {
                Ok(database) => tables[index] = Some(database),
                Err(error) => warn!(index, %error, "partition build failed, using Manhattan"),
            }
        }
        return Ok(tables);
    }

    let workers = match config.workers {
        0 => partitions.len(),
        n => n,
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("pdb-build-{i}"))
        .build()
        .map_err(|error| PuzzleError::ThreadPool(error.to_string()))?;

    let abandon = Arc::new(AtomicBool::new(false));
    let build_config = config.clone().with_cancel_flag(Arc::clone(&abandon));
    let build_one = Arc::new(build_one);
    let (sender, receiver) = crossbeam_channel::unbounded();
    for (index, tiles) in partitions.iter().enumerate() {
        let sender = sender.clone();
        let build_one = Arc::clone(&build_one);
        let build_config = build_config.clone();
        let tiles = tiles.clone();
        pool.spawn(move || {
            let result = guarded(build_one.as_ref(), index, &tiles, &build_config);
            let _ = sender.send((index, result));
        });
    }
    drop(sender);

    for _ in 0..partitions.len() {
        match receiver.recv_timeout(config.build_timeout) {
            Ok((index, Ok(database))) => tables[index] = Some(database),
            Ok((index, Err(error))) => warn!(index, %error, "partition build failed, using Manhattan"),
            Err(RecvTimeoutError::Timeout) => {
                let pending: Vec<usize> = (0..tables.len()).filter(|&i| tables[i].is_none()).collect();
                warn!(?pending, timeout_s = config.build_timeout.as_secs(), "partition builds timed out, using Manhattan");
                abandon.store(true, Ordering::Relaxed);
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(tables)
}

/// Runs one partition build, turning a panic into `BuildFailed`.
fn guarded<F>(build_one: &F, index: usize, tiles: &[u8], config: &PatternConfig) -> Result<PatternDatabase>
where
    F: Fn(usize, &[u8], &PatternConfig) -> Result<PatternDatabase>,
{
    panic::catch_unwind(AssertUnwindSafe(|| build_one(index, tiles, config)))
        .unwrap_or_else(|_| Err(PuzzleError::BuildFailed(format!("build of {tiles:?} panicked"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn timed_out_builds_see_cancellation() {
        let partitions = vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]];
        let config = PatternConfig::default().with_build_timeout(Duration::from_millis(50));
        let (stopped, observed) = crossbeam_channel::unbounded();

        let tables = build_partitions(&partitions, &config, move |index, _, config| {
            let started = Instant::now();
            while !config.is_cancelled() && started.elapsed() < Duration::from_secs(30) {
                std::thread::sleep(Duration::from_millis(5));
            }
            let _ = stopped.send((index, config.is_cancelled()));
            Err(PuzzleError::BuildFailed("abandoned".into()))
        })
        .unwrap();

        assert!(tables.iter().all(Option::is_none));
        for _ in 0..partitions.len() {
            let (_, cancelled) = observed.recv_timeout(Duration::from_secs(10)).unwrap();
            assert!(cancelled);
        }
        assert!(!config.is_cancelled());
    }

    #[test]
    fn sequential_builds_share_the_callers_config() {
        let partitions = vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]];
        let flag = Arc::new(AtomicBool::new(true));
        let config = PatternConfig::default().sequential().with_cancel_flag(flag);
        let goal = Board::goal(3).unwrap();

        let tables = build_partitions(&partitions, &config, move |_, tiles, config| {
            PatternDatabase::build(&goal, tiles, BuildMethod::Bfs, config)
        })
        .unwrap();
        assert!(tables.iter().all(Option::is_none));
    }
}
