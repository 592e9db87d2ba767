use super::abstraction::{AbstractState, Pattern};
use super::{BuildMethod, BuildStats, MeetingPoint, PatternConfig};
use crate::error::{PuzzleError, Result};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::debug;

pub(crate) type DistanceTable = FxHashMap<u64, u8>;

struct Sweep {
    queue: VecDeque<(AbstractState, u8)>,
    depth: FxHashMap<u64, (u8, u8)>,
    processed: usize,
}

impl Sweep {
    fn new(roots: &[AbstractState]) -> Self {
        let mut queue = VecDeque::with_capacity(roots.len());
        let mut depth = FxHashMap::default();
        for (origin, root) in roots.iter().enumerate() {
            if depth.insert(root.key(), (0, origin as u8)).is_none() {
                queue.push_back((*root, origin as u8));
            }
        }
        Self {
            queue,
            depth,
            processed: 0,
        }
    }

    fn visit(&mut self, state: AbstractState, distance: u8, origin: u8) -> bool {
        if self.depth.contains_key(&state.key()) {
            return false;
        }
        self.depth.insert(state.key(), (distance, origin));
        self.queue.push_back((state, origin));
        true
    }

    fn distance(&self, key: u64) -> Option<u8> {
        self.depth.get(&key).map(|&(distance, _)| distance)
    }

    fn exhausted(&self, max_states: usize) -> bool {
        self.queue.is_empty() || self.processed >= max_states
    }

    /// Expands one whole level. Returns the first newly discovered state that
    /// `other` already holds.
    fn expand_level(
        &mut self,
        pattern: &Pattern,
        max_states: usize,
        other: Option<&Sweep>,
    ) -> Option<(u64, u8, u8)> {
        let mut meeting = None;
        for _ in 0..self.queue.len() {
            if self.processed >= max_states {
                break;
            }
            let Some((current, origin)) = self.queue.pop_front() else {
                break;
            };
            self.processed += 1;
            let next_distance = self.distance(current.key()).unwrap_or(0).saturating_add(1);

            for neighbor in pattern.neighbors(&current) {
                if !self.visit(neighbor, next_distance, origin) || meeting.is_some() {
                    continue;
                }
                if let Some(other_distance) = other.and_then(|o| o.distance(neighbor.key())) {
                    meeting = Some((neighbor.key(), next_distance, other_distance));
                }
            }
        }
        meeting
    }
}

pub(crate) fn breadth_first(pattern: &Pattern, config: &PatternConfig) -> Result<(DistanceTable, BuildStats)> {
    let timer = Instant::now();
    let mut sweep = Sweep::new(&[pattern.goal_state()]);

    while !sweep.exhausted(config.max_states) {
        ensure_running(config)?;
        sweep.expand_level(pattern, config.max_states, None);
    }

    let complete = sweep.queue.is_empty();
    let stats = BuildStats {
        method: BuildMethod::Bfs,
        states_processed: sweep.processed,
        complete,
        elapsed: timer.elapsed(),
        meeting: None,
    };
    Ok((into_table(sweep), stats))
}

/// Goal-side BFS alternating level by level with a BFS from strategic seeds.
///
/// The goal side runs to completion (or the cap) exactly as
/// [`breadth_first`] does, so the table is identical to the one-way build.
/// The seed side stops at the first meeting and contributes the
/// [`MeetingPoint`] and upper bounds `seed_depth + goal_distance(seed)`. By
/// the triangle inequality those bounds never undercut an exact BFS depth, so
/// the merge leaves every value unchanged and the seed levels are extra work,
/// not a speedup.
pub(crate) fn bidirectional(pattern: &Pattern, config: &PatternConfig) -> Result<(DistanceTable, BuildStats)> {
    let timer = Instant::now();
    let seeds = pattern.strategic_states(config.seed_count);
    let mut goal_side = Sweep::new(&[pattern.goal_state()]);
    let mut seed_side = Sweep::new(&seeds);
    let mut meeting: Option<MeetingPoint> = None;

    while !goal_side.exhausted(config.max_states) {
        ensure_running(config)?;
        let other = meeting.is_none().then_some(&seed_side);
        let touched = goal_side.expand_level(pattern, config.max_states, other);
        if meeting.is_none() {
            if let Some((key, goal_depth, seed_depth)) = touched {
                meeting = Some(MeetingPoint {
                    key,
                    goal_depth,
                    seed_depth,
                });
            } else if !seed_side.exhausted(config.max_states) {
                meeting = seed_side
                    .expand_level(pattern, config.max_states, Some(&goal_side))
                    .map(|(key, seed_depth, goal_depth)| MeetingPoint {
                        key,
                        goal_depth,
                        seed_depth,
                    });
            }
            if let Some(point) = meeting {
                debug!(
                    key = point.key,
                    goal_depth = point.goal_depth,
                    seed_depth = point.seed_depth,
                    "pattern sweeps met"
                );
            }
        }
    }

    let complete = goal_side.queue.is_empty();
    let states_processed = goal_side.processed + seed_side.processed;
    let mut table = into_table(goal_side);
    merge_seed_bounds(&mut table, &seed_side, &seeds);

    let stats = BuildStats {
        method: BuildMethod::Bidirectional,
        states_processed,
        complete,
        elapsed: timer.elapsed(),
        meeting,
    };
    Ok((table, stats))
}

fn ensure_running(config: &PatternConfig) -> Result<()> {
    if config.is_cancelled() {
        return Err(PuzzleError::BuildFailed("cancelled".into()));
    }
    Ok(())
}

/// Seed-side depths are distances from a seed, so they only bound goal
/// distances once the seed's own goal distance is known.
fn merge_seed_bounds(table: &mut DistanceTable, seed_side: &Sweep, seeds: &[AbstractState]) {
    let seed_goal_distance: Vec<Option<u8>> =
        seeds.iter().map(|seed| table.get(&seed.key()).copied()).collect();

    for (key, &(seed_depth, origin)) in &seed_side.depth {
        let Some(Some(anchor)) = seed_goal_distance.get(origin as usize) else {
            continue;
        };
        if let Some(exact) = table.get_mut(key) {
            *exact = (*exact).min(seed_depth.saturating_add(*anchor));
        }
    }
}

fn into_table(sweep: Sweep) -> DistanceTable {
    sweep
        .depth
        .into_iter()
        .map(|(key, (distance, _))| (key, distance))
        .collect()
}
