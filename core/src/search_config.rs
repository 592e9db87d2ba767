use std::time::Duration;

/// Configuration shared by the searchers
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Wall-clock budget; a search past it reports `TimedOut`
    pub time_budget: Duration,
    /// Maximum entries in the IDA* transposition cache
    pub transposition_capacity: u64,
    /// How long a transposition entry stays usable
    pub transposition_ttl: Duration,
    /// Speed-over-completeness pruning for IDA*, off by default
    pub pruning: PruningPolicy,
    /// Bidirectional IDA* gives up (and falls back to IDA*) past this threshold
    pub threshold_ceiling: u32,
    /// Bidirectional IDA* gives up (and falls back to IDA*) after this many iterations
    pub max_iterations: u32,
}

impl SearchConfig {
    pub fn new(time_budget: Duration) -> Self {
        Self {
            time_budget,
            ..Self::default()
        }
    }

    pub fn with_pruning(mut self, pruning: PruningPolicy) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_threshold_ceiling(mut self, threshold_ceiling: u32) -> Self {
        self.threshold_ceiling = threshold_ceiling;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(60),
            transposition_capacity: 10_000,
            transposition_ttl: Duration::from_secs(30),
            pruning: PruningPolicy::default(),
            threshold_ceiling: 100,
            max_iterations: 1_000,
        }
    }
}

/// Heuristic branch pruning for IDA*.
///
/// Anything this policy cuts is beyond what the `f <= threshold` test already
/// cuts, so enabling it can lose optimality or miss solutions.
#[derive(Debug, Clone, PartialEq)]
pub struct PruningPolicy {
    pub enabled: bool,
    /// Skip a child whose `f` exceeds `threshold * margin`
    pub margin: f64,
    /// Depth from which the depth-scaled check applies
    pub min_depth: u32,
    /// Drop a node at depth `d >= min_depth` whose `f` exceeds `d * depth_factor`
    pub depth_factor: u32,
}

impl PruningPolicy {
    pub fn aggressive() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub(crate) fn prunes_child(&self, f: u32, threshold: u32) -> bool {
        self.enabled && f64::from(f) > f64::from(threshold) * self.margin
    }

    pub(crate) fn prunes_branch(&self, f: u32, depth: u32) -> bool {
        self.enabled && depth >= self.min_depth && f > depth.saturating_mul(self.depth_factor)
    }
}

impl Default for PruningPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            margin: 1.5,
            min_depth: 5,
            depth_factor: 6,
        }
    }
}
