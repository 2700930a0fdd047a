use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::node::Node;
use crate::traits::SearchObserver;

/// Lifecycle state of a search algorithm instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No search has run since construction or the last stats reset.
    #[default]
    Idle,
    /// A search is in progress.
    Running,
    /// The goal was dequeued; a path was returned.
    Found,
    /// The frontier ran dry without reaching the goal.
    NotFound,
    /// The stop token was cleared before the search completed.
    Cancelled,
    /// The search reached the goal but its parent links were inconsistent; the call returned
    /// [`SearchError::BrokenParentChain`](crate::SearchError::BrokenParentChain).
    Failed,
}

/// Statistics describing one search run.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    visited: usize,
    elapsed: Duration,
    outcome: Outcome,
    path_node_count: usize,
    path_cost: f64,
}

impl SearchStats {
    /// Number of visits: nodes finalized, plus cells jumped over for jump point search.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Time spent inside the search call, progress hook included.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// How the run ended.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Number of nodes in the returned path; zero unless the goal was found.
    pub fn path_node_count(&self) -> usize {
        self.path_node_count
    }

    /// Accumulated edge cost of the returned path; zero unless the goal was found.
    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }
}

/// Cooperative cancellation signal.
///
/// The token holds the "running" flag of a search. A search raises it on entry and lowers it on
/// exit; anything holding a clone (another thread, a timer, the progress hook) can lower it early
/// with [`request_stop`](Self::request_stop). Algorithms poll it once per expansion and once per
/// relaxed neighbor, so a stop takes effect at the next such point.
#[derive(Clone, Debug, Default)]
pub struct StopToken {
    running: Arc<AtomicBool>,
}

impl StopToken {
    /// Creates a token in the stopped state.
    pub fn new() -> Self {
        StopToken::default()
    }

    /// Lowers the running flag.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether the running flag is raised.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn start(&self) {
        self.running.store(true, Ordering::Release);
    }
}

/// Bookkeeping shared by the search algorithms: visit counting, progress notification, timing,
/// the stop token, and the final statistics.
pub struct Instrumentation<'a> {
    algorithm: &'static str,
    stats: SearchStats,
    stop: StopToken,
    observer: Option<Box<dyn SearchObserver + 'a>>,
    started: Option<Instant>,
}

impl<'a> Instrumentation<'a> {
    /// Creates idle instrumentation for the named algorithm. The name is only used in log output.
    pub fn new(algorithm: &'static str) -> Self {
        Instrumentation {
            algorithm,
            stats: SearchStats::default(),
            stop: StopToken::new(),
            observer: None,
            started: None,
        }
    }

    /// Installs the progress hook.
    pub fn set_observer(&mut self, observer: impl SearchObserver + 'a) {
        self.observer = Some(Box::new(observer));
    }

    /// Replaces the stop token, e.g. with a clone held by another thread.
    pub fn set_stop_token(&mut self, stop: StopToken) {
        self.stop = stop;
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The stop token polled by [`is_running`](Self::is_running).
    pub fn stop_token(&self) -> &StopToken {
        &self.stop
    }

    /// Clears statistics back to [`Outcome::Idle`].
    pub fn reset(&mut self) {
        self.stats = SearchStats::default();
        self.started = None;
    }

    /// Starts a run: clears the previous statistics, raises the running flag and starts the clock.
    pub fn begin(&mut self) {
        self.reset();
        self.stats.outcome = Outcome::Running;
        self.stop.start();
        self.started = Some(Instant::now());
        debug!("{} started", self.algorithm);
    }

    /// Whether the current run should keep going.
    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }

    /// Records one visit and notifies the progress hook.
    #[inline]
    pub fn visit(&mut self, current: &Node, start: &Node, end: &Node) {
        self.stats.visited += 1;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_visit(current, start, end);
        }
    }

    /// Ends the run with a path of `path_node_count` nodes costing `path_cost`.
    pub fn finish_found(&mut self, path_node_count: usize, path_cost: f64) {
        self.stats.path_node_count = path_node_count;
        self.stats.path_cost = path_cost;
        self.finish(Outcome::Found);
    }

    /// Ends the run without a path.
    pub fn finish(&mut self, outcome: Outcome) {
        debug_assert!(outcome != Outcome::Running && outcome != Outcome::Idle);
        if outcome != Outcome::Found {
            self.stats.path_node_count = 0;
            self.stats.path_cost = 0.0;
        }
        self.stats.outcome = outcome;
        if let Some(started) = self.started.take() {
            self.stats.elapsed = started.elapsed();
        }
        self.stop.request_stop();
        debug!(
            "{} finished: {:?}, {} visited, cost {:.3}, {:.3} ms",
            self.algorithm,
            outcome,
            self.stats.visited,
            self.stats.path_cost,
            self.stats.elapsed.as_secs_f64() * 1000.0,
        );
    }
}
