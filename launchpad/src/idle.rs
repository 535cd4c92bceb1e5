use crate::catalog::{select_demo_scenario, ScenarioCatalog};
use crate::config::DemoConfig;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// Unattended-mode state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleState {
    /// Demo mode off, or the dialog is not visible
    Disabled,
    /// Watching for the idle threshold
    Armed,
    /// Picking a scenario; only observable from inside `tick`
    Firing,
}

/// Launches a random demo scenario after a period without user input
pub struct IdleController {
    enabled: bool,
    threshold: Duration,
    state: IdleState,
    last_input: Instant,
    rng: StdRng,
}

impl IdleController {
    /// Period of the idle check timer
    pub const TICK_PERIOD: Duration = Duration::from_secs(1);

    pub fn new(enabled: bool, threshold: Duration, seed: u64, now: Instant) -> Self {
        Self {
            enabled,
            threshold,
            state: IdleState::Disabled,
            last_input: now,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &DemoConfig, seed: u64, now: Instant) -> Self {
        Self::new(config.enabled, Duration::from_secs(config.idle_seconds), seed, now)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> IdleState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == IdleState::Armed
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Dialog became visible. Returns true if the caller should start the
    /// tick timer (it was not already running).
    pub fn arm(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }

        self.last_input = now;
        let was_running = self.state != IdleState::Disabled;
        self.state = IdleState::Armed;
        if !was_running {
            debug!("Idle timer armed, threshold {:?}", self.threshold);
        }
        !was_running
    }

    /// Dialog hidden or destroyed. Returns true if a running timer must be
    /// stopped.
    pub fn disarm(&mut self) -> bool {
        let was_running = self.state != IdleState::Disabled;
        self.state = IdleState::Disabled;
        was_running
    }

    /// Mouse movement or key press
    pub fn note_input(&mut self, now: Instant) {
        if self.enabled {
            self.last_input = now;
        }
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_input)
    }

    /// Periodic check. Once the threshold has passed, picks a demo scenario
    /// from the catalog and returns it for launch. The controller re-arms
    /// either way, so the next attempt waits another full threshold.
    pub fn tick<C>(&mut self, now: Instant, catalog: &mut C) -> Option<String>
    where
        C: ScenarioCatalog + ?Sized,
    {
        if self.state != IdleState::Armed || self.idle_for(now) < self.threshold {
            return None;
        }

        self.state = IdleState::Firing;
        let picked = select_demo_scenario(catalog, &mut self.rng);
        if picked.is_none() {
            info!("No demo scenario available, waiting another {:?}", self.threshold);
        }

        self.state = IdleState::Armed;
        self.last_input = now;
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScenarioTree;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn demo_tree() -> ScenarioTree {
        let mut tree = ScenarioTree::new();
        let demo = tree.add_root("Demo");
        tree.add_child(demo, "Orbit");
        tree
    }

    #[test]
    fn test_disabled_controller_never_fires() {
        let t0 = Instant::now();
        let mut idle = IdleController::new(false, secs(5), 1, t0);
        let mut tree = demo_tree();

        assert!(!idle.arm(t0));
        assert_eq!(idle.state(), IdleState::Disabled);
        assert_eq!(idle.tick(t0 + secs(60), &mut tree), None);
    }

    #[test]
    fn test_fires_after_threshold() {
        let t0 = Instant::now();
        let mut idle = IdleController::new(true, secs(5), 1, t0);
        let mut tree = demo_tree();

        assert!(idle.arm(t0));
        assert_eq!(idle.tick(t0 + secs(4), &mut tree), None);
        assert_eq!(idle.tick(t0 + secs(5), &mut tree), Some("Orbit".to_string()));
        assert!(idle.is_armed());
    }

    #[test]
    fn test_input_resets_idle_clock() {
        let t0 = Instant::now();
        let mut idle = IdleController::new(true, secs(5), 1, t0);
        let mut tree = demo_tree();
        idle.arm(t0);

        idle.note_input(t0 + secs(4));
        assert_eq!(idle.tick(t0 + secs(8), &mut tree), None);
        assert!(idle.is_armed());
        assert!(idle.tick(t0 + secs(9), &mut tree).is_some());
    }

    #[test]
    fn test_rearms_after_failed_selection() {
        let t0 = Instant::now();
        let mut idle = IdleController::new(true, secs(5), 1, t0);
        let mut tree = ScenarioTree::new();
        tree.add_root("Tutorials");
        idle.arm(t0);

        assert_eq!(idle.tick(t0 + secs(5), &mut tree), None);
        assert!(idle.is_armed());

        // Next attempt only after another full interval
        let demo = tree.add_root("Demo");
        tree.add_child(demo, "Late");
        assert_eq!(idle.tick(t0 + secs(9), &mut tree), None);
        assert_eq!(idle.tick(t0 + secs(10), &mut tree), Some("Late".to_string()));
    }

    #[test]
    fn test_disarm_stops_firing() {
        let t0 = Instant::now();
        let mut idle = IdleController::new(true, secs(5), 1, t0);
        let mut tree = demo_tree();

        idle.arm(t0);
        assert!(idle.disarm());
        assert!(!idle.disarm());
        assert_eq!(idle.tick(t0 + secs(30), &mut tree), None);

        // Showing again restarts the clock
        assert!(idle.arm(t0 + secs(30)));
        assert!(!idle.arm(t0 + secs(31)));
        assert_eq!(idle.tick(t0 + secs(35), &mut tree), None);
        assert!(idle.tick(t0 + secs(36), &mut tree).is_some());
    }

    #[test]
    fn test_same_seed_same_picks() {
        let t0 = Instant::now();
        let mut tree = ScenarioTree::new();
        let demo = tree.add_root("Demo");
        for name in ["A", "B", "C", "D"] {
            tree.add_child(demo, name);
        }

        let run = |tree: &mut ScenarioTree| {
            let mut idle = IdleController::new(true, secs(1), 42, t0);
            idle.arm(t0);
            (1..=10)
                .map(|i| idle.tick(t0 + secs(i), tree).unwrap())
                .collect::<Vec<_>>()
        };

        let first = run(&mut tree);
        let second = run(&mut tree);
        assert_eq!(first, second);
    }
}
