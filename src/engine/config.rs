use crate::engine::snapshot::Mode;

/// Tunables of the assignment engine. `Default` is the production setting.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub epochs: usize,
    /// Always commits and produces the returned snapshot.
    pub final_commit_epoch: usize,
    /// Extra commit under chaos; recorded but not returned.
    pub chaos_commit_epoch: usize,
    /// Epoch whose rewards see inflated costs under chaos.
    pub chaos_surge_epoch: usize,
    pub chaos_multiplier: f64,
    /// Learning rate.
    pub alpha: f64,
    /// Discount.
    pub gamma: f64,
    /// Exploration probability.
    pub epsilon: f64,
    pub valid_reward_base: f64,
    pub cost_scale: f64,
    pub invalid_penalty: f64,
    /// Committed events costing more than this are not counted as recovered.
    pub recovery_threshold: f64,
}

impl EngineConfig {
    pub const EPOCHS: usize = 20;
    pub const FINAL_COMMIT_EPOCH: usize = 19;
    pub const CHAOS_COMMIT_EPOCH: usize = 11;
    pub const CHAOS_SURGE_EPOCH: usize = 10;
    pub const CHAOS_MULTIPLIER: f64 = 1.2;
    pub const RECOVERY_THRESHOLD: f64 = 500.0;

    pub fn is_commit_epoch(&self, epoch: usize, mode: Mode) -> bool {
        epoch == self.final_commit_epoch
            || (mode == Mode::Chaos && epoch == self.chaos_commit_epoch)
    }

    /// Cost multiplier applied to rewards during `epoch`.
    pub fn reward_multiplier(&self, epoch: usize, mode: Mode) -> f64 {
        if mode == Mode::Chaos && epoch == self.chaos_surge_epoch {
            self.chaos_multiplier
        } else {
            1.0
        }
    }

    /// Cost multiplier applied to events committed at `epoch`.
    pub fn commit_multiplier(&self, epoch: usize, mode: Mode) -> f64 {
        if mode == Mode::Chaos && epoch == self.chaos_commit_epoch {
            self.chaos_multiplier
        } else {
            1.0
        }
    }

    pub fn reward(&self, valid: bool, cost: f64) -> f64 {
        if valid {
            self.valid_reward_base - cost / self.cost_scale
        } else {
            self.invalid_penalty
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            epochs: Self::EPOCHS,
            final_commit_epoch: Self::FINAL_COMMIT_EPOCH,
            chaos_commit_epoch: Self::CHAOS_COMMIT_EPOCH,
            chaos_surge_epoch: Self::CHAOS_SURGE_EPOCH,
            chaos_multiplier: Self::CHAOS_MULTIPLIER,
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            valid_reward_base: 100.0,
            cost_scale: 100.0,
            invalid_penalty: -100.0,
            recovery_threshold: Self::RECOVERY_THRESHOLD,
        }
    }
}

/// Per-request switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunParams {
    pub chaos: bool,
    pub respect_pre_assignments: bool,
    /// Allow connecting legs to be flown by different tails.
    pub break_trips: bool,
}

impl RunParams {
    pub fn normal() -> RunParams {
        RunParams::default()
    }

    pub fn chaos() -> RunParams {
        RunParams {
            chaos: true,
            ..RunParams::default()
        }
    }

    pub fn mode(&self) -> Mode {
        if self.chaos { Mode::Chaos } else { Mode::Normal }
    }
}

impl Default for RunParams {
    fn default() -> Self {
        RunParams {
            chaos: false,
            respect_pre_assignments: true,
            break_trips: false,
        }
    }
}
