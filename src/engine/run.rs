use crate::engine::assignment::Assignment;
use crate::engine::config::{EngineConfig, RunParams};
use crate::engine::cost;
use crate::engine::oracle;
use crate::engine::policy::{AssignmentPolicy, ValueTable};
use crate::engine::snapshot::ResultSnapshot;
use crate::error::EngineError;
use crate::flight::Flight;
use crate::recorder::SnapshotRecorder;
use crate::roster::Roster;
use rand::Rng;
use tracing::{debug, info, trace};

/// What a run leaves behind: the final snapshot and the learned table.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub snapshot: ResultSnapshot,
    pub table: ValueTable,
}

/// Epoch-driven tail assignment over one roster.
///
/// The engine borrows its roster and owns nothing mutable between runs; every
/// call to [`AssignmentEngine::run`] builds a fresh value table and fresh
/// assignment state.
pub struct AssignmentEngine<'a> {
    roster: &'a Roster,
    config: EngineConfig,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self::with_config(roster, EngineConfig::default())
    }

    pub fn with_config(roster: &'a Roster, config: EngineConfig) -> Self {
        AssignmentEngine { roster, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs every epoch and returns the final commit.
    ///
    /// Each commit is handed to `recorder` as it happens, so under chaos the
    /// recorder sees the mid-run snapshot as well as the returned one.
    pub fn run<R: Rng, S: SnapshotRecorder + ?Sized>(
        &self,
        params: RunParams,
        rng: &mut R,
        recorder: &mut S,
    ) -> Result<RunOutcome, EngineError> {
        let flights = self.roster.flights();
        let tails = self.roster.aircraft();
        if flights.is_empty() {
            return Err(EngineError::NoFlights);
        }
        if tails.is_empty() {
            return Err(EngineError::NoAircraft);
        }

        let mode = params.mode();
        info!(
            %mode,
            flights = flights.len(),
            aircraft = tails.len(),
            respect_pre_assignments = params.respect_pre_assignments,
            break_trips = params.break_trips,
            "starting assignment run"
        );

        let cfg = &self.config;
        let mut policy = AssignmentPolicy::new(
            flights.len(),
            tails.len(),
            cfg.alpha,
            cfg.gamma,
            cfg.epsilon,
        );
        let mut committed = Assignment::new();
        let mut working = Assignment::new();
        let mut last = None;

        for epoch in 0..cfg.epochs {
            working.clone_from(&committed);
            let multiplier = cfg.reward_multiplier(epoch, mode);
            let mut valid_steps = 0;

            for (slot, flight) in flights.iter().enumerate() {
                let action = policy.select(slot, rng);
                let valid = self.is_valid(flight, action, &working, params)?;
                let carbon = cost::carbon(flight, &tails[action])? * multiplier;
                let reward = cfg.reward(valid, carbon);
                if valid {
                    working.insert(flight.id.clone(), tails[action].id.clone());
                    valid_steps += 1;
                }
                trace!(epoch, slot, tail = %tails[action].id, valid, reward, "step");
                policy.update(slot, action, reward);
            }

            debug!(epoch, valid_steps, assigned = working.len(), "epoch complete");

            if cfg.is_commit_epoch(epoch, mode) {
                committed = working.clone();
                let snapshot = ResultSnapshot::commit(
                    self.roster,
                    committed.clone(),
                    mode,
                    cfg.commit_multiplier(epoch, mode),
                    cfg.recovery_threshold,
                )?;
                info!(
                    epoch,
                    %mode,
                    committed = snapshot.assignments.len(),
                    chaos_recovered = snapshot.chaos_recovered,
                    "committed assignments"
                );
                recorder.record(&snapshot)?;
                last = Some(snapshot);
            }
        }

        // A config whose commit epochs fall outside the run commits its last epoch.
        let snapshot = match last {
            Some(s) => s,
            None => {
                let s = ResultSnapshot::commit(
                    self.roster,
                    working,
                    mode,
                    1.0,
                    cfg.recovery_threshold,
                )?;
                recorder.record(&s)?;
                s
            }
        };

        Ok(RunOutcome {
            snapshot,
            table: policy.into_table(),
        })
    }

    /// Subtype, capacity, availability and, unless trips may be split, the
    /// onward leg's tail. Onward links were resolved when the roster was
    /// built; a leg outside this roster never enters `working`.
    fn is_valid(
        &self,
        flight: &Flight,
        action: usize,
        working: &Assignment,
        params: RunParams,
    ) -> Result<bool, EngineError> {
        let aircraft = &self.roster.aircraft()[action];
        let mut valid = aircraft.fits(&flight.subtype, flight.min_seating_capacity)
            && oracle::is_available(
                &aircraft.id,
                flight,
                working,
                self.roster,
                params.respect_pre_assignments,
            )?;

        if !params.break_trips {
            if let Some(onward) = &flight.onward_flight {
                if let Some(onward_tail) = working.tail_of(onward) {
                    valid = valid && *onward_tail == aircraft.id;
                }
            }
        }
        Ok(valid)
    }
}
