//! Scenario execution
//!
//! Replays the steps of a [`ScenarioConfig`] against a single [`DamageEvent`].
//! Enemies are owned by the runner as `Rc<RefCell<Enemy>>`; the dispatcher only
//! ever sees weak references to them, so `drop_enemy` leaves expired entries
//! behind unless the scenario detaches first.

use crate::config::{ScenarioConfig, StepConfig};
use crate::targets::{self, DamageEvent, Enemy, TargetRef, Transcript};
use multicast_event::DispatcherStats;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Errors raised while setting up or replaying a scenario
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Unknown enemy: {0}")]
    UnknownEnemy(String),

    #[error("Unknown method '{method}' on enemy '{enemy}'")]
    UnknownMethod { enemy: String, method: String },

    #[error("Enemy declared twice: {0}")]
    DuplicateEnemy(String),

    #[error("Cannot create dispatcher: {0}")]
    Dispatcher(String),

    #[error("Step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: Box<ScenarioError>,
    },
}

/// Final state of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub label: Option<String>,
    pub output: Vec<String>,
    pub enemies: Vec<Enemy>,
    pub dropped: Vec<String>,
    pub stats: DispatcherStats,
}

enum Mutation {
    Attach,
    Detach,
    DetachAll,
}

pub struct ScenarioRunner {
    event: DamageEvent,
    enemies: Vec<Rc<RefCell<Enemy>>>,
    dropped: Vec<String>,
    transcript: Rc<Transcript>,
}

impl ScenarioRunner {
    /// Build the dispatcher and spawn the declared enemies
    pub fn new(scenario: &ScenarioConfig) -> Result<Self, ScenarioError> {
        let mut enemies: Vec<Rc<RefCell<Enemy>>> = Vec::with_capacity(scenario.enemies.len());
        for def in &scenario.enemies {
            if enemies.iter().any(|e| e.borrow().name == def.name) {
                return Err(ScenarioError::DuplicateEnemy(def.name.clone()));
            }
            enemies.push(Rc::new(RefCell::new(Enemy::new(&def.name, def.health))));
        }

        let event = DamageEvent::try_with_config(scenario.dispatcher.clone())
            .map_err(|e| ScenarioError::Dispatcher(e.to_string()))?;

        Ok(Self {
            event,
            enemies,
            dropped: Vec::new(),
            transcript: Transcript::new(),
        })
    }

    /// Replay every step, stopping at the first failure
    pub fn run(&mut self, steps: &[StepConfig]) -> Result<(), ScenarioError> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(step).map_err(|source| ScenarioError::Step {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    /// Apply a single step
    pub fn apply(&mut self, step: &StepConfig) -> Result<(), ScenarioError> {
        log::debug!("Applying step: {:?}", step);

        match step {
            StepConfig::Attach { target } => self.mutate(Mutation::Attach, target)?,
            StepConfig::Detach { target } => self.mutate(Mutation::Detach, target)?,
            StepConfig::DetachAll { target } => self.mutate(Mutation::DetachAll, target)?,
            StepConfig::Clear => {
                self.event.clear();
            }
            StepConfig::Invoke { value } => {
                self.event.invoke((*value, Rc::clone(&self.transcript)));
            }
            StepConfig::Prune => {
                let removed = self.event.prune_expired();
                log::info!("Pruned {} expired entries", removed);
            }
            StepConfig::DropEnemy { enemy } => {
                let index = self.enemy_index(enemy)?;
                let dropped = self.enemies.remove(index);
                self.dropped.push(dropped.borrow().name.clone());
            }
        }

        Ok(())
    }

    /// Snapshot of the run so far
    pub fn report(&self) -> ScenarioReport {
        ScenarioReport {
            label: self.event.label().map(str::to_string),
            output: self.transcript.lines(),
            enemies: self.enemies.iter().map(|e| e.borrow().clone()).collect(),
            dropped: self.dropped.clone(),
            stats: self.event.stats(),
        }
    }

    fn mutate(&mut self, mutation: Mutation, target: &str) -> Result<(), ScenarioError> {
        match TargetRef::parse(target) {
            TargetRef::Plain(name) => {
                let f = targets::plain_target(name)
                    .ok_or_else(|| ScenarioError::UnknownTarget(name.to_string()))?;
                match mutation {
                    Mutation::Attach => self.event.attach(f),
                    Mutation::Detach => self.event.detach(f),
                    Mutation::DetachAll => self.event.detach_all(f),
                };
            }
            TargetRef::Method { enemy, method } => {
                let object = Rc::clone(&self.enemies[self.enemy_index(enemy)?]);
                let m = targets::enemy_method(method).ok_or_else(|| ScenarioError::UnknownMethod {
                    enemy: enemy.to_string(),
                    method: method.to_string(),
                })?;
                match mutation {
                    Mutation::Attach => self.event.attach_method(&object, m),
                    Mutation::Detach => self.event.detach_method(&object, m),
                    Mutation::DetachAll => self.event.detach_all_method(&object, m),
                };
            }
        }
        Ok(())
    }

    fn enemy_index(&self, name: &str) -> Result<usize, ScenarioError> {
        self.enemies
            .iter()
            .position(|e| e.borrow().name == name)
            .ok_or_else(|| ScenarioError::UnknownEnemy(name.to_string()))
    }
}

/// Run a whole scenario and return its report
pub fn run_scenario(scenario: &ScenarioConfig) -> Result<ScenarioReport, ScenarioError> {
    log::info!(
        "Running scenario with {} enemies and {} steps",
        scenario.enemies.len(),
        scenario.steps.len()
    );
    let mut runner = ScenarioRunner::new(scenario)?;
    runner.run(&scenario.steps)?;
    Ok(runner.report())
}
