//! Callable targets available to scenarios
//!
//! Scenarios refer to callables by name. Plain targets are free functions,
//! bound targets are methods of [`Enemy`] written as `"<enemy>.<method>"`.
//! Every target writes what it did to the shared [`Transcript`] that is passed
//! along with the amount on each invoke.

use multicast_event::Dispatcher;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// The event type driven by scenarios: an amount plus the output transcript
pub type DamageEvent = Dispatcher<(i32, Rc<Transcript>)>;

/// Plain callable shape of [`DamageEvent`]
pub type PlainTarget = fn(i32, Rc<Transcript>);

/// Bound method shape of [`DamageEvent`]
pub type EnemyMethod = fn(&mut Enemy, i32, Rc<Transcript>);

/// Append-only log of everything the targets did
#[derive(Debug, Default)]
pub struct Transcript {
    lines: RefCell<Vec<String>>,
}

impl Transcript {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn record(&self, line: impl Into<String>) {
        self.lines.borrow_mut().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

pub fn print_num(n: i32, out: Rc<Transcript>) {
    out.record(n.to_string());
}

pub fn print_double(n: i32, out: Rc<Transcript>) {
    out.record(format!("{} doubled is {}", n, n.saturating_mul(2)));
}

pub fn print_negated(n: i32, out: Rc<Transcript>) {
    out.record(format!("{} negated is {}", n, n.saturating_neg()));
}

/// Look up a plain target by name
pub fn plain_target(name: &str) -> Option<PlainTarget> {
    match name {
        "print_num" => Some(print_num as PlainTarget),
        "print_double" => Some(print_double as PlainTarget),
        "print_negated" => Some(print_negated as PlainTarget),
        _ => None,
    }
}

/// A scenario participant whose methods can be bound to the event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enemy {
    pub name: String,
    pub health: i32,
}

impl Enemy {
    pub fn new(name: impl Into<String>, health: i32) -> Self {
        Self {
            name: name.into(),
            health,
        }
    }

    pub fn take_damage(&mut self, amount: i32, out: Rc<Transcript>) {
        self.health = self.health.saturating_sub(amount).max(0);
        out.record(format!(
            "{} takes {} damage, health {}",
            self.name, amount, self.health
        ));
    }

    pub fn heal(&mut self, amount: i32, out: Rc<Transcript>) {
        self.health = self.health.saturating_add(amount);
        out.record(format!("{} heals {}, health {}", self.name, amount, self.health));
    }
}

/// Look up an enemy method by name
pub fn enemy_method(name: &str) -> Option<EnemyMethod> {
    match name {
        "take_damage" => Some(Enemy::take_damage as EnemyMethod),
        "heal" => Some(Enemy::heal as EnemyMethod),
        _ => None,
    }
}

/// A parsed target reference from a scenario step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef<'a> {
    Plain(&'a str),
    Method { enemy: &'a str, method: &'a str },
}

impl<'a> TargetRef<'a> {
    pub fn parse(target: &'a str) -> Self {
        match target.split_once('.') {
            Some((enemy, method)) => TargetRef::Method { enemy, method },
            None => TargetRef::Plain(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_ref_parse() {
        assert_eq!(TargetRef::parse("print_num"), TargetRef::Plain("print_num"));
        assert_eq!(
            TargetRef::parse("goblin.take_damage"),
            TargetRef::Method {
                enemy: "goblin",
                method: "take_damage"
            }
        );
    }

    #[test]
    fn test_lookup_tables() {
        assert!(plain_target("print_num").is_some());
        assert!(plain_target("take_damage").is_none());
        assert!(enemy_method("heal").is_some());
        assert!(enemy_method("print_num").is_none());
    }

    #[test]
    fn test_enemy_health_floors_at_zero() {
        let out = Transcript::new();
        let mut enemy = Enemy::new("goblin", 30);
        enemy.take_damage(50, out.clone());
        assert_eq!(enemy.health, 0);
        enemy.heal(5, out.clone());
        assert_eq!(enemy.health, 5);
        assert_eq!(
            out.lines(),
            vec!["goblin takes 50 damage, health 0", "goblin heals 5, health 5"]
        );
    }
}
