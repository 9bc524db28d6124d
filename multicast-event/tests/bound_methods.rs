// Bound method registration, identity and target lifetime
use multicast_event::{ByMut, ByRef, Dispatcher, DispatcherStats, EntryKind};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct Enemy {
    name: &'static str,
    health: i32,
    hits: Vec<i32>,
}

impl Enemy {
    fn spawn(name: &'static str, health: i32) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            name,
            health,
            hits: Vec::new(),
        }))
    }

    fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        self.hits.push(amount);
    }

    fn heal(&mut self, amount: i32) {
        self.health += amount;
    }
}

fn ignore(_: i32) {}

#[test]
fn same_method_on_two_objects_fires_independently() {
    let goblin = Enemy::spawn("goblin", 100);
    let orc = Enemy::spawn("orc", 200);

    let mut on_explosion = Dispatcher::<(i32,)>::new();
    on_explosion
        .attach_method(&goblin, Enemy::take_damage)
        .attach_method(&orc, Enemy::take_damage);

    on_explosion.invoke((25,));
    assert_eq!(goblin.borrow().health, 75);
    assert_eq!(orc.borrow().health, 175);

    assert!(on_explosion.contains_method(&goblin, Enemy::take_damage));
    assert!(on_explosion.contains_method(&orc, Enemy::take_damage));
}

#[test]
fn detach_method_needs_matching_object_and_method() {
    let goblin = Enemy::spawn("goblin", 100);
    let orc = Enemy::spawn("orc", 200);

    let mut event = Dispatcher::<(i32,)>::new();
    event
        .attach_method(&goblin, Enemy::take_damage)
        .attach_method(&orc, Enemy::take_damage);

    // Wrong method for goblin: nothing removed
    event.detach_method(&goblin, Enemy::heal);
    assert_eq!(event.len(), 2);

    event.detach_method(&goblin, Enemy::take_damage);
    assert_eq!(event.len(), 1);
    assert!(!event.contains_method(&goblin, Enemy::take_damage));

    event.invoke((10,));
    assert_eq!(goblin.borrow().health, 100);
    assert_eq!(orc.borrow().health, 190);
}

#[test]
fn detach_all_method_removes_every_duplicate() {
    let goblin = Enemy::spawn("goblin", 100);

    let mut event = Dispatcher::<(i32,)>::new();
    event
        .attach_method(&goblin, Enemy::take_damage)
        .attach_method(&goblin, Enemy::heal)
        .attach_method(&goblin, Enemy::take_damage);

    event.detach_all_method(&goblin, Enemy::take_damage);
    assert_eq!(event.len(), 1);

    event.invoke((5,));
    assert_eq!(goblin.borrow().health, 105);
    assert!(goblin.borrow().hits.is_empty());
}

#[test]
fn detach_method_removes_only_first_duplicate() {
    let goblin = Enemy::spawn("goblin", 100);
    let orc = Enemy::spawn("orc", 200);

    let mut event = Dispatcher::<(i32,)>::new();
    event
        .attach_method(&goblin, Enemy::take_damage)
        .attach_method(&orc, Enemy::take_damage)
        .attach_method(&goblin, Enemy::take_damage);

    event.detach_method(&goblin, Enemy::take_damage);
    assert_eq!(event.len(), 2);
    assert!(event.contains_method(&goblin, Enemy::take_damage));

    // The surviving goblin entry now runs after the orc
    event.invoke((5,));
    assert_eq!(goblin.borrow().hits, vec![5]);
    assert_eq!(orc.borrow().hits, vec![5]);
    assert_eq!(goblin.borrow().health, 95);
}

struct Scoreboard {
    names: Vec<String>,
}

impl Scoreboard {
    fn record(&mut self, name: &str, total: &mut u32) {
        self.names.push(name.to_string());
        *total += 10;
    }
}

#[test]
fn bound_methods_take_reference_arguments() {
    let board = Rc::new(RefCell::new(Scoreboard { names: Vec::new() }));

    let mut on_score = Dispatcher::<(ByRef<str>, ByMut<u32>)>::new();
    on_score
        .attach_method(&board, Scoreboard::record)
        .attach_method(&board, Scoreboard::record);

    let mut total = 0;
    {
        let name = String::from("player-one");
        on_score.invoke((name.as_str(), &mut total));
    }
    assert_eq!(total, 20);
    assert_eq!(board.borrow().names, vec!["player-one", "player-one"]);
}

#[test]
fn plain_and_bound_entries_are_distinct() {
    let goblin = Enemy::spawn("goblin", 100);

    let mut event = Dispatcher::<(i32,)>::new();
    event
        .attach(ignore)
        .attach_method(&goblin, Enemy::take_damage);

    assert_eq!(
        event.kinds().collect::<Vec<_>>(),
        vec![EntryKind::Plain, EntryKind::BoundMethod]
    );

    // Removing the plain entry must not touch the bound one and vice versa
    event.detach(ignore);
    assert_eq!(event.kinds().collect::<Vec<_>>(), vec![EntryKind::BoundMethod]);
    event.detach(ignore);
    assert_eq!(event.len(), 1);
}

#[test]
fn dispatcher_does_not_keep_targets_alive() {
    let goblin = Enemy::spawn("goblin", 100);
    let orc = Enemy::spawn("orc", 200);

    let mut event = Dispatcher::<(i32,)>::new();
    event
        .attach_method(&goblin, Enemy::take_damage)
        .attach_method(&orc, Enemy::take_damage);
    assert_eq!(Rc::strong_count(&goblin), 1);

    drop(goblin);
    assert_eq!(
        event.stats(),
        DispatcherStats {
            num_entries: 2,
            num_plain: 0,
            num_bound: 2,
            num_expired: 1,
        }
    );

    // Expired entry is skipped, live one still runs
    event.invoke((50,));
    assert_eq!(orc.borrow().health, 150);
    assert_eq!(orc.borrow().hits, vec![50]);

    assert_eq!(event.prune_expired(), 1);
    assert_eq!(event.len(), 1);
    assert_eq!(event.prune_expired(), 0);
}

#[test]
fn stats_count_each_kind() {
    let goblin = Enemy::spawn("goblin", 100);

    let mut event = Dispatcher::<(i32,)>::new();
    event
        .attach(ignore)
        .attach(ignore)
        .attach_method(&goblin, Enemy::heal);

    let stats = event.stats();
    assert_eq!(stats.num_entries, 3);
    assert_eq!(stats.num_plain, 2);
    assert_eq!(stats.num_bound, 1);
    assert_eq!(stats.num_live(), 3);
    assert_eq!(goblin.borrow().name, "goblin");
}

#[test]
fn try_attach_method_appends() {
    let goblin = Enemy::spawn("goblin", 100);

    let mut event = Dispatcher::<(i32,)>::new();
    event
        .try_attach_method(&goblin, Enemy::take_damage)
        .expect("allocation should succeed");

    event.invoke((1,));
    assert_eq!(goblin.borrow().health, 99);
}

#[test]
fn borrowed_target_panics_on_invoke() {
    let goblin = Enemy::spawn("goblin", 100);

    let mut event = Dispatcher::<(i32,)>::new();
    event.attach_method(&goblin, Enemy::take_damage);

    let guard = goblin.borrow();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| event.invoke((1,))));
    assert!(result.is_err());
    assert_eq!(guard.health, 100);
}
