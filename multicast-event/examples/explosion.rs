//! Explosion demo
//!
//! Several enemies subscribe to one explosion event; one of them is defeated,
//! detaches itself and is dropped, and the event keeps working for the rest.
//!
//! Usage:
//!   RUST_LOG=trace cargo run --example explosion

use multicast_event::{Dispatcher, DispatcherConfig};
use std::cell::RefCell;
use std::rc::Rc;

struct Enemy {
    name: String,
    health: i32,
}

impl Enemy {
    fn new(name: &str, health: i32) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            name: name.to_string(),
            health,
        }))
    }

    fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
        println!("  {} takes {} damage ({} hp left)", self.name, amount, self.health);
    }

    fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

fn announce(amount: i32) {
    println!("BOOM! ({} damage)", amount);
}

fn main() {
    env_logger::init();

    let mut on_explosion =
        Dispatcher::<(i32,)>::with_config(DispatcherConfig::new().with_label("on_explosion"));

    let mut enemies = vec![
        Enemy::new("goblin", 40),
        Enemy::new("orc", 120),
        Enemy::new("troll", 300),
    ];

    on_explosion.attach(announce);
    for enemy in &enemies {
        on_explosion.attach_method(enemy, Enemy::take_damage);
    }

    for round in 1..=3 {
        println!("Round {}:", round);
        on_explosion.invoke((50,));

        // Detach defeated enemies before dropping them
        enemies.retain(|enemy| {
            if enemy.borrow().is_defeated() {
                println!("  {} is defeated", enemy.borrow().name);
                on_explosion.detach_method(enemy, Enemy::take_damage);
                false
            } else {
                true
            }
        });
    }

    let stats = on_explosion.stats();
    println!(
        "\n{} entries left ({} plain, {} bound)",
        stats.num_entries, stats.num_plain, stats.num_bound
    );
}
