//! Built-in scenarios
//!
//! Small ready-made scripts so the CLI can be tried without writing a file.

use crate::config::{parse_scenario, ScenarioConfig};
use anyhow::Result;
use clap::ValueEnum;

/// Scenarios shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Builtin {
    /// Attach a number printer, invoke, detach it, invoke again
    PrintNum,
    /// Two enemies share one explosion event; one is detached before it is dropped
    Enemies,
}

const PRINT_NUM: &str = r#"
[dispatcher]
label = "print_num"

[[steps]]
op = "attach"
target = "print_num"

[[steps]]
op = "invoke"
value = 123

[[steps]]
op = "detach"
target = "print_num"

[[steps]]
op = "invoke"
value = 456
"#;

const ENEMIES: &str = r#"
[dispatcher]
label = "on_explosion"

[[enemies]]
name = "enemy1"
health = 100

[[enemies]]
name = "enemy2"
health = 60

[[steps]]
op = "attach"
target = "enemy1.take_damage"

[[steps]]
op = "attach"
target = "enemy2.take_damage"

[[steps]]
op = "invoke"
value = 30

[[steps]]
op = "detach"
target = "enemy2.take_damage"

[[steps]]
op = "drop_enemy"
enemy = "enemy2"

[[steps]]
op = "invoke"
value = 30
"#;

impl Builtin {
    pub fn source(self) -> &'static str {
        match self {
            Builtin::PrintNum => PRINT_NUM,
            Builtin::Enemies => ENEMIES,
        }
    }

    pub fn scenario(self) -> Result<ScenarioConfig> {
        parse_scenario(self.source())
    }
}
