//! Report generation
//!
//! Renders a [`ScenarioReport`] as plain text or JSON.

use crate::scenario::ScenarioReport;
use anyhow::Result;
use std::fmt;

const RULE: &str = "═══════════════════════════════════════════════";

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  Scenario: {}", self.label.as_deref().unwrap_or("unnamed"))?;
        writeln!(f, "{}\n", RULE)?;

        writeln!(f, "Output:")?;
        if self.output.is_empty() {
            writeln!(f, "  (nothing was invoked)")?;
        }
        for line in &self.output {
            writeln!(f, "  {}", line)?;
        }

        if !self.enemies.is_empty() || !self.dropped.is_empty() {
            writeln!(f, "\nEnemies:")?;
            for enemy in &self.enemies {
                writeln!(f, "  {:<12} {:>5} hp", enemy.name, enemy.health)?;
            }
            for name in &self.dropped {
                writeln!(f, "  {:<12} dropped", name)?;
            }
        }

        let stats = &self.stats;
        writeln!(f, "\nDispatcher:")?;
        writeln!(f, "  Entries: {}", stats.num_entries)?;
        writeln!(f, "  Plain:   {}", stats.num_plain)?;
        writeln!(f, "  Bound:   {}", stats.num_bound)?;
        writeln!(f, "  Expired: {}", stats.num_expired)
    }
}

/// Render the report as human-readable text
pub fn render_text(report: &ScenarioReport) -> String {
    report.to_string()
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &ScenarioReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::Enemy;
    use multicast_event::DispatcherStats;

    fn sample() -> ScenarioReport {
        ScenarioReport {
            label: Some("on_explosion".to_string()),
            output: vec!["enemy1 takes 30 damage, health 70".to_string()],
            enemies: vec![Enemy::new("enemy1", 70)],
            dropped: vec!["enemy2".to_string()],
            stats: DispatcherStats {
                num_entries: 1,
                num_plain: 0,
                num_bound: 1,
                num_expired: 0,
            },
        }
    }

    #[test]
    fn test_text_report() {
        let text = render_text(&sample());
        assert!(text.contains("Scenario: on_explosion"));
        assert!(text.contains("  enemy1 takes 30 damage, health 70"));
        assert!(text.contains("enemy2       dropped"));
        assert!(text.contains("  Bound:   1"));
    }

    #[test]
    fn test_text_report_without_output_or_enemies() {
        let report = ScenarioReport {
            label: None,
            output: Vec::new(),
            enemies: Vec::new(),
            dropped: Vec::new(),
            stats: DispatcherStats::default(),
        };
        let text = render_text(&report);
        assert!(text.contains("Scenario: unnamed"));
        assert!(text.contains("(nothing was invoked)"));
        assert!(!text.contains("Enemies:"));
        assert!(text.ends_with("  Expired: 0\n"));
        assert_eq!(text, format!("{}", report));
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["label"], "on_explosion");
        assert_eq!(value["enemies"][0]["health"], 70);
        assert_eq!(value["stats"]["num_bound"], 1);
    }
}
