//! Simulation report generation.

use super::runner::RunStats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulated runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_cleared: u32,
    pub win_rate: f64,

    // Averages
    pub avg_floor_reached: f64,
    pub avg_final_level: f64,
    pub avg_battles_won: f64,
    pub avg_turns: f64,

    /// Defeats keyed by the floor they happened on
    pub defeat_floors: BTreeMap<u32, u32>,

    /// Final level -> number of runs
    pub level_distribution: BTreeMap<u32, u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_cleared = runs.iter().filter(|r| r.cleared).count() as u32;
        let divisor = num_runs.max(1) as f64;

        let avg = |f: fn(&RunStats) -> u32| runs.iter().map(|r| f(r) as f64).sum::<f64>() / divisor;
        let avg_floor_reached = avg(|r| r.floor_reached);
        let avg_final_level = avg(|r| r.final_level);
        let avg_battles_won = avg(|r| r.battles_won);
        let avg_turns = avg(|r| r.turns);

        let mut defeat_floors = BTreeMap::new();
        for floor in runs.iter().filter_map(|r| r.defeat_floor) {
            *defeat_floors.entry(floor).or_insert(0) += 1;
        }

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        Self {
            num_runs,
            runs_cleared,
            win_rate: runs_cleared as f64 / divisor,
            avg_floor_reached,
            avg_final_level,
            avg_battles_won,
            avg_turns,
            defeat_floors,
            level_distribution,
            run_stats: runs,
        }
    }

    /// Runs that ended neither in victory nor in defeat.
    pub fn runs_stalled(&self) -> u32 {
        let defeats: u32 = self.defeat_floors.values().sum();
        self.num_runs - self.runs_cleared - defeats
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} cleared, {} stalled\n",
            self.num_runs,
            self.runs_cleared,
            self.runs_stalled()
        ));
        report.push_str(&format!("Win Rate: {:.1}%\n\n", self.win_rate * 100.0));

        report.push_str("── AVERAGES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Floor Reached:   {:.1}\n",
            self.avg_floor_reached
        ));
        report.push_str(&format!(
            "  Avg Final Level:     {:.1}\n",
            self.avg_final_level
        ));
        report.push_str(&format!(
            "  Avg Battles Won:     {:.1}\n",
            self.avg_battles_won
        ));
        report.push_str(&format!("  Avg Turns:           {:.0}\n\n", self.avg_turns));

        report.push_str("── DEFEATS BY FLOOR ─────────────────────────────────────────────\n");
        if self.defeat_floors.is_empty() {
            report.push_str("  (none)\n");
        }
        for (floor, count) in &self.defeat_floors {
            let pct = *count as f64 / self.num_runs.max(1) as f64 * 100.0;
            let bar = "█".repeat((pct / 2.0).round() as usize);
            report.push_str(&format!("  Floor {:2}: {:>5.1}% {}\n", floor, pct, bar));
        }
        report.push('\n');

        report.push_str("── FINAL LEVELS ─────────────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            report.push_str(&format!("  Lv {:3}: {}\n", level, count));
        }

        report
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(cleared: bool, floor: u32, level: u32) -> RunStats {
        RunStats {
            cleared,
            floor_reached: floor,
            final_level: level,
            battles_won: floor / 2,
            turns: floor * 4,
            defeat_floor: (!cleared).then_some(floor),
        }
    }

    #[test]
    fn test_aggregates() {
        let report = SimReport::from_runs(vec![
            run(true, 10, 12),
            run(false, 4, 8),
            run(false, 4, 7),
            run(false, 2, 6),
        ]);
        assert_eq!(report.num_runs, 4);
        assert_eq!(report.runs_cleared, 1);
        assert!((report.win_rate - 0.25).abs() < f64::EPSILON);
        assert!((report.avg_floor_reached - 5.0).abs() < f64::EPSILON);
        assert_eq!(report.defeat_floors.get(&4), Some(&2));
        assert_eq!(report.defeat_floors.get(&2), Some(&1));
        assert_eq!(report.runs_stalled(), 0);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.win_rate, 0.0);
        assert!(report.to_text().contains("(none)"));
    }

    #[test]
    fn test_json_output() {
        let report = SimReport::from_runs(vec![run(false, 3, 6)]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["num_runs"], 1);
        assert_eq!(value["defeat_floors"]["3"], 1);
        assert!(value.get("run_stats").is_none());
    }
}
