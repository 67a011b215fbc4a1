use maze::{MazeSolver, SolveStats, Step};
use serde::Serialize;

pub const NO_SOLUTION: &str = "No solution could be found";

/// Everything the solver knows once it has finished, in a serializable form
#[derive(Debug, Serialize)]
pub struct Report {
    pub solved: bool,
    pub path: String,
    pub steps: Vec<Step>,
    /// The maze with the path drawn on it (unchanged if there is no path)
    pub maze: String,
    pub stats: SolveStats,
}

impl Report {
    pub fn new(solved: bool, solver: &MazeSolver) -> Self {
        Self {
            solved,
            path: solver.path_string(),
            steps: solver.path().to_vec(),
            maze: solver.maze_with_movements().to_string(),
            stats: solver.stats(),
        }
    }

    pub fn to_text(&self) -> String {
        if self.solved {
            format!("Solved maze:\n{}\nPath: {}\n", self.maze, self.path)
        } else {
            format!("{}\n", NO_SOLUTION)
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use maze::GridMap;

    fn report_for(text: &str) -> Report {
        let map: GridMap = text.parse().unwrap();
        let mut solver = MazeSolver::new(&map).unwrap();
        let solved = solver.solve();
        Report::new(solved, &solver)
    }

    #[test]
    fn test_text_solved() {
        let report = report_for("A *\n*B*\n   ");
        assert_eq!(report.to_text(), "Solved maze:\nAE*\n*S*\n   \n\nPath: ES\n");
    }

    #[test]
    fn test_text_unsolved() {
        let report = report_for("A*B");
        assert!(!report.solved);
        assert_eq!(report.to_text(), "No solution could be found\n");
        assert_eq!(report.maze, "A*B\n");
    }

    #[test]
    fn test_json() {
        let report = report_for("A B");
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["solved"], true);
        assert_eq!(value["path"], "EE");
        assert_eq!(value["maze"], "AEE\n");
        assert_eq!(value["stats"]["steps"], 2);
        assert_eq!(value["steps"][1]["direction"], "East");
        assert_eq!(value["steps"][1]["position"]["col"], 2);
    }
}
