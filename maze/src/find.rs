use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::{CellStorage, Direction, GridMap, Point};

/// One committed move: the point that was reached and the direction used to get there
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub position: Point,
    pub direction: Direction,
}

#[derive(Debug, PartialEq, Clone, Eq, Serialize, Deserialize)]
pub struct PathResult {
    pub start: Point,
    pub goal: Point,
    /// Every point stepped onto after the start, ending on the goal
    pub path: Vec<Step>,
}

impl PathResult {
    pub fn path_string(&self) -> String {
        path_string(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverState {
    Searching,
    Failed,
    Succeeded(PathResult),
}

impl SolverState {
    pub fn is_done(&self) -> bool {
        !matches!(self, SolverState::Searching)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    pub steps: usize,
    pub backtracks: usize,
}

/// Depth-first search with backtracking from the start cell to the goal cell.
///
/// Directions are tried in the order North, East, South, West. When no direction
/// is left at the current point the last step is undone and the search resumes
/// at the previous point with the directions after the one just undone.
///
/// A point is stepped onto at most once, so the search ends after at most
/// `2 * rows * columns + 1` steps.
#[derive(Debug)]
pub struct MazeSolver<'a> {
    map: &'a GridMap,
    start: Point,
    goal: Point,
    current: Point,
    path: Vec<Step>,
    // mirrors `path` for constant time cycle checks
    on_path: CellStorage<bool>,
    // every point ever stepped onto, kept across backtracks
    explored: CellStorage<bool>,
    // set by a backtrack, consumed by the next step
    resume_after: Option<Direction>,
    state: SolverState,
    stats: SolveStats,
}

impl<'a> MazeSolver<'a> {
    pub fn new(map: &'a GridMap) -> Result<Self> {
        let start = map.start_point()?;
        let goal = map.goal_point()?;
        debug!("solving maze from {} to {}", start, goal);

        Ok(Self {
            map,
            start,
            goal,
            current: start,
            path: Vec::new(),
            on_path: map.create_storage(),
            explored: map.create_storage(),
            resume_after: None,
            state: SolverState::Searching,
            stats: SolveStats::default(),
        })
    }

    /// Run the search until it reaches a terminal state. Returns true if a path was found.
    ///
    /// Once finished the result is kept, so calling this again is a no-op.
    pub fn solve(&mut self) -> bool {
        while !self.step().is_done() {}
        matches!(self.state, SolverState::Succeeded(_))
    }

    /// Advance the search by a single move or a single backtrack
    pub fn step(&mut self) -> &SolverState {
        if self.state.is_done() {
            return &self.state;
        }
        self.stats.steps += 1;

        let resume_after = self.resume_after.take();
        match self.next_move(resume_after) {
            Some((direction, position)) => {
                self.path.push(Step {
                    position,
                    direction,
                });
                *self.on_path.get_mut(position) = true;
                *self.explored.get_mut(position) = true;
                self.current = position;
                trace!("moved {} to {}", direction, position);

                if position == self.goal {
                    debug!(
                        "found goal after {} steps, path length {}",
                        self.stats.steps,
                        self.path.len()
                    );
                    self.state = SolverState::Succeeded(PathResult {
                        start: self.start,
                        goal: self.goal,
                        path: self.path.clone(),
                    });
                }
            }
            None => match self.path.pop() {
                None => {
                    debug!("no path found after {} steps", self.stats.steps);
                    self.state = SolverState::Failed;
                }
                Some(dead_end) => {
                    *self.on_path.get_mut(dead_end.position) = false;
                    self.current = self.path.last().map_or(self.start, |s| s.position);
                    self.resume_after = Some(dead_end.direction);
                    self.stats.backtracks += 1;
                    trace!("dead end at {}, back to {}", dead_end.position, self.current);
                }
            },
        }

        &self.state
    }

    /// First valid move from the current point, only considering directions after
    /// `resume_after` when resuming from a backtrack
    fn next_move(&self, resume_after: Option<Direction>) -> Option<(Direction, Point)> {
        let candidates = match resume_after {
            Some(tried) => tried.after(),
            None => &Direction::ALL[..],
        };
        let way_back = self.path.last().map(|s| s.direction.opposite());

        candidates
            .iter()
            .copied()
            .filter(|d| Some(*d) != way_back)
            .find_map(|d| {
                let point = self.current.neighbor(d)?;
                self.is_open(point).then_some((d, point))
            })
    }

    fn is_open(&self, point: Point) -> bool {
        self.map.is_valid(point)
            && self.map.cell_at(point).is_traversable()
            && !self.on_path.get(point)
            && !self.explored.get(point)
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    pub fn path(&self) -> &[Step] {
        &self.path
    }

    pub fn movements(&self) -> impl Iterator<Item = Direction> + '_ {
        self.path.iter().map(|s| s.direction)
    }

    /// The maze with the current path drawn on it
    pub fn maze_with_movements(&self) -> GridMap {
        self.map
            .with_overlay(self.path.iter().map(|s| (s.position, s.direction)))
    }

    /// The current path as direction codes, e.g. `"EENS"`
    pub fn path_string(&self) -> String {
        path_string(&self.path)
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }
}

fn path_string(path: &[Step]) -> String {
    path.iter().map(|s| s.direction.as_char()).collect()
}
