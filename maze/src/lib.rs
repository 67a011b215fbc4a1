//! Depth-first maze solving on text grids.
//!
//! A maze is read from text (`*` wall, ` ` empty, `A` start, `B` goal), searched
//! with [`MazeSolver`] and the found path is drawn back onto the grid with one
//! direction marker (`N`, `E`, `S`, `W`) per step.

pub mod error;
pub mod find;
pub mod grid;

pub use error::{MazeError, Result};
pub use find::{MazeSolver, PathResult, SolveStats, SolverState, Step};
pub use grid::{Cell, CellStorage, Direction, GridMap, Point};
