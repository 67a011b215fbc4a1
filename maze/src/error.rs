use thiserror::Error;

use crate::grid::{Cell, Point};

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Maze contains no {0:?} cell")]
    CellNotFound(Cell),
    #[error("Maze contains more than one {cell:?} cell (at {first} and {second})")]
    DuplicateCell {
        cell: Cell,
        first: Point,
        second: Point,
    },
    #[error("Invalid character {ch:?} at row {row}, column {col}")]
    InvalidCharacter { ch: char, row: usize, col: usize },
    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Maze is empty")]
    EmptyMaze,
    #[error("Could not read maze file")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, MazeError>;
