use std::{fmt::Display, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Empty,
    Start,
    Goal,
    /// Only produced when a solved path is drawn onto the grid
    Marker(Direction),
}

impl Cell {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '*' => Some(Cell::Wall),
            ' ' => Some(Cell::Empty),
            'A' => Some(Cell::Start),
            'B' => Some(Cell::Goal),
            _ => Direction::from_char(ch).map(Cell::Marker),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Cell::Wall => '*',
            Cell::Empty => ' ',
            Cell::Start => 'A',
            Cell::Goal => 'B',
            Cell::Marker(direction) => direction.as_char(),
        }
    }

    /// Cells the search may step onto. The start cell is only ever the origin.
    pub fn is_traversable(&self) -> bool {
        matches!(self, Cell::Empty | Cell::Goal)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The four moves, declared in exploration order so that `Ord` matches it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// (row, column) offset of a single move
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Directions that come strictly after `self` in exploration order
    pub fn after(self) -> &'static [Direction] {
        &Self::ALL[self as usize + 1..]
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The point one move away, or `None` if that would leave the first row or column.
    /// The far edges are checked by [`GridMap::is_valid`].
    pub fn neighbor(self, direction: Direction) -> Option<Point> {
        let (dr, dc) = direction.delta();
        Some(Point {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.col)
    }
}

/// A rectangular grid of cells, row 0 at the top
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridMap {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
}

impl GridMap {
    /// Build a grid from rows of cells, rejecting ragged or empty input
    pub fn new(cells: Vec<Vec<Cell>>) -> Result<Self> {
        if cells.iter().all(|r| r.is_empty()) {
            return Err(MazeError::EmptyMaze);
        }
        let columns = cells[0].len();

        if let Some((row, r)) = cells.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(MazeError::RaggedRow {
                row,
                expected: columns,
                found: r.len(),
            });
        }

        Ok(Self {
            rows: cells.len(),
            columns,
            cells,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        std::fs::read_to_string(path)?.parse()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_valid(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.columns
    }

    /// Panics if `point` is outside the grid
    pub fn cell_at(&self, point: Point) -> Cell {
        self.cells[point.row][point.col]
    }

    pub fn get(&self, point: Point) -> Option<Cell> {
        self.cells.get(point.row)?.get(point.col).copied()
    }

    fn points(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (Point { row, col }, *cell))
        })
    }

    /// Find the single cell of the given kind
    pub fn locate(&self, kind: Cell) -> Result<Point> {
        let mut found = self.points().filter(|(_, c)| *c == kind).map(|(p, _)| p);

        let first = found.next().ok_or(MazeError::CellNotFound(kind))?;
        match found.next() {
            None => Ok(first),
            Some(second) => Err(MazeError::DuplicateCell {
                cell: kind,
                first,
                second,
            }),
        }
    }

    pub fn start_point(&self) -> Result<Point> {
        self.locate(Cell::Start)
    }

    pub fn goal_point(&self) -> Result<Point> {
        self.locate(Cell::Goal)
    }

    /// Copy of the grid with a direction marker drawn on each visited point
    pub fn with_overlay(&self, steps: impl IntoIterator<Item = (Point, Direction)>) -> GridMap {
        let mut map = self.clone();
        for (point, direction) in steps {
            map.cells[point.row][point.col] = Cell::Marker(direction);
        }
        map
    }

    /// Create a per-cell storage with the same shape as the grid
    pub fn create_storage<T: Default + Copy + Clone + 'static>(&self) -> CellStorage<T> {
        CellStorage(vec![vec![Default::default(); self.columns]; self.rows])
    }
}

impl FromStr for GridMap {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        // trailing blank lines are not rows
        let cells = s
            .trim_end_matches(['\n', '\r'])
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        Cell::from_char(ch).ok_or(MazeError::InvalidCharacter { ch, row, col })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        GridMap::new(cells)
    }
}

impl Display for GridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Side storage with one value per grid cell (a vec in a vec)
#[derive(Debug)]
pub struct CellStorage<T>(Vec<Vec<T>>);

impl<T: Copy + 'static> CellStorage<T> {
    pub fn get(&self, point: Point) -> T {
        self.0[point.row][point.col]
    }

    pub fn get_mut(&mut self, point: Point) -> &mut T {
        &mut self.0[point.row][point.col]
    }
}

#[cfg(test)]
mod test {

    use super::*;

    const BASIC: &str = concat!(
        "*******\n",
        "*A***B*\n",
        "* *** *\n",
        "* *   *\n",
        "* * ***\n",
        "*      \n",
        "*******\n",
    );

    #[test]
    fn test_parse_basic() {
        let map: GridMap = BASIC.parse().unwrap();

        assert_eq!(map.rows(), 7);
        assert_eq!(map.columns(), 7);
        assert_eq!(map.cell_at(Point::new(0, 0)), Cell::Wall);
        assert_eq!(map.cell_at(Point::new(2, 1)), Cell::Empty);
        assert_eq!(map.start_point().unwrap(), Point::new(1, 1));
        assert_eq!(map.goal_point().unwrap(), Point::new(1, 5));
        assert_eq!(map.get(Point::new(5, 6)), Some(Cell::Empty));
        assert_eq!(map.get(Point::new(7, 0)), None);
        assert!(!map.is_valid(Point::new(0, 7)));
    }

    #[test]
    fn test_from_file() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

        let map = GridMap::from_file(format!("{}/maze-01.txt", dir)).unwrap();
        assert_eq!(map.to_string(), BASIC);

        assert!(matches!(
            GridMap::from_file(format!("{}/does-not-exist.txt", dir)),
            Err(MazeError::Io(_))
        ));
    }

    #[test]
    fn test_render_round_trip() {
        let map: GridMap = BASIC.parse().unwrap();
        assert_eq!(map.to_string(), BASIC);
    }

    #[test]
    fn test_crlf_line_endings() {
        let map: GridMap = "A *\r\n  B\r\n".parse().unwrap();
        assert_eq!(map.rows(), 2);
        assert_eq!(map.to_string(), "A *\n  B\n");

        let map: GridMap = "A *\n  B\n\n\n".parse().unwrap();
        assert_eq!(map.rows(), 2);
    }

    #[test]
    fn test_invalid_character() {
        let err = "A x\n  B".parse::<GridMap>().unwrap_err();
        assert!(matches!(
            err,
            MazeError::InvalidCharacter {
                ch: 'x',
                row: 0,
                col: 2
            }
        ));
    }

    #[test]
    fn test_ragged_rows() {
        let err = "A  \n B\n   ".parse::<GridMap>().unwrap_err();
        assert!(matches!(
            err,
            MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!("".parse::<GridMap>(), Err(MazeError::EmptyMaze)));
        assert!(matches!("\n".parse::<GridMap>(), Err(MazeError::EmptyMaze)));
        assert!(matches!(
            GridMap::new(vec![vec![], vec![]]),
            Err(MazeError::EmptyMaze)
        ));
    }

    #[test]
    fn test_leading_blank_line_is_ragged() {
        let err = "\nA B".parse::<GridMap>().unwrap_err();
        assert!(matches!(
            err,
            MazeError::RaggedRow {
                row: 1,
                expected: 0,
                found: 3
            }
        ));
    }

    #[test]
    fn test_locate_missing_and_duplicate() {
        let map: GridMap = "A  \n***".parse().unwrap();
        assert!(matches!(
            map.goal_point(),
            Err(MazeError::CellNotFound(Cell::Goal))
        ));

        let map: GridMap = "A B\nB  ".parse().unwrap();
        match map.goal_point() {
            Err(MazeError::DuplicateCell {
                cell,
                first,
                second,
            }) => {
                assert_eq!(cell, Cell::Goal);
                assert_eq!(first, Point::new(0, 2));
                assert_eq!(second, Point::new(1, 0));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_traversable() {
        assert!(Cell::Empty.is_traversable());
        assert!(Cell::Goal.is_traversable());
        assert!(!Cell::Wall.is_traversable());
        assert!(!Cell::Start.is_traversable());
        assert!(!Cell::Marker(Direction::North).is_traversable());
    }

    #[test]
    fn test_direction_order_and_opposite() {
        assert!(Direction::North < Direction::East);
        assert!(Direction::East < Direction::South);
        assert!(Direction::South < Direction::West);

        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
        assert_eq!(Direction::East.opposite(), Direction::West);

        assert_eq!(Direction::North.after(), &Direction::ALL[1..]);
        assert!(Direction::West.after().is_empty());
        assert_eq!(Direction::from_char('S'), Some(Direction::South));
        assert_eq!(Direction::from_char('B'), None);
    }

    #[test]
    fn test_neighbor_edges() {
        let origin = Point::new(0, 0);
        assert_eq!(origin.neighbor(Direction::North), None);
        assert_eq!(origin.neighbor(Direction::West), None);
        assert_eq!(origin.neighbor(Direction::East), Some(Point::new(0, 1)));
        assert_eq!(origin.neighbor(Direction::South), Some(Point::new(1, 0)));
    }

    #[test]
    fn test_overlay_leaves_original() {
        let map: GridMap = "A  B".parse().unwrap();
        let overlay = map.with_overlay([
            (Point::new(0, 1), Direction::East),
            (Point::new(0, 2), Direction::East),
        ]);

        assert_eq!(overlay.to_string(), "AEEB\n");
        assert_eq!(map.to_string(), "A  B\n");

        // rendered output can be read back in
        let reread: GridMap = overlay.to_string().parse().unwrap();
        assert_eq!(reread, overlay);
    }
}
