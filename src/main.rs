#![warn(clippy::all, clippy::pedantic)]
use itertools::Itertools;
use nom::{bytes::complete::take_while1, combinator::eof, sequence::terminated, IResult};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt::{self, Debug, Display, Formatter};
use std::{env, fs, io, process};
use thiserror::Error;

// A wrapper for println that only prints in debug mode
macro_rules! dprintln {
    () => {
        #[cfg(feature = "debug_print")]
        println!() };
    ($($arg : tt) *) => {
        #[cfg(feature = "debug_print")]
        println!($($arg) *)
    };
}

const START_SYMBOL: u8 = b'S';
const END_SYMBOL: u8 = b'E';
const LOWEST_SYMBOL: u8 = b'a';
const HIGHEST_SYMBOL: u8 = b'z';
const LOWEST_ELEVATION: Elevation = 0;
const NO_PATH_ANSWER: &str = "-1";

/// An index into the flattened grid
type CellRef = usize;
type Elevation = u8;

#[derive(Error, Debug)]
enum ParseError {
    #[error("input contains no rows")]
    Empty,
    #[error("row {row} contains an invalid symbol: '{line}'")]
    InvalidRow { row: usize, line: String },
    #[error("row {row} has length {actual}, but rows must have length {expected}")]
    MismatchedRowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug)]
enum LookupError {
    #[error("symbol '{0}' not found in grid")]
    SymbolNotFound(char),
}

#[derive(Error, Debug)]
enum Error {
    #[error("missing argument: filename")]
    MissingArgument,
    #[error("could not read input file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse grid: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };

        write!(f, "{}", name)
    }
}

/// Get the elevation of a grid symbol. The start is as low as an 'a', and the end as high as a 'z'.
fn elevation(symbol: u8) -> Elevation {
    let normalized = match symbol {
        START_SYMBOL => LOWEST_SYMBOL,
        END_SYMBOL => HIGHEST_SYMBOL,
        other => other,
    };

    normalized - LOWEST_SYMBOL
}

/// Check if we can move between two elevations.
/// Going down is always fine, but we can only climb by one.
fn climb_allowed(from: Elevation, to: Elevation) -> bool {
    to <= from + 1
}

fn is_grid_symbol(c: char) -> bool {
    c.is_ascii_lowercase() || c == char::from(START_SYMBOL) || c == char::from(END_SYMBOL)
}

fn parse_row(line: &str) -> IResult<&str, &str> {
    terminated(take_while1(is_grid_symbol), eof)(line)
}

#[derive(Clone)]
struct Grid {
    data: Vec<u8>,
    row_len: usize,
}

impl Grid {
    fn from_input(input: &str) -> Result<Self, ParseError> {
        let mut data = vec![];
        let mut maybe_row_len = None;
        for (i, line) in input.lines().enumerate() {
            let (_, row) = parse_row(line).map_err(|_| ParseError::InvalidRow {
                row: i,
                line: line.to_string(),
            })?;

            match maybe_row_len {
                None => maybe_row_len = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(ParseError::MismatchedRowLength {
                        row: i,
                        expected,
                        actual: row.len(),
                    });
                }
                Some(_) => (),
            }

            data.extend_from_slice(row.as_bytes());
        }

        let row_len = maybe_row_len.ok_or(ParseError::Empty)?;

        Ok(Self { data, row_len })
    }

    fn rows(&self) -> usize {
        self.data.len() / self.row_len
    }

    fn cols(&self) -> usize {
        self.row_len
    }

    fn to_row_col(&self, cell: CellRef) -> (usize, usize) {
        (cell / self.row_len, cell % self.row_len)
    }

    fn elevation_at(&self, cell: CellRef) -> Elevation {
        elevation(self.data[cell])
    }

    fn find_symbol(&self, symbol: u8) -> Result<CellRef, LookupError> {
        self.data
            .iter()
            .position(|&c| c == symbol)
            .ok_or_else(|| LookupError::SymbolNotFound(char::from(symbol)))
    }

    fn start(&self) -> Result<CellRef, LookupError> {
        self.find_symbol(START_SYMBOL)
    }

    fn end(&self) -> Result<CellRef, LookupError> {
        self.find_symbol(END_SYMBOL)
    }

    /// Get the cell one step away in the given direction, or None if that would leave the grid
    fn step(&self, cell: CellRef, direction: Direction) -> Option<CellRef> {
        let (row, col) = self.to_row_col(cell);
        let (next_row, next_col) = match direction {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::Right => (row, col + 1),
        };

        let in_bounds = next_row < self.rows() && next_col < self.cols();
        in_bounds.then_some(next_row * self.row_len + next_col)
    }

    /// Get every in-bounds cell adjacent to the given one, in up/down/left/right order
    fn neighbors(&self, cell: CellRef) -> impl Iterator<Item = CellRef> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let neighbor = self.step(cell, direction);
            if neighbor.is_none() {
                dprintln!("  {}: out of range", direction);
            }

            neighbor
        })
    }

    fn can_move(&self, from: CellRef, to: CellRef) -> bool {
        climb_allowed(self.elevation_at(from), self.elevation_at(to))
    }

    fn describe(&self, cell: CellRef) -> String {
        let (row, col) = self.to_row_col(cell);
        format!("x={}, y={}, data={}", col, row, char::from(self.data[cell]))
    }

    /// Find the fewest steps needed to get from source to target using Dijkstra's algorithm.
    /// The whole reachable part of the grid is explored. If there is no path, None is returned.
    fn shortest_path(&self, source: CellRef, target: CellRef) -> Option<usize> {
        let mut distances = HashMap::<CellRef, usize>::new();
        let mut visited = HashSet::<CellRef>::new();
        let mut frontier = BinaryHeap::<Reverse<(usize, CellRef)>>::new();
        distances.insert(source, 0);
        frontier.push(Reverse((0, source)));

        while let Some(Reverse((distance, visiting))) = frontier.pop() {
            // A cell can be pushed more than once as its distance drops; only the first pop counts
            if !visited.insert(visiting) {
                continue;
            }

            dprintln!("visit {}", self.describe(visiting));
            let candidate_distance = distance + 1;
            for neighbor in self.neighbors(visiting) {
                if !self.can_move(visiting, neighbor) {
                    dprintln!("  too steep {}", self.describe(neighbor));
                    continue;
                }

                let is_shorter = match distances.get(&neighbor) {
                    Some(&known) => candidate_distance < known,
                    None => true,
                };
                if is_shorter {
                    dprintln!("  set distance {}", self.describe(neighbor));
                    distances.insert(neighbor, candidate_distance);
                    frontier.push(Reverse((candidate_distance, neighbor)));
                }
            }
        }

        distances.get(&target).copied()
    }

    /// Find the fewest steps to the target from any cell at the lowest elevation.
    /// Cells that cannot reach the target are skipped.
    fn min_distance_from_lowest(&self, target: CellRef) -> Option<usize> {
        self.data
            .iter()
            .positions(|&symbol| elevation(symbol) == LOWEST_ELEVATION)
            .filter_map(|candidate| {
                let steps = self.shortest_path(candidate, target);
                dprintln!("from {}: {:?}", self.describe(candidate), steps);

                steps
            })
            .min()
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rendered = self
            .data
            .chunks(self.row_len)
            .map(String::from_utf8_lossy)
            .join("\n");

        write!(f, "{}", rendered)
    }
}

/// Render an answer for output. An end that can't be reached is printed as -1.
fn format_answer(answer: Option<usize>) -> String {
    answer.map_or_else(|| NO_PATH_ANSWER.to_string(), |steps| steps.to_string())
}

fn part1(grid: &Grid) -> Result<Option<usize>, LookupError> {
    let start = grid.start()?;
    let end = grid.end()?;

    Ok(grid.shortest_path(start, end))
}

fn part2(grid: &Grid) -> Result<Option<usize>, LookupError> {
    let end = grid.end()?;

    Ok(grid.min_distance_from_lowest(end))
}

fn run() -> Result<(), Error> {
    let input_file_name = env::args().nth(1).ok_or(Error::MissingArgument)?;
    let input = fs::read_to_string(input_file_name)?;
    let grid = Grid::from_input(&input)?;
    dprintln!("{:?}", grid);

    let from_start = part1(&grid)?;
    let from_lowest = part2(&grid)?;

    println!("{}", format_answer(from_start));
    println!("{}", format_answer(from_lowest));

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
