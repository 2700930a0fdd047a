use std::str::FromStr;

use thiserror::Error;

use crate::Graph;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("bad map header: {0}")]
    Header(String),
    #[error("map body is {found_width}x{found_height}, header says {width}x{height}")]
    Dimensions {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },
}

/// Whether a map character denotes a traversable cell.
pub fn is_traversable_cell(cell: char) -> bool {
    matches!(cell, '.' | 'G' | 'S')
}

/// Parses a map into a [`Graph`].
///
/// Accepts either a bare block of cell rows or a MovingAI octile map (`type octile`, `height H`,
/// `width W`, `map`, then the rows). `.`, `G` and `S` are traversable; every other character is
/// an obstacle. Blank lines are ignored.
impl FromStr for Graph {
    type Err = ParseMapError;

    fn from_str(text: &str) -> Result<Graph, ParseMapError> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty()).peekable();

        let has_header = match lines.peek() {
            Some(line) => line.starts_with("type"),
            None => return Err(ParseMapError::Empty),
        };
        let header = if has_header {
            Some(parse_header(&mut lines)?)
        } else {
            None
        };

        let rows: Vec<Vec<char>> = lines.map(|line| line.chars().collect()).collect();
        let Some(first) = rows.first() else {
            return Err(ParseMapError::Empty);
        };
        let width = first.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ParseMapError::Ragged {
                row,
                expected: width,
                found: cells.len(),
            });
        }

        if let Some((header_width, header_height)) = header {
            if (header_width, header_height) != (width, rows.len()) {
                return Err(ParseMapError::Dimensions {
                    width: header_width,
                    height: header_height,
                    found_width: width,
                    found_height: rows.len(),
                });
            }
        }

        let too_large = || ParseMapError::Header("map dimensions exceed i32".to_owned());
        let width = i32::try_from(width).map_err(|_| too_large())?;
        let height = i32::try_from(rows.len()).map_err(|_| too_large())?;

        Ok(Graph::new(width, height, |x, y| {
            !is_traversable_cell(rows[y as usize][x as usize])
        }))
    }
}

fn field<'a>(line: Option<&'a str>, name: &str) -> Result<&'a str, ParseMapError> {
    let Some(line) = line else {
        return Err(ParseMapError::Header(format!("expected {name}, found end of file")));
    };
    let mut tokens = line.split_whitespace();

    if tokens.next() != Some(name) {
        return Err(ParseMapError::Header(format!("expected {name}, got {line:?}")));
    }
    let Some(value) = tokens.next() else {
        return Err(ParseMapError::Header(format!("{name} has no value")));
    };
    let None = tokens.next() else {
        return Err(ParseMapError::Header(format!("trailing text after {name}")));
    };
    Ok(value)
}

fn parse_header<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
) -> Result<(usize, usize), ParseMapError> {
    let map_type = field(lines.next(), "type")?;
    if map_type != "octile" {
        return Err(ParseMapError::Header(format!(
            "expected type to be octile, got {map_type}"
        )));
    }

    let height = field(lines.next(), "height")?;
    let height = height
        .parse()
        .map_err(|_| ParseMapError::Header(format!("bad height {height:?}")))?;
    let width = field(lines.next(), "width")?;
    let width = width
        .parse()
        .map_err(|_| ParseMapError::Header(format!("bad width {width:?}")))?;

    if lines.next() != Some("map") {
        return Err(ParseMapError::Header("expected map token".to_owned()));
    }

    Ok((width, height))
}
