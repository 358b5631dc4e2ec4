//! Plain-text grid file parser.
//!
//! One grid row per line, samples separated by spaces or tabs. Blank
//! lines and lines starting with `#` are skipped.

use nom::{character::complete::space1, multi::separated_list1, number::complete::double, IResult};

use crate::error::PlotError;
use crate::grid::Grid;

fn parse_row(input: &str) -> IResult<&str, Vec<f64>> {
    separated_list1(space1, double)(input)
}

/// Parse grid text into a [`Grid`]. Ragged rows are rejected.
pub fn parse_grid(input: &str) -> Result<Grid, PlotError> {
    let mut rows = Vec::new();
    for (lineno, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_row(line) {
            Ok((rest, row)) if rest.trim().is_empty() => rows.push(row),
            _ => {
                return Err(PlotError::GridParse(format!(
                    "line {}: expected whitespace-separated numbers",
                    lineno + 1
                )))
            }
        }
    }
    if rows.is_empty() {
        return Err(PlotError::GridParse("no data rows".to_string()));
    }
    Grid::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_grid() {
        let g = parse_grid("1 2 3\n4 5 6\n").unwrap();
        assert_eq!(g.shape(), (2, 3));
        assert_eq!(g.get(1, 2), 6.0);
    }

    #[test]
    fn test_parse_comments_and_blanks() {
        let text = "# height samples\n\n 0.5\t1.5 \n\n-1e2 2e-2\n";
        let g = parse_grid(text).unwrap();
        assert_eq!(g.shape(), (2, 2));
        assert_eq!(g.get(1, 0), -100.0);
        assert_eq!(g.get(1, 1), 0.02);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_grid("1 2\n3 four\n").unwrap_err();
        assert!(matches!(err, PlotError::GridParse(_)));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = parse_grid("1 2 3\n4 5\n").unwrap_err();
        assert!(matches!(err, PlotError::InvalidArgument(_)));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(parse_grid("# nothing here\n").is_err());
    }
}
