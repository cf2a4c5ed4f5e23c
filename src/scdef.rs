//! Reader for placement lists.
//!
//! Every line holds one placement, `x y z name`, separated by spaces or
//! tabs. Coordinates are non-negative integers and `name` is looked up in
//! [`crate::definitions`]. Blank lines and lines starting with `#` are
//! skipped.

use std::io::BufRead;

use log::{debug, warn};
use thiserror::Error;

use crate::{
    definitions::{self, Mapping},
    io::Result,
    volume::VoxelVolume,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {axis} coordinate")]
    MissingCoordinate { axis: char },
    #[error("{axis} coordinate '{token}' is not a non-negative integer")]
    InvalidCoordinate { axis: char, token: String },
    #[error("expected block name")]
    MissingName,
}

/// One parsed line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub name: String,
}

/// Counts of what [`read_placements`] did with its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub placed: usize,
    pub unknown: usize,
    pub malformed: usize,
}

fn coordinate<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    axis: char,
) -> std::result::Result<usize, ParseError> {
    let token = tokens.next().ok_or(ParseError::MissingCoordinate { axis })?;
    // `usize::MAX` has no exclusive upper bound, so the volume cannot hold it.
    token
        .parse::<usize>()
        .ok()
        .filter(|&v| v < usize::MAX)
        .ok_or_else(|| ParseError::InvalidCoordinate {
            axis,
            token: token.to_owned(),
        })
}

/// Parses a single line. Returns `Ok(None)` for blank and comment lines.
/// Tokens after the name are ignored.
pub fn parse_line(line: &str) -> std::result::Result<Option<Placement>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = line.split_whitespace();
    let x = coordinate(&mut tokens, 'x')?;
    let y = coordinate(&mut tokens, 'y')?;
    let z = coordinate(&mut tokens, 'z')?;
    let name = tokens.next().ok_or(ParseError::MissingName)?.to_owned();

    Ok(Some(Placement { x, y, z, name }))
}

/// Reads placements line by line into `volume`.
///
/// Malformed lines and unknown block names are logged and skipped. Bytes
/// that are not valid UTF-8 are replaced, so such a line at worst names an
/// unknown block. Only a failure to read the input itself is an error.
pub fn read_placements<R: BufRead>(mut reader: R, volume: &mut VoxelVolume) -> Result<Summary> {
    let mut summary = Summary::default();
    let mut buf: Vec<u8> = Vec::new();
    let mut number: usize = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        number += 1;
        let line = String::from_utf8_lossy(&buf);

        let placement = match parse_line(&line) {
            Ok(Some(p)) => p,
            Ok(None) => continue,
            Err(err) => {
                warn!("line {number}: {err}");
                summary.malformed += 1;
                continue;
            }
        };

        let Placement { x, y, z, name } = placement;
        match definitions::lookup(&name) {
            Some(Mapping { id, data }) => {
                volume.set(x, y, z, id, data);
                debug!("({x},{y},{z}): {id}:{data}");
                summary.placed += 1;
            }
            None => {
                warn!("line {number} ({x},{y},{z}): unknown block name '{name}'");
                summary.unknown += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Error;
    use std::io::{self, Cursor, Read};

    fn placement(x: usize, y: usize, z: usize, name: &str) -> Option<Placement> {
        Some(Placement { x, y, z, name: name.to_owned() })
    }

    #[test]
    fn parses_basic_line() {
        assert_eq!(parse_line("1 2 3 stone"), Ok(placement(1, 2, 3, "stone")));
        assert_eq!(
            parse_line("\t 10\t0  7   oak_log[axis=z] \n"),
            Ok(placement(10, 0, 7, "oak_log[axis=z]"))
        );
    }

    #[test]
    fn ignores_trailing_tokens() {
        assert_eq!(parse_line("0 0 0 glass extra words"), Ok(placement(0, 0, 0, "glass")));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t"), Ok(None));
        assert_eq!(parse_line("# 1 2 3 stone"), Ok(None));
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert_eq!(
            parse_line("-1 0 0 stone"),
            Err(ParseError::InvalidCoordinate { axis: 'x', token: "-1".into() })
        );
        assert_eq!(
            parse_line("0 1x 0 stone"),
            Err(ParseError::InvalidCoordinate { axis: 'y', token: "1x".into() })
        );
        assert_eq!(parse_line("0 0"), Err(ParseError::MissingCoordinate { axis: 'z' }));
        assert_eq!(parse_line("0 0 0"), Err(ParseError::MissingName));
    }

    #[test]
    fn rejects_coordinate_without_upper_bound() {
        let max = usize::MAX.to_string();
        assert_eq!(
            parse_line(&format!("0 0 {max} stone")),
            Err(ParseError::InvalidCoordinate { axis: 'z', token: max.clone() })
        );
        assert_eq!(
            parse_line(&format!("{} 0 0 stone", usize::MAX - 1)),
            Ok(placement(usize::MAX - 1, 0, 0, "stone"))
        );

        let mut volume = VoxelVolume::new();
        let input = format!("{max} 0 0 stone\n");
        let summary = read_placements(input.as_bytes(), &mut volume).unwrap();
        assert_eq!(summary, Summary { placed: 0, unknown: 0, malformed: 1 });
        assert!(volume.is_empty());
    }

    #[test]
    fn invalid_utf8_does_not_stop_reading() {
        let input: &[u8] = b"0 0 0 stone\n# caf\xe9\n1 0 0 stone\n0 1 0 gl\xe4ss\n";
        let mut volume = VoxelVolume::new();
        let summary = read_placements(input, &mut volume).unwrap();

        assert_eq!(summary, Summary { placed: 2, unknown: 1, malformed: 0 });
        assert_eq!(volume.dimensions(), [2, 1, 1]);
        assert_eq!(volume.id(1, 0, 0), 1);
    }

    #[test]
    fn last_line_without_newline() {
        let mut volume = VoxelVolume::new();
        let summary = read_placements("0 0 0 stone\n2 0 0 dirt".as_bytes(), &mut volume).unwrap();
        assert_eq!(summary.placed, 2);
        assert_eq!(volume.id(2, 0, 0), 3);
    }

    #[test]
    fn reads_into_volume() {
        let input = "\
# a small pillar
0 0 0 stone
0 1 0 stone
0 2 0 glowstone
2 0 1 mystery_block
1 1
0 1 0 red_wool
";
        let mut volume = VoxelVolume::new();
        let summary = read_placements(Cursor::new(input), &mut volume).unwrap();

        assert_eq!(summary, Summary { placed: 4, unknown: 1, malformed: 1 });
        assert_eq!(volume.dimensions(), [1, 3, 1]);
        assert_eq!(volume.id(0, 0, 0), 1);
        assert_eq!(volume.id(0, 2, 0), 89);
        assert_eq!((volume.id(0, 1, 0), volume.data(0, 1, 0)), (35, 14));
    }

    #[test]
    fn read_failure_is_fatal() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let mut volume = VoxelVolume::new();
        let result = read_placements(io::BufReader::new(Failing), &mut volume);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
