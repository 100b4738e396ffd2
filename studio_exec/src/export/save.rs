//! Save file reading and writing
//!
//! Save files are plain text. The current format (version 2) stores the path in field inches:
//!
//! ```text
//! AUTON 2
//! <start heading>
//! <number of waypoints>
//! <x> <y>
//! ...
//! <number of turns>
//! <waypoint index> <angle>
//! ...
//! ```
//!
//! Files without the `AUTON` header are version 1 files. These start directly with the number of
//! waypoints, store canvas pixels on the default canvas and have no start heading.
//!
//! Velocities are not saved, every segment of a loaded path gets the default velocity.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, info};
use nalgebra::Vector2;
use std::fmt::Write as _;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use super::ExportError;
use crate::coord::Canvas;
use crate::path::PathModel;
use util::maths::normalise_zero;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// First token of a versioned save file.
pub const SAVE_MAGIC: &str = "AUTON";

/// Version written by [`save_to_string`].
pub const SAVE_VERSION: u32 = 2;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Write a path in the current save format.
pub fn save_to_string(model: &PathModel) -> String {
    let mut s = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(s, "{} {}", SAVE_MAGIC, SAVE_VERSION);
    let _ = writeln!(s, "{}", normalise_zero(model.start_heading_deg()));

    let _ = writeln!(s, "{}", model.waypoint_count());
    for p in model.waypoints() {
        let _ = writeln!(s, "{} {}", normalise_zero(p.x), normalise_zero(p.y));
    }

    let _ = writeln!(s, "{}", model.turn_count());
    for t in model.turns() {
        let _ = writeln!(s, "{} {}", t.waypoint_index, normalise_zero(t.angle_deg));
    }

    s
}

pub fn save_to_writer<W: Write>(model: &PathModel, mut writer: W) -> Result<(), ExportError> {
    writer.write_all(save_to_string(model).as_bytes())?;
    writer.flush()?;

    Ok(())
}

pub fn save_to_file<P: AsRef<Path>>(model: &PathModel, path: P) -> Result<(), ExportError> {
    let file = std::fs::File::create(path.as_ref())?;
    save_to_writer(model, std::io::BufWriter::new(file))?;

    info!("Path saved to {:?}", path.as_ref());

    Ok(())
}

/// Read a path from the text of a save file, of either version.
///
/// Every segment is given `default_velocity_ips`.
pub fn load_from_str(text: &str, default_velocity_ips: f64) -> Result<PathModel, ExportError> {
    let mut lines = SaveLines::new(text);

    let (first_num, first) = lines.next_line()?;

    let legacy = !first.starts_with(SAVE_MAGIC);

    let (start_heading, count_line) = if legacy {
        (0.0, (first_num, first))
    }
    else {
        let mut tokens = first.split_whitespace().skip(1);
        let version: u32 = parse_token(first_num, tokens.next(), "save version")?;

        if version != SAVE_VERSION {
            return Err(malformed(
                first_num,
                format!("unsupported save version {}", version),
            ));
        }

        let (n, l) = lines.next_line()?;
        let heading: f64 = parse_single(n, l, "start heading")?;

        (heading, lines.next_line()?)
    };

    let num_points: usize = parse_single(count_line.0, count_line.1, "waypoint count")?;

    // Legacy files are in pixels on the default canvas
    let canvas = Canvas::default();

    let mut model = PathModel::new(default_velocity_ips);

    for i in 0..num_points {
        let (n, l) = lines.next_line()?;
        let (x, y): (f64, f64) = parse_pair(n, l, "waypoint")?;

        let point = if legacy {
            canvas.to_inches(&Vector2::new(x, y))
        }
        else {
            Vector2::new(x, y)
        };

        if i == 0 {
            model.set_start(point, start_heading);
        }
        else {
            model
                .append_waypoint(point, None)
                .map_err(|e| malformed(n, e.to_string()))?;
        }
    }

    if num_points == 0 {
        model.set_start_heading(start_heading);
    }

    let (n, l) = lines.next_line()?;
    let num_turns: usize = parse_single(n, l, "turn count")?;

    for _ in 0..num_turns {
        let (n, l) = lines.next_line()?;
        let (index, angle): (usize, f64) = parse_pair(n, l, "turn")?;

        model
            .add_turn(index, angle)
            .map_err(|e| malformed(n, e.to_string()))?;
    }

    if let Some((n, _)) = lines.peek_line() {
        return Err(malformed(n, String::from("unexpected content after the turns")));
    }

    debug!(
        "Loaded {} save with {} waypoints and {} turns",
        if legacy { "legacy" } else { "v2" },
        model.waypoint_count(),
        model.turn_count()
    );

    Ok(model)
}

pub fn load_from_reader<R: Read>(
    mut reader: R,
    default_velocity_ips: f64,
) -> Result<PathModel, ExportError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    load_from_str(&text, default_velocity_ips)
}

pub fn load_from_file<P: AsRef<Path>>(
    path: P,
    default_velocity_ips: f64,
) -> Result<PathModel, ExportError> {
    let file = std::fs::File::open(path.as_ref())?;
    let model = load_from_reader(std::io::BufReader::new(file), default_velocity_ips)?;

    info!("Path loaded from {:?}", path.as_ref());

    Ok(model)
}

// ---------------------------------------------------------------------------
// PRIVATE
// ---------------------------------------------------------------------------

/// Non-blank lines of a save file with their 1-based line numbers.
struct SaveLines<'a> {
    lines: std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
    last: usize,
}

impl<'a> SaveLines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            last: 0,
        }
    }

    fn skip_blank(&mut self) {
        while let Some((_, l)) = self.lines.peek() {
            if !l.trim().is_empty() {
                break;
            }
            self.lines.next();
        }
    }

    fn next_line(&mut self) -> Result<(usize, &'a str), ExportError> {
        self.skip_blank();

        match self.lines.next() {
            Some((i, l)) => {
                self.last = i + 1;
                Ok((i + 1, l.trim()))
            }
            None => Err(malformed(self.last + 1, String::from("unexpected end of file"))),
        }
    }

    fn peek_line(&mut self) -> Option<(usize, &'a str)> {
        self.skip_blank();
        self.lines.peek().map(|(i, l)| (i + 1, l.trim()))
    }
}

fn malformed(line: usize, reason: String) -> ExportError {
    ExportError::MalformedSave { line, reason }
}

fn parse_token<T: FromStr>(line: usize, token: Option<&str>, what: &str) -> Result<T, ExportError> {
    match token {
        Some(t) => t
            .parse()
            .map_err(|_| malformed(line, format!("invalid {} `{}`", what, t))),
        None => Err(malformed(line, format!("missing {}", what))),
    }
}

fn parse_single<T: FromStr>(line: usize, text: &str, what: &str) -> Result<T, ExportError> {
    let mut tokens = text.split_whitespace();
    let value = parse_token(line, tokens.next(), what)?;

    if tokens.next().is_some() {
        return Err(malformed(line, format!("expected a single {}", what)));
    }

    Ok(value)
}

fn parse_pair<A: FromStr, B: FromStr>(
    line: usize,
    text: &str,
    what: &str,
) -> Result<(A, B), ExportError> {
    let mut tokens = text.split_whitespace();
    let a = parse_token(line, tokens.next(), what)?;
    let b = parse_token(line, tokens.next(), what)?;

    if tokens.next().is_some() {
        return Err(malformed(line, format!("too many values for {}", what)));
    }

    Ok((a, b))
}
