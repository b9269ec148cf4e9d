//! Instance file loading, writing and generation.
//!
//! Instance format (plain text, commas are treated as whitespace):
//!
//! ```text
//! 3            <- number of motes n
//! 50 50        <- station x y
//! 10 20        <- mote 1 x y
//! 70.5 80      <- mote 2 x y
//! 30, 45       <- mote 3 x y
//! ```
//!
//! Blank lines are skipped and lines after the last mote are ignored. Mote
//! ids follow file order starting at 1; the station is always id 0.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::geometry::Point;
use super::Network;
use crate::error::{Error, Result};

/// Load and parse an instance from a file.
///
/// # Parameters
///
/// * `path` - Path to the instance text file
///
/// # Returns
///
/// The freshly charged network, or `Error::Io` / `Error::MalformedInstance`.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Network> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let network = parse_instance(&data)?;
    log::info!("Loaded instance {} with {} motes", path.display(), network.mote_count());
    Ok(network)
}

/// Parse instance text into a network with every mote at full battery.
pub fn parse_instance(text: &str) -> Result<Network> {
    // Keep 1-based source line numbers for error messages.
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.replace(',', " ")))
        .filter(|(_, line)| !line.trim().is_empty());

    let (count_line, count_text) = lines.next().ok_or_else(|| Error::malformed(1, "missing mote count"))?;
    let mote_count: usize = count_text
        .trim()
        .parse()
        .map_err(|_| Error::malformed(count_line, format!("mote count '{}' is not a non-negative integer", count_text.trim())))?;

    let (station_line, station_text) = lines
        .next()
        .ok_or_else(|| Error::malformed(count_line + 1, "missing station coordinates"))?;
    let station = parse_point(station_line, &station_text)?;

    // The declared count is untrusted, so grow only with lines actually read.
    let mut motes = Vec::new();
    let mut last_line = station_line;
    for index in 0..mote_count {
        let (line_no, text) = lines.next().ok_or_else(|| {
            Error::malformed(
                last_line + 1,
                format!("expected {} mote lines, found {}", mote_count, index),
            )
        })?;
        motes.push(parse_point(line_no, &text)?);
        last_line = line_no;
    }

    Ok(Network::new(station, motes))
}

fn parse_point(line: usize, text: &str) -> Result<Point> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(Error::malformed(line, format!("expected 'x y', found {} values", tokens.len())));
    }
    let coord = |token: &str| -> Result<f64> {
        let value: f64 = token
            .parse()
            .map_err(|_| Error::malformed(line, format!("'{}' is not a number", token)))?;
        if !value.is_finite() {
            return Err(Error::malformed(line, format!("coordinate '{}' is not finite", token)));
        }
        Ok(value)
    };
    Ok(Point::new(coord(tokens[0])?, coord(tokens[1])?))
}

/// Render a network back into the instance format.
///
/// Batteries are not part of the format; reloading yields full motes.
pub fn format_instance(network: &Network) -> String {
    let mut out = format!("{}\n", network.mote_count());
    if let Some(station) = network.station() {
        let p = station.position();
        out.push_str(&format!("{} {}\n", p.x, p.y));
    }
    for mote in network.motes() {
        let p = mote.position();
        out.push_str(&format!("{} {}\n", p.x, p.y));
    }
    out
}

/// Write a network to `path` in the instance format.
pub fn write_instance(network: &Network, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format_instance(network)).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Random deployment: motes uniform in `[0, width) x [0, height)`, station at
/// the field centre. The same seed always yields the same layout.
///
/// # Returns
///
/// `Error::InvalidConfig` unless both dimensions are finite and positive.
pub fn generate_instance(motes: usize, width: f64, height: f64, seed: u64) -> Result<Network> {
    let usable = |side: f64| side.is_finite() && side > 0.0;
    if !usable(width) || !usable(height) {
        return Err(Error::InvalidConfig(format!(
            "field {} x {} must have finite positive dimensions",
            width, height
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let station = Point::new(width / 2.0, height / 2.0);
    let positions: Vec<Point> = (0..motes)
        .map(|_| Point::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)))
        .collect();
    Ok(Network::new(station, positions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::MAX_BATTERY;

    #[test]
    fn parses_station_and_motes_in_order() {
        let net = parse_instance("3\n50 50\n10 20\n70.5, 80\n\n30 45\n").unwrap();
        assert_eq!(net.len(), 4);
        assert_eq!(net.station().unwrap().position(), &Point::new(50.0, 50.0));
        assert_eq!(net.nodes()[2].position(), &Point::new(70.5, 80.0));
        assert_eq!(net.nodes()[3].id(), 3);
        assert!(net.motes().all(|m| m.energy() == MAX_BATTERY));
    }

    #[test]
    fn zero_motes_is_valid() {
        let net = parse_instance("0\n1 2\n").unwrap();
        assert_eq!(net.len(), 1);
        assert_eq!(net.mote_count(), 0);
    }

    #[test]
    fn short_file_reports_missing_lines() {
        let err = parse_instance("3\n0 0\n1 1\n").unwrap_err();
        match err {
            Error::MalformedInstance { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("expected 3 mote lines"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn huge_declared_count_with_short_body_is_malformed() {
        for count in [usize::MAX.to_string(), "1000000000000".to_string()] {
            let err = parse_instance(&format!("{}\n0 0\n1 1\n2 2\n", count)).unwrap_err();
            assert!(matches!(err, Error::MalformedInstance { line: 5, .. }), "unexpected error: {err}");
        }
        let err = parse_instance(&format!("{}\n0 0\n1 1\n", usize::MAX)).unwrap_err();
        assert!(matches!(err, Error::MalformedInstance { line: 4, .. }), "unexpected error: {err}");
    }

    #[test]
    fn bad_tokens_are_rejected_with_line_number() {
        assert!(matches!(parse_instance(""), Err(Error::MalformedInstance { line: 1, .. })));
        assert!(matches!(parse_instance("x\n0 0\n"), Err(Error::MalformedInstance { line: 1, .. })));
        assert!(matches!(parse_instance("1\n0 0\n1 b\n"), Err(Error::MalformedInstance { line: 3, .. })));
        assert!(matches!(parse_instance("1\n0 0 0\n1 1\n"), Err(Error::MalformedInstance { line: 2, .. })));
        assert!(matches!(parse_instance("1\n"), Err(Error::MalformedInstance { line: 2, .. })));
    }

    #[test]
    fn formatted_instance_parses_back() {
        let net = generate_instance(12, 200.0, 150.0, 7).unwrap();
        let reparsed = parse_instance(&format_instance(&net)).unwrap();
        assert_eq!(reparsed, net);
    }

    #[test]
    fn generation_is_seeded_and_bounded() {
        let a = generate_instance(30, 100.0, 50.0, 42).unwrap();
        let b = generate_instance(30, 100.0, 50.0, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.mote_count(), 30);
        assert!(a.motes().all(|m| {
            let p = m.position();
            (0.0..100.0).contains(&p.x) && (0.0..50.0).contains(&p.y)
        }));
    }

    #[test]
    fn generation_rejects_unusable_fields() {
        for (width, height) in [(f64::INFINITY, 10.0), (10.0, f64::NAN), (0.0, 10.0), (10.0, -5.0)] {
            assert!(matches!(generate_instance(3, width, height, 1), Err(Error::InvalidConfig(_))));
        }
        assert_eq!(generate_instance(0, 10.0, 10.0, 1).unwrap().mote_count(), 0);
    }
}
