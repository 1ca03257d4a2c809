//! Airfoil coordinate (`.dat`) loading
//!
//! Reads Selig and Lednicer style coordinate listings from disk or over
//! HTTP(S). Lines that do not start with two decimal numbers (titles,
//! blank lines, comments) are skipped, as is the Lednicer point-count
//! header whose values are both greater than one.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{ProfileError, ProfileResult};
use crate::point::Point2D;

/// Parse one line of a `.dat` file.
///
/// Returns `None` for lines that carry no coordinate.
pub fn parse_dat_line(line: &str) -> Option<Point2D> {
    static COORD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COORD_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(-*\d*\.\d*)\s*(-*\d*\.\d*)").expect("invalid regex pattern")
    });

    let caps = regex.captures(line)?;
    let x = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let y = caps.get(2)?.as_str().parse::<f64>().ok()?;

    // Lednicer files open with the point count of each surface
    if x > 1.0 && y > 1.0 {
        tracing::debug!("Skipping Lednicer header line: {}", line.trim());
        return None;
    }

    Some(Point2D::new(x, y))
}

/// Parse the full text of a `.dat` file into its coordinates, in file order.
pub fn parse_dat(contents: &str) -> Vec<Point2D> {
    let mut skipped = 0usize;
    let points: Vec<Point2D> = contents
        .lines()
        .filter_map(|line| {
            let point = parse_dat_line(line);
            if point.is_none() && !line.trim().is_empty() {
                skipped += 1;
            }
            point
        })
        .collect();

    if skipped > 0 {
        tracing::warn!("Skipped {} non-coordinate line(s) in airfoil data", skipped);
    }
    points
}

/// Read and parse a local `.dat` file.
pub fn read_dat_file(path: impl AsRef<Path>) -> ProfileResult<Vec<Point2D>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded airfoil file {}", path.display());

    let points = parse_dat(&contents);
    if points.is_empty() {
        return Err(ProfileError::Parse {
            origin: path.display().to_string(),
            reason: "no coordinates found".to_string(),
        });
    }
    Ok(points)
}

/// Download and parse a `.dat` file. Failures are reported once, without retry.
pub fn fetch_dat_url(url: &str) -> ProfileResult<Vec<Point2D>> {
    tracing::info!("Fetching airfoil from {}", url);
    let network = |reason: String| ProfileError::Network {
        url: url.to_string(),
        reason,
    };

    let response = ureq::get(url).call().map_err(|e| network(e.to_string()))?;
    let contents = response
        .into_string()
        .map_err(|e| network(e.to_string()))?;

    let points = parse_dat(&contents);
    if points.is_empty() {
        return Err(ProfileError::Parse {
            origin: url.to_string(),
            reason: "no coordinates found".to_string(),
        });
    }
    Ok(points)
}
