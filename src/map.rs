//! Trip map export.
//!
//! Renders a trip as a standalone SVG image: a graticule framing the trip,
//! one great-circle arc per leg and a labelled marker per city.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::atlas::Coordinate;
use crate::error::Result;
use crate::trip::Trip;

/// Degrees of padding around the trip's cities.
pub const MARGIN_DEGREES: f64 = 5.0;

/// Minimum span of the map on each axis, in degrees.
pub const MIN_SPAN_DEGREES: f64 = 50.0;

const MERCATOR_LAT_LIMIT: f64 = 85.0;
const ARC_SEGMENTS: usize = 64;

/// Map projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    #[serde(rename = "merc", alias = "mercator")]
    Mercator,
    #[serde(rename = "cyl", alias = "equirectangular")]
    Equirectangular,
}

impl FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merc" | "mercator" => Ok(Self::Mercator),
            "cyl" | "equirectangular" => Ok(Self::Equirectangular),
            _ => Err(format!("unknown projection: {} (expected merc or cyl)", s)),
        }
    }
}

impl Projection {
    /// Project a coordinate onto the plane; x grows east, y grows north.
    fn project(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        match self {
            Self::Equirectangular => (longitude, latitude),
            Self::Mercator => {
                let phi = latitude
                    .clamp(-MERCATOR_LAT_LIMIT, MERCATOR_LAT_LIMIT)
                    .to_radians();
                let y = (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln();
                (longitude, y.to_degrees())
            }
        }
    }
}

/// Lower-left and upper-right corners framing a trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower_left: Coordinate,
    pub upper_right: Coordinate,
}

impl Bounds {
    /// Frame the trip's cities with a margin, at least 50 degrees each way.
    pub fn for_trip(trip: &Trip) -> Self {
        let coords = trip.cities().iter().map(|c| c.coordinate);
        let (mut min_lat, mut min_lng) = (f64::INFINITY, f64::INFINITY);
        let (mut max_lat, mut max_lng) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for c in coords {
            min_lat = min_lat.min(c.latitude);
            min_lng = min_lng.min(c.longitude);
            max_lat = max_lat.max(c.latitude);
            max_lng = max_lng.max(c.longitude);
        }

        let (min_lat, max_lat) = widen(min_lat - MARGIN_DEGREES, max_lat + MARGIN_DEGREES);
        let (min_lng, max_lng) = widen(min_lng - MARGIN_DEGREES, max_lng + MARGIN_DEGREES);

        Self {
            lower_left: Coordinate::new(min_lat, min_lng),
            upper_right: Coordinate::new(max_lat, max_lng),
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.upper_right.latitude - self.lower_left.latitude
    }

    pub fn lng_span(&self) -> f64 {
        self.upper_right.longitude - self.lower_left.longitude
    }
}

fn widen(low: f64, high: f64) -> (f64, f64) {
    let span = high - low;
    if span < MIN_SPAN_DEGREES {
        let pad = (MIN_SPAN_DEGREES - span) / 2.0;
        (low - pad, high + pad)
    } else {
        (low, high)
    }
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct MapStyle {
    pub projection: Projection,
    /// Image width in pixels; the height follows the projected aspect ratio.
    pub width: f64,
    pub line_width: f64,
    pub colour: String,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            projection: Projection::Mercator,
            width: 1000.0,
            line_width: 2.0,
            colour: "blue".to_string(),
        }
    }
}

impl MapStyle {
    pub fn with_projection(projection: Projection) -> Self {
        Self {
            projection,
            ..Self::default()
        }
    }
}

/// Maps projected coordinates onto the image.
struct Canvas {
    projection: Projection,
    x_min: f64,
    y_max: f64,
    scale: f64,
    width: f64,
    height: f64,
}

impl Canvas {
    fn new(bounds: &Bounds, style: &MapStyle) -> Self {
        let p = style.projection;
        let (x_min, y_min) = p.project(bounds.lower_left.latitude, bounds.lower_left.longitude);
        let (x_max, y_max) = p.project(bounds.upper_right.latitude, bounds.upper_right.longitude);
        let scale = style.width / (x_max - x_min);
        Self {
            projection: p,
            x_min,
            y_max,
            scale,
            width: style.width,
            height: (y_max - y_min) * scale,
        }
    }

    fn point(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let (x, y) = self.projection.project(latitude, longitude);
        ((x - self.x_min) * self.scale, (self.y_max - y) * self.scale)
    }
}

/// Points along the great circle between two coordinates, endpoints included.
///
/// Longitudes are unwrapped so the path has no jump at the antimeridian.
pub fn great_circle_path(from: &Coordinate, to: &Coordinate, segments: usize) -> Vec<Coordinate> {
    let a = to_unit_vector(from);
    let b = to_unit_vector(to);
    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2]).clamp(-1.0, 1.0);
    let omega = dot.acos();
    let segments = segments.max(1);
    // Antipodal endpoints have no unique great circle; head east from `from`.
    let degenerate = omega.sin().abs() < 1e-6;
    let antipodal = degenerate && dot < 0.0;
    let east = eastward(a);

    let mut points = Vec::with_capacity(segments + 1);
    let mut previous_lng = from.longitude;
    for step in 0..=segments {
        let t = step as f64 / segments as f64;
        let point = if antipodal {
            let (c, s) = ((t * PI).cos(), (t * PI).sin());
            from_unit_vector([
                c * a[0] + s * east[0],
                c * a[1] + s * east[1],
                c * a[2] + s * east[2],
            ])
        } else if degenerate {
            *from
        } else {
            let (wa, wb) = (
                ((1.0 - t) * omega).sin() / omega.sin(),
                (t * omega).sin() / omega.sin(),
            );
            from_unit_vector([
                wa * a[0] + wb * b[0],
                wa * a[1] + wb * b[1],
                wa * a[2] + wb * b[2],
            ])
        };

        let mut longitude = point.longitude;
        while longitude - previous_lng > 180.0 {
            longitude -= 360.0;
        }
        while longitude - previous_lng < -180.0 {
            longitude += 360.0;
        }
        previous_lng = longitude;
        points.push(Coordinate::new(point.latitude, longitude));
    }
    points
}

fn to_unit_vector(c: &Coordinate) -> [f64; 3] {
    let (lat, lng) = (c.latitude.to_radians(), c.longitude.to_radians());
    [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
}

/// Unit vector perpendicular to `v` pointing east. Poles have no east, so
/// they get the equator point at longitude zero.
fn eastward(v: [f64; 3]) -> [f64; 3] {
    let norm = (v[0] * v[0] + v[1] * v[1]).sqrt();
    if norm < 1e-12 {
        [1.0, 0.0, 0.0]
    } else {
        [-v[1] / norm, v[0] / norm, 0.0]
    }
}

fn from_unit_vector(v: [f64; 3]) -> Coordinate {
    let latitude = v[2].atan2((v[0] * v[0] + v[1] * v[1]).sqrt()).to_degrees();
    let longitude = v[1].atan2(v[0]).to_degrees();
    Coordinate::new(latitude, longitude)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the trip as an SVG document.
pub fn render_svg(trip: &Trip, style: &MapStyle) -> String {
    let bounds = Bounds::for_trip(trip);
    let canvas = Canvas::new(&bounds, style);
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.2} {h:.2}">"#,
        w = canvas.width,
        h = canvas.height
    );
    let _ = writeln!(svg, "  <title>{}</title>", escape_xml(&trip.to_string()));
    let _ = writeln!(
        svg,
        r##"  <rect x="0" y="0" width="100%" height="100%" fill="#eef5fb"/>"##
    );

    let _ = writeln!(svg, r##"  <g stroke="#b0c4d8" stroke-width="0.5">"##);
    let first_lat = (bounds.lower_left.latitude / 10.0).ceil() as i64 * 10;
    let first_lng = (bounds.lower_left.longitude / 10.0).ceil() as i64 * 10;
    for lat in (first_lat..=bounds.upper_right.latitude.floor() as i64).step_by(10) {
        let (x1, y) = canvas.point(lat as f64, bounds.lower_left.longitude);
        let (x2, _) = canvas.point(lat as f64, bounds.upper_right.longitude);
        let _ = writeln!(
            svg,
            r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            x1, y, x2, y
        );
    }
    for lng in (first_lng..=bounds.upper_right.longitude.floor() as i64).step_by(10) {
        let (x, y1) = canvas.point(bounds.upper_right.latitude, lng as f64);
        let (_, y2) = canvas.point(bounds.lower_left.latitude, lng as f64);
        let _ = writeln!(
            svg,
            r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            x, y1, x, y2
        );
    }
    let _ = writeln!(svg, "  </g>");

    for (from, to) in trip.legs() {
        let points: Vec<String> =
            great_circle_path(&from.coordinate, &to.coordinate, ARC_SEGMENTS)
                .iter()
                .map(|c| {
                    let (x, y) = canvas.point(c.latitude, c.longitude);
                    format!("{:.2},{:.2}", x, y)
                })
                .collect();
        let _ = writeln!(
            svg,
            r#"  <polyline class="leg" fill="none" stroke="{}" stroke-width="{}" points="{}"/>"#,
            escape_xml(&style.colour),
            style.line_width,
            points.join(" ")
        );
    }

    for city in trip.cities() {
        let (x, y) = canvas.point(city.coordinate.latitude, city.coordinate.longitude);
        let _ = writeln!(
            svg,
            r##"  <circle class="city" cx="{:.2}" cy="{:.2}" r="4" fill="#d62728"/>"##,
            x, y
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="12">{}</text>"#,
            x + 6.0,
            y - 6.0,
            escape_xml(&city.to_string())
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// File name for a trip's map: `map_<city1>_<city2>_..._<cityN>.svg`.
pub fn map_file_name(trip: &Trip) -> String {
    format!("map_{}.svg", trip.slug())
}

/// Render the trip and write it into `dir`, returning the file path.
pub fn export_trip(trip: &Trip, dir: &Path, style: &MapStyle) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(map_file_name(trip));
    fs::write(&path, render_svg(trip, style))?;
    tracing::info!("Exported {} to {}", trip, path.display());
    Ok(path)
}
