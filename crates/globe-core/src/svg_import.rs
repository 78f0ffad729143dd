//! Imports coastlines from SVG maps drawn in a Mercator-style frame.
//!
//! SVG documents are reduced to the `d` attributes of their `<path>`
//! elements. Moves, cubic curves and straight lines are converted; straight
//! lines become cubic segments with evenly spaced control points so every
//! imported path is cubic.

use std::path::{Path, PathBuf};

use crate::bezier::CubicSegment;
use crate::coord::{Coordinate, SERIALIZED_DECIMALS, round_to};
use crate::document::Document;
use crate::path::{PathStyle, VectorPath};

/// Endpoints closer than this (in degrees) need no explicit closing segment.
const CLOSE_GAP: f64 = 0.01;

/// Namespace of SVG elements.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid number {text:?} at offset {offset}")]
    InvalidNumber { offset: usize, text: String },
    #[error("Command '{command}' at offset {offset} has no current point")]
    MissingStart { offset: usize, command: char },
    #[error("Invalid SVG document: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Maps SVG user space to latitude and longitude.
///
/// `x` spans `[-lon_range, lon_range]` across the frame width, `y` spans
/// `[lat_range, -lat_range]` down the frame height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorFrame {
    pub width: f64,
    pub height: f64,
    pub lon_range: f64,
    pub lat_range: f64,
}

impl Default for MercatorFrame {
    fn default() -> Self {
        Self {
            width: 4170.0,
            height: 1668.0,
            lon_range: 180.0,
            lat_range: 72.0,
        }
    }
}

impl MercatorFrame {
    /// Horizontal shift for the eastern-hemisphere sheet.
    pub const INNER_SHIFT: f64 = -69.5;
    /// Horizontal shift for the western-hemisphere sheet.
    pub const OUTER_SHIFT: f64 = 2015.5;

    /// Converts an SVG point to unwrapped `(lat, lon)` degrees.
    ///
    /// Latitude is clamped to the frame range. Both values are rounded to the
    /// persisted precision.
    fn geo_point(&self, x: f64, y: f64, shift: f64) -> (f64, f64) {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let lon = (x + shift - half_w) * (self.lon_range / half_w);
        let lat = (-(y - half_h) * (self.lat_range / half_h)).clamp(-self.lat_range, self.lat_range);
        (round_to(lat, SERIALIZED_DECIMALS), round_to(lon, SERIALIZED_DECIMALS))
    }

    pub fn coordinate_at(&self, x: f64, y: f64, shift: f64) -> Coordinate {
        let (lat, lon) = self.geo_point(x, y, shift);
        Coordinate::new(lat, lon)
    }
}

/// One command letter and its numeric arguments.
#[derive(Debug, Clone, PartialEq)]
struct Command {
    letter: char,
    offset: usize,
    args: Vec<f64>,
}

fn is_command_letter(c: char) -> bool {
    c.is_ascii_alphabetic() && c != 'e' && c != 'E'
}

/// Splits path data into commands.
///
/// Numbers may carry a sign, a fraction with or without leading digits and an
/// exponent. A sign or a second decimal point starts a new number, so
/// `"1.5.5-2"` reads as `1.5 0.5 -2`.
fn tokenize(d: &str) -> Result<Vec<Command>, ImportError> {
    let bytes = d.as_bytes();
    let mut commands: Vec<Command> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = char::from(bytes[i]);
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
        } else if is_command_letter(c) {
            commands.push(Command {
                letter: c,
                offset: i,
                args: Vec::new(),
            });
            i += 1;
        } else {
            let (value, end) = lex_number(d, i)?;
            // Numbers before the first command have nowhere to go
            match commands.last_mut() {
                Some(command) => command.args.push(value),
                None => {
                    return Err(ImportError::MissingStart {
                        offset: i,
                        command: c,
                    });
                }
            }
            i = end;
        }
    }

    Ok(commands)
}

fn lex_number(d: &str, start: usize) -> Result<(f64, usize), ImportError> {
    let bytes = d.as_bytes();
    let mut i = start;
    let digits = |i: &mut usize| {
        let begin = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > begin
    };

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mut has_digits = digits(&mut i);
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        has_digits |= digits(&mut i);
    }
    if has_digits && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if digits(&mut j) {
            i = j;
        } else {
            return Err(invalid_number(d, start, j.max(start + 1)));
        }
    }

    if !has_digits {
        return Err(invalid_number(d, start, i.max(start + 1)));
    }
    d[start..i]
        .parse::<f64>()
        .map(|value| (value, i))
        .map_err(|_| invalid_number(d, start, i))
}

fn invalid_number(d: &str, start: usize, end: usize) -> ImportError {
    let end = end.min(d.len());
    ImportError::InvalidNumber {
        offset: start,
        text: d.get(start..end).unwrap_or_default().to_string(),
    }
}

/// A sub-path under construction, tracked in unwrapped degrees.
struct SubPath {
    segments: Vec<CubicSegment>,
    start: (f64, f64),
    current: (f64, f64),
    is_closed: bool,
}

impl SubPath {
    fn new(start: (f64, f64)) -> Self {
        Self {
            segments: Vec::new(),
            start,
            current: start,
            is_closed: false,
        }
    }

    fn curve_to(&mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) {
        self.segments.push(CubicSegment::new(
            geo(self.current),
            geo(c1),
            geo(c2),
            geo(end),
        ));
        self.current = end;
    }

    /// Straight segment with controls interpolated before longitude wrapping,
    /// so lines crossing the antimeridian keep their short direction.
    fn line_to(&mut self, end: (f64, f64)) {
        let p0 = self.current;
        let d = (end.0 - p0.0, end.1 - p0.1);
        let c1 = (p0.0 + d.0 / 3.0, p0.1 + d.1 / 3.0);
        let c2 = (p0.0 + d.0 * 2.0 / 3.0, p0.1 + d.1 * 2.0 / 3.0);
        self.curve_to(c1, c2, end);
    }

    fn close(&mut self) {
        let gap = (self.start.0 - self.current.0).hypot(self.start.1 - self.current.1);
        if gap > CLOSE_GAP {
            self.line_to(self.start);
        }
        self.is_closed = true;
    }

    fn finish(self, style: PathStyle, out: &mut Vec<VectorPath>) {
        if !self.segments.is_empty() {
            out.push(VectorPath::cubic(self.segments, style).closed(self.is_closed));
        }
    }
}

fn geo((lat, lon): (f64, f64)) -> Coordinate {
    Coordinate::new(lat, lon)
}

/// Converts one SVG `d` attribute into cubic paths.
///
/// Each moveto starts a new path; sub-paths without segments are dropped.
/// Unsupported commands (`S`, `Q`, `T`, `A`) are skipped with a warning.
pub fn import_path_data(
    d: &str,
    shift: f64,
    frame: &MercatorFrame,
    style: PathStyle,
) -> Result<Vec<VectorPath>, ImportError> {
    let commands = tokenize(d)?;
    let mut paths = Vec::new();
    let mut current: Option<SubPath> = None;
    // Pen position in SVG user space
    let mut pen = (0.0_f64, 0.0_f64);
    let mut subpath_start = pen;

    for Command {
        letter,
        offset,
        args,
    } in commands
    {
        let relative = letter.is_ascii_lowercase();
        let origin = |pen: (f64, f64)| if relative { pen } else { (0.0, 0.0) };

        match letter.to_ascii_uppercase() {
            'M' => {
                let mut pairs = args.chunks_exact(2);
                let Some(first) = pairs.next() else {
                    continue;
                };
                if let Some(done) = current.take() {
                    done.finish(style, &mut paths);
                }
                let o = origin(pen);
                pen = (o.0 + first[0], o.1 + first[1]);
                subpath_start = pen;
                let mut sub = SubPath::new(frame.geo_point(pen.0, pen.1, shift));
                for pair in pairs {
                    let o = origin(pen);
                    pen = (o.0 + pair[0], o.1 + pair[1]);
                    sub.line_to(frame.geo_point(pen.0, pen.1, shift));
                }
                current = Some(sub);
            }
            'C' => {
                let sub = open_subpath(&mut current, &mut paths, style, letter, offset)?;
                for chunk in args.chunks_exact(6) {
                    let o = origin(pen);
                    let c1 = frame.geo_point(o.0 + chunk[0], o.1 + chunk[1], shift);
                    let c2 = frame.geo_point(o.0 + chunk[2], o.1 + chunk[3], shift);
                    pen = (o.0 + chunk[4], o.1 + chunk[5]);
                    sub.curve_to(c1, c2, frame.geo_point(pen.0, pen.1, shift));
                }
            }
            'L' => {
                let sub = open_subpath(&mut current, &mut paths, style, letter, offset)?;
                for pair in args.chunks_exact(2) {
                    let o = origin(pen);
                    pen = (o.0 + pair[0], o.1 + pair[1]);
                    sub.line_to(frame.geo_point(pen.0, pen.1, shift));
                }
            }
            'H' => {
                let sub = open_subpath(&mut current, &mut paths, style, letter, offset)?;
                for &x in &args {
                    pen.0 = origin(pen).0 + x;
                    sub.line_to(frame.geo_point(pen.0, pen.1, shift));
                }
            }
            'V' => {
                let sub = open_subpath(&mut current, &mut paths, style, letter, offset)?;
                for &y in &args {
                    pen.1 = origin(pen).1 + y;
                    sub.line_to(frame.geo_point(pen.0, pen.1, shift));
                }
            }
            'Z' => {
                if let Some(sub) = current.as_mut() {
                    sub.close();
                }
                pen = subpath_start;
            }
            _ => {
                tracing::warn!("[import] skipping unsupported command '{}' at {}", letter, offset);
            }
        }
    }

    if let Some(done) = current.take() {
        done.finish(style, &mut paths);
    }
    Ok(paths)
}

/// Returns the sub-path a drawing command extends.
///
/// Drawing after a close starts a fresh sub-path at the closed one's start.
fn open_subpath<'a>(
    current: &'a mut Option<SubPath>,
    paths: &mut Vec<VectorPath>,
    style: PathStyle,
    command: char,
    offset: usize,
) -> Result<&'a mut SubPath, ImportError> {
    let Some(sub) = current.take() else {
        return Err(ImportError::MissingStart { offset, command });
    };
    let sub = if sub.is_closed {
        let start = sub.start;
        sub.finish(style, paths);
        SubPath::new(start)
    } else {
        sub
    };
    Ok(current.insert(sub))
}

/// Converts many `d` attributes drawn with the same shift.
pub fn import_path_list<'a>(
    data: impl IntoIterator<Item = &'a str>,
    shift: f64,
    frame: &MercatorFrame,
    style: PathStyle,
) -> Result<Vec<VectorPath>, ImportError> {
    let mut paths = Vec::new();
    for d in data {
        paths.extend(import_path_data(d, shift, frame, style)?);
    }
    Ok(paths)
}

/// Collects the non-empty `d` attributes of an SVG document's paths.
///
/// `<path>` elements in the SVG namespace are preferred. Files without any
/// fall back to every element whose local name ends in `path`, which covers
/// exports that drop the namespace declaration.
pub fn extract_path_data(svg: &str) -> Result<Vec<String>, ImportError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(svg, options)?;

    let data = collect_path_data(&xml, |namespace, name| namespace == Some(SVG_NAMESPACE) && name == "path");
    if !data.is_empty() {
        return Ok(data);
    }
    Ok(collect_path_data(&xml, |_, name| name.ends_with("path")))
}

fn collect_path_data(xml: &roxmltree::Document<'_>, is_path: impl Fn(Option<&str>, &str) -> bool) -> Vec<String> {
    xml.descendants()
        .filter(|node| node.is_element() && is_path(node.tag_name().namespace(), node.tag_name().name()))
        .filter_map(|node| node.attribute("d"))
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads an SVG file and returns its path data.
pub fn read_svg_paths(path: &Path) -> Result<Vec<String>, ImportError> {
    let svg = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = extract_path_data(&svg)?;
    tracing::info!("[import] {}: {} svg paths", path.display(), data.len());
    Ok(data)
}

/// Builds a document from the inner and outer hemisphere SVG files.
///
/// Either sheet may be omitted. Write the result with [`Document::save`].
pub fn document_from_svg_files(
    name: &str,
    inner: Option<&Path>,
    outer: Option<&Path>,
) -> Result<Document, ImportError> {
    let inner = inner.map(read_svg_paths).transpose()?.unwrap_or_default();
    let outer = outer.map(read_svg_paths).transpose()?.unwrap_or_default();
    let inner: Vec<&str> = inner.iter().map(String::as_str).collect();
    let outer: Vec<&str> = outer.iter().map(String::as_str).collect();
    document_from_svg(name, &inner, &outer)
}

/// Builds a document from the inner and outer hemisphere sheets.
///
/// All imported paths land in a single "Coastlines" layer with the default
/// coastline style.
pub fn document_from_svg(
    name: &str,
    inner: &[&str],
    outer: &[&str],
) -> Result<Document, ImportError> {
    let frame = MercatorFrame::default();
    let style = PathStyle::default();
    let mut document = Document::new(name);

    for (sheet, shift) in [
        (inner, MercatorFrame::INNER_SHIFT),
        (outer, MercatorFrame::OUTER_SHIFT),
    ] {
        let paths = import_path_list(sheet.iter().copied(), shift, &frame, style)?;
        let curves: usize = paths.iter().map(VectorPath::segment_count).sum();
        tracing::info!(
            "[import] {} svg paths -> {} paths with {} curves",
            sheet.len(),
            paths.len(),
            curves
        );
        document.layers[0].paths.extend(paths);
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathType;

    fn frame() -> MercatorFrame {
        MercatorFrame::default()
    }

    #[test]
    fn test_frame_center_and_edges() {
        let f = frame();
        let c = f.coordinate_at(2085.0, 834.0, 0.0);
        assert!(c.lat().abs() < 1e-9 && c.lon().abs() < 1e-9);

        let top_left = f.coordinate_at(0.0, 0.0, 0.0);
        assert!((top_left.lat() - 72.0).abs() < 1e-9);
        assert!((top_left.lon() + 180.0).abs() < 1e-9);

        // Beyond the frame latitude stays clamped
        let below = f.coordinate_at(2085.0, 5000.0, 0.0);
        assert!((below.lat() + 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_shift_moves_longitude() {
        let f = frame();
        let c = f.coordinate_at(2085.0 - MercatorFrame::INNER_SHIFT, 834.0, MercatorFrame::INNER_SHIFT);
        assert!(c.lon().abs() < 1e-9);
    }

    #[test]
    fn test_tokenize_numbers() {
        let commands = tokenize("M1.5.5-2,3e2 .25 L-1E-1 +4").unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].letter, 'M');
        assert_eq!(commands[0].args, vec![1.5, 0.5, -2.0, 300.0, 0.25]);
        assert_eq!(commands[1].args, vec![-0.1, 4.0]);
    }

    #[test]
    fn test_tokenize_rejects_malformed_numbers() {
        assert!(matches!(
            tokenize("M 10 - 5"),
            Err(ImportError::InvalidNumber { offset: 5, .. })
        ));
        assert!(matches!(tokenize("M 1e+"), Err(ImportError::InvalidNumber { .. })));
        assert!(matches!(tokenize("M . 1"), Err(ImportError::InvalidNumber { .. })));
        assert!(matches!(tokenize("10 20"), Err(ImportError::MissingStart { .. })));
    }

    #[test]
    fn test_import_cubic_and_lines() {
        let d = "M 2085 834 C 2100 834 2110 820 2120 800 L 2130 800 h 10 v 10";
        let paths = import_path_data(d, 0.0, &frame(), PathStyle::default()).unwrap();
        assert_eq!(paths.len(), 1);
        let path = &paths[0];
        assert_eq!(path.path_type(), PathType::Cubic);
        assert_eq!(path.segment_count(), 4);
        assert!(!path.is_closed);

        let crate::path::PathGeometry::Cubic { cubic_segments } = &path.geometry else {
            panic!("expected cubic geometry");
        };
        let first = &cubic_segments[0];
        assert_eq!(first.start, Coordinate::new(0.0, 0.0));
        assert_eq!(first.end, frame().coordinate_at(2120.0, 800.0, 0.0));
        // Segments chain end to start
        for pair in cubic_segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        // h moved right by 10 from 2130, v moved down by 10
        assert_eq!(cubic_segments[2].end, frame().coordinate_at(2140.0, 800.0, 0.0));
        assert_eq!(cubic_segments[3].end, frame().coordinate_at(2140.0, 810.0, 0.0));
    }

    #[test]
    fn test_relative_curve() {
        let abs = import_path_data("M 100 100 C 110 100 120 110 130 130", 0.0, &frame(), PathStyle::default()).unwrap();
        let rel = import_path_data("m 100 100 c 10 0 20 10 30 30", 0.0, &frame(), PathStyle::default()).unwrap();
        assert_eq!(abs[0].geometry, rel[0].geometry);
    }

    #[test]
    fn test_close_adds_segment_when_gap_is_large() {
        let open = "M 100 100 L 200 100 L 200 200 Z";
        let paths = import_path_data(open, 0.0, &frame(), PathStyle::default()).unwrap();
        assert!(paths[0].is_closed);
        assert_eq!(paths[0].segment_count(), 3);

        let already = "M 100 100 L 200 100 L 100 100 z";
        let paths = import_path_data(already, 0.0, &frame(), PathStyle::default()).unwrap();
        assert!(paths[0].is_closed);
        assert_eq!(paths[0].segment_count(), 2);
    }

    #[test]
    fn test_moveto_splits_paths_and_drops_empty() {
        let d = "M 0 0 M 10 10 L 20 20 M 30 30 l 5 5 5 5 M 40 40";
        let paths = import_path_data(d, 0.0, &frame(), PathStyle::default()).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].segment_count(), 1);
        assert_eq!(paths[1].segment_count(), 2);
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let d = "M 10 10 20 20 30 30";
        let paths = import_path_data(d, 0.0, &frame(), PathStyle::default()).unwrap();
        assert_eq!(paths[0].segment_count(), 2);
    }

    #[test]
    fn test_drawing_after_close_starts_new_path() {
        let d = "M 10 10 L 50 10 L 50 50 Z L 90 90";
        let paths = import_path_data(d, 0.0, &frame(), PathStyle::default()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].is_closed);
        assert!(!paths[1].is_closed);
        let crate::path::PathGeometry::Cubic { cubic_segments } = &paths[1].geometry else {
            panic!("expected cubic geometry");
        };
        assert_eq!(cubic_segments[0].start, frame().coordinate_at(10.0, 10.0, 0.0));
    }

    #[test]
    fn test_unsupported_commands_are_skipped() {
        let d = "M 10 10 Q 20 20 30 30 L 40 40";
        let paths = import_path_data(d, 0.0, &frame(), PathStyle::default()).unwrap();
        assert_eq!(paths[0].segment_count(), 1);
    }

    #[test]
    fn test_line_before_move_is_an_error() {
        let err = import_path_data("L 10 10", 0.0, &frame(), PathStyle::default()).unwrap_err();
        assert!(matches!(err, ImportError::MissingStart { offset: 0, command: 'L' }));
    }

    #[test]
    fn test_imported_coordinates_are_rounded() {
        let paths = import_path_data("M 1.23456789 2.3456789 L 3 4", 0.0, &frame(), PathStyle::default()).unwrap();
        let points = paths[0].tessellate(1);
        for p in points {
            assert!((p.lat() - round_to(p.lat(), 4)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_document_from_svg() {
        let inner = ["M 100 100 L 200 200", "M 300 300 C 310 300 320 310 330 330"];
        let outer = ["M 100 100 L 200 100 L 200 200 Z"];
        let doc = document_from_svg("World", &inner, &outer).unwrap();
        assert_eq!(doc.layers.len(), 1);
        assert_eq!(doc.layers[0].name, "Coastlines");
        assert_eq!(doc.layers[0].paths.len(), 3);
        assert_eq!(doc.meta.name, "World");
        assert!(doc.layers[0].paths[2].is_closed);
    }

    #[test]
    fn test_extract_namespaced_paths() {
        let svg = r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" xmlns:x="urn:other" width="4170" height="1668">
  <g id="land">
    <path d="M 100 100 L 200 200"/>
    <path d=""/>
    <x:path d="M 1 1 L 2 2"/>
  </g>
  <rect width="10" height="10"/>
  <path d="M 300 300 C 310 300 320 310 330 330"/>
</svg>"#;
        let data = extract_path_data(svg).unwrap();
        assert_eq!(data, vec!["M 100 100 L 200 200", "M 300 300 C 310 300 320 310 330 330"]);
    }

    #[test]
    fn test_extract_paths_without_namespace() {
        let svg = r#"<svg width="4170" height="1668">
  <g><path d="M 100 100 L 200 200"/></g>
  <svg:path xmlns:svg="urn:not-svg" d="M 5 5 L 6 6"/>
  <circle r="3"/>
</svg>"#;
        let data = extract_path_data(svg).unwrap();
        assert_eq!(data, vec!["M 100 100 L 200 200", "M 5 5 L 6 6"]);
    }

    #[test]
    fn test_extract_invalid_xml() {
        assert!(matches!(extract_path_data("<svg><path d=\"M 0 0\">"), Err(ImportError::Xml(_))));
        assert!(extract_path_data("<svg/>").unwrap().is_empty());
    }

    #[test]
    fn test_document_from_svg_files() {
        let dir = std::env::temp_dir();
        let id = uuid::Uuid::new_v4();
        let inner_path = dir.join(format!("inner-{id}.svg"));
        let outer_path = dir.join(format!("outer-{id}.svg"));
        let globe_path = dir.join(format!("world-{id}.globe"));
        std::fs::write(
            &inner_path,
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M 100 100 L 200 200"/></svg>"#,
        )
        .unwrap();
        std::fs::write(&outer_path, r#"<svg><path d="M 100 100 L 200 100 L 200 200 Z"/></svg>"#).unwrap();

        let doc = document_from_svg_files("World", Some(&inner_path), Some(&outer_path)).unwrap();
        assert_eq!(doc.layers[0].paths.len(), 2);
        assert!(doc.layers[0].paths[1].is_closed);

        doc.save(&globe_path).unwrap();
        let loaded = Document::load(&globe_path).unwrap();
        assert_eq!(loaded.meta.name, "World");
        assert_eq!(loaded.layers[0].paths.len(), 2);

        let inner_only = document_from_svg_files("Inner", Some(&inner_path), None).unwrap();
        assert_eq!(inner_only.layers[0].paths.len(), 1);

        for path in [&inner_path, &outer_path, &globe_path] {
            std::fs::remove_file(path).unwrap();
        }
        let err = document_from_svg_files("World", Some(&inner_path), None).unwrap_err();
        assert!(matches!(err, ImportError::Io { ref path, .. } if *path == inner_path));
    }
}
