//! Eraser: removes path points near a sphere-surface point and re-splits
//! what remains into open linear sub-paths.

use crate::coord::Coordinate;
use crate::document::Document;
use crate::history::EditAction;
use crate::path::VectorPath;

/// Minimum number of points a surviving run needs to form a path.
const MIN_RUN_LENGTH: usize = 2;

/// Splits a single path around an eraser circle.
///
/// Returns `None` when no tessellated point lies strictly inside `radius`
/// degrees of `center`. Otherwise returns the surviving sub-paths in order,
/// each an open linear path inheriting style and terrain. Closure is not
/// preserved.
pub fn split_path(
    path: &VectorPath,
    center: &Coordinate,
    radius: f64,
    per_curve: usize,
) -> Option<Vec<VectorPath>> {
    let points = path.tessellate(per_curve);
    let erased: Vec<bool> = points.iter().map(|p| p.distance(center) < radius).collect();
    if !erased.contains(&true) {
        return None;
    }

    let mut results = Vec::new();
    let mut run: Vec<Coordinate> = Vec::new();
    for (point, is_erased) in points.into_iter().zip(erased) {
        if is_erased {
            flush_run(path, &mut run, &mut results);
        } else {
            run.push(point);
        }
    }
    flush_run(path, &mut run, &mut results);
    Some(results)
}

fn flush_run(source: &VectorPath, run: &mut Vec<Coordinate>, results: &mut Vec<VectorPath>) {
    let points = std::mem::take(run);
    if points.len() >= MIN_RUN_LENGTH {
        results.push(source.derive_linear(points));
    }
}

/// Erases around `center` in every visible, unlocked layer.
///
/// The document is mutated in place and one [`EditAction::SplitPath`] is
/// returned per affected path, ready to be recorded. Paths are processed
/// from the end of each layer so the recorded indices stay valid when the
/// actions are undone or redone in sequence.
pub fn erase_at(
    document: &mut Document,
    center: &Coordinate,
    radius: f64,
    per_curve: usize,
) -> Vec<EditAction> {
    let mut actions = Vec::new();
    if radius.is_nan() || radius <= 0.0 {
        return actions;
    }

    for layer_index in 0..document.layers.len() {
        let layer = &document.layers[layer_index];
        if !layer.is_editable() {
            continue;
        }

        let splits: Vec<(usize, Vec<VectorPath>)> = layer
            .paths
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(path_index, path)| {
                split_path(path, center, radius, per_curve).map(|results| (path_index, results))
            })
            .collect();

        for (path_index, results) in splits {
            let Some(mut replaced) =
                document.splice_paths(layer_index, path_index, 1, results.clone())
            else {
                continue;
            };
            let Some(original) = replaced.pop() else {
                continue;
            };
            tracing::debug!(
                "[erase] layer={} path={} split into {}",
                layer_index,
                path_index,
                results.len()
            );
            actions.push(EditAction::SplitPath {
                layer_index,
                path_index,
                original,
                results,
            });
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bezier::CubicSegment;
    use crate::history::EditHistory;
    use crate::path::{PathStyle, PathType, Rgba, TerrainType};

    fn ten_point_path() -> VectorPath {
        #[allow(clippy::cast_precision_loss)]
        let points = (0..10).map(|i| Coordinate::new(0.0, i as f64 * 2.0)).collect();
        let style = PathStyle {
            stroke_color: Rgba::rgb(0.2, 0.4, 0.8),
            stroke_width: 3.0,
            fill_color: None,
        };
        VectorPath::linear(points, style).with_terrain(Some(TerrainType::Water))
    }

    #[test]
    fn test_midpoint_erase_splits_in_two() {
        let path = ten_point_path();
        // Points at lon 8 and 10 are within 1.5°
        let results = split_path(&path, &Coordinate::new(0.0, 9.0), 1.5, 16).unwrap();
        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.path_type(), PathType::Linear);
            assert_eq!(r.style, path.style);
            assert_eq!(r.terrain, Some(TerrainType::Water));
            assert!(!r.is_closed);
            assert_ne!(r.id, path.id);
        }
        assert_eq!(results[0].point_count(), 4);
        assert_eq!(results[1].point_count(), 4);
    }

    #[test]
    fn test_untouched_path_returns_none() {
        let path = ten_point_path();
        assert!(split_path(&path, &Coordinate::new(45.0, 9.0), 5.0, 16).is_none());
    }

    #[test]
    fn test_short_runs_are_dropped() {
        let path = ten_point_path();
        // Erase everything but the first point
        let results = split_path(&path, &Coordinate::new(0.0, 11.0), 9.5, 16).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_closed_path_splits_open() {
        let path = ten_point_path().closed(true);
        let results = split_path(&path, &Coordinate::new(0.0, 0.0), 1.0, 16).unwrap();
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_closed);
        assert_eq!(results[0].point_count(), 9);
    }

    #[test]
    fn test_cubic_path_splits_into_linear() {
        let path = VectorPath::cubic(
            vec![CubicSegment::line(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 16.0))],
            PathStyle::default(),
        );
        let results = split_path(&path, &Coordinate::new(0.0, 8.0), 0.5, 16).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.path_type() == PathType::Linear));
    }

    #[test]
    fn test_erase_miss_leaves_document_unchanged() {
        let mut doc = Document::new("World");
        doc.push_path(0, ten_point_path());
        doc.push_path(0, ten_point_path().offset(10.0, 0.0));
        let before = doc.layers.clone();

        let actions = erase_at(&mut doc, &Coordinate::new(-60.0, 100.0), 3.0, 16);
        assert!(actions.is_empty());
        assert_eq!(doc.layers, before);
    }

    #[test]
    fn test_erase_skips_locked_and_hidden_layers() {
        let mut doc = Document::new("World");
        doc.push_path(0, ten_point_path());
        doc.layers[0].is_locked = true;
        assert!(erase_at(&mut doc, &Coordinate::new(0.0, 9.0), 1.5, 16).is_empty());

        doc.layers[0].is_locked = false;
        doc.layers[0].is_visible = false;
        assert!(erase_at(&mut doc, &Coordinate::new(0.0, 9.0), 1.5, 16).is_empty());
        assert_eq!(doc.layers[0].paths.len(), 1);
    }

    #[test]
    fn test_erase_multiple_paths_undo_in_sequence() {
        let mut doc = Document::new("World");
        let keep = ten_point_path().offset(40.0, 0.0);
        doc.push_path(0, ten_point_path());
        doc.push_path(0, keep.clone());
        doc.push_path(0, ten_point_path().offset(1.0, 0.0));
        let before = doc.layers.clone();

        let mut history = EditHistory::default();
        let actions = erase_at(&mut doc, &Coordinate::new(0.5, 9.0), 2.0, 16);
        assert_eq!(actions.len(), 2);
        for action in actions {
            history.record(action);
        }
        // [a0, a1, keep, b0, b1]
        assert_eq!(doc.layers[0].paths.len(), 5);
        assert_eq!(doc.layers[0].paths[2], keep);
        let after = doc.layers.clone();

        while history.undo(&mut doc) {}
        assert_eq!(doc.layers, before);

        while history.redo(&mut doc) {}
        assert_eq!(doc.layers, after);
    }
}
