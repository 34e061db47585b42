//! Debug logging for triangulation investigation
//!
//! Writes to `debug_marching_squares.log` in the working directory.
//! Nothing is written until `init_debug_log()` has been called; the file is
//! recreated on each call.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use godot::prelude::*;

use crate::marching_squares::CellFragment;

const DEBUG_LOG_PATH: &str = "debug_marching_squares.log";

lazy_static::lazy_static! {
    static ref DEBUG_LOG: Mutex<Option<File>> = Mutex::new(None);
}

static DEBUG_LOG_ENABLED: AtomicBool = AtomicBool::new(false);

/// True once `init_debug_log()` has opened the log file. Does not take the lock.
pub fn debug_log_enabled() -> bool {
    DEBUG_LOG_ENABLED.load(Ordering::Relaxed)
}

/// Log a debug message to the triangulation debug log file
pub fn debug_log(msg: &str) {
    if let Ok(mut guard) = DEBUG_LOG.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }
    }
}

/// Initialize the debug log file (overwrites any existing log)
pub fn init_debug_log() {
    if let Ok(mut guard) = DEBUG_LOG.lock() {
        *guard = File::create(DEBUG_LOG_PATH).ok();
        DEBUG_LOG_ENABLED.store(guard.is_some(), Ordering::Relaxed);
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "=== PIXY MARCHING SQUARES DEBUG LOG ===");
            let _ = writeln!(file, "Timestamp: {:?}", std::time::SystemTime::now());
            let _ = writeln!(file);
        }
    }
}

/// Statistics about triangle areas in a fragment
#[derive(Debug, PartialEq)]
pub struct AreaStats {
    pub min_area: f32,
    pub max_area: f32,
    pub total_area: f32,
    pub degenerate_count: usize,
}

/// Compute unsigned triangle area statistics.
/// A triangle is degenerate if its area is at or below `epsilon`.
pub fn compute_area_stats(fragment: &CellFragment, epsilon: f32) -> AreaStats {
    let mut min_area = f32::MAX;
    let mut max_area = f32::MIN;
    let mut total_area = 0.0;
    let mut degenerate_count = 0;

    for [a, b, c] in fragment.triangle_vertices() {
        let area = triangle_area(a, b, c);
        min_area = min_area.min(area);
        max_area = max_area.max(area);
        total_area += area;

        if area <= epsilon || area.is_nan() {
            degenerate_count += 1;
        }
    }

    if fragment.triangles.is_empty() {
        min_area = 0.0;
        max_area = 0.0;
    }

    AreaStats {
        min_area,
        max_area,
        total_area,
        degenerate_count,
    }
}

fn triangle_area(a: Vector3, b: Vector3, c: Vector3) -> f32 {
    (b - a).cross(c - a).length() * 0.5
}

/// Count vertices that appear at identical positions (within epsilon)
/// Returns the number of duplicate position groups found
pub fn count_duplicate_positions(vertices: &[Vector3], epsilon: f32) -> usize {
    // Quantize positions to grid cells for fast lookup
    let scale = 1.0 / epsilon;
    let mut position_counts: HashMap<(i64, i64, i64), usize> = HashMap::new();

    for v in vertices {
        let key = (
            (v.x * scale).round() as i64,
            (v.y * scale).round() as i64,
            (v.z * scale).round() as i64,
        );
        *position_counts.entry(key).or_insert(0) += 1;
    }

    position_counts.values().filter(|&&count| count > 1).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> CellFragment {
        CellFragment {
            vertices: vec![
                Vector3::new(1.0, 1.0, 0.0),
                Vector3::new(1.0, -1.0, 0.0),
                Vector3::new(-1.0, -1.0, 0.0),
                Vector3::new(-1.0, 1.0, 0.0),
            ],
            triangles: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_area_stats_full_square() {
        let stats = compute_area_stats(&quad(), 1e-6);
        assert_eq!(stats.degenerate_count, 0);
        assert!((stats.total_area - 4.0).abs() < 1e-6);
        assert!((stats.min_area - 2.0).abs() < 1e-6);
        assert!((stats.max_area - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_area_stats_empty_fragment() {
        let stats = compute_area_stats(&CellFragment::default(), 1e-6);
        assert_eq!(
            stats,
            AreaStats {
                min_area: 0.0,
                max_area: 0.0,
                total_area: 0.0,
                degenerate_count: 0,
            }
        );
    }

    #[test]
    fn test_area_stats_flags_repeated_vertex() {
        let top = Vector3::new(0.0, 1.0, 0.0);
        let fragment = CellFragment {
            vertices: vec![top, Vector3::new(1.0, 0.0, 0.0), top],
            triangles: vec![0, 1, 2],
        };
        let stats = compute_area_stats(&fragment, 1e-6);
        assert_eq!(stats.degenerate_count, 1);
    }

    #[test]
    fn test_count_duplicate_positions() {
        let v = Vector3::new(0.5, 0.25, 0.0);
        let vertices = [v, Vector3::new(1.0, 0.0, 0.0), v, v];
        assert_eq!(count_duplicate_positions(&vertices, 1e-4), 1);
        assert_eq!(count_duplicate_positions(&quad().vertices, 1e-4), 0);
    }

    #[test]
    fn test_distant_positions_are_not_duplicates() {
        // Past i32 range once scaled by 1 / 1e-5
        let vertices = [
            Vector3::new(30_000.0, 0.0, 0.0),
            Vector3::new(40_000.0, 0.0, 0.0),
            Vector3::new(-50_000.0, 25_000.0, 0.0),
            Vector3::new(-60_000.0, 25_000.0, 0.0),
        ];
        assert_eq!(count_duplicate_positions(&vertices, 1e-5), 0);
    }

    #[test]
    fn test_debug_log_without_init_is_noop() {
        // Must not panic or create a file when the log was never opened
        assert!(!debug_log_enabled());
        debug_log("ignored");
    }
}
