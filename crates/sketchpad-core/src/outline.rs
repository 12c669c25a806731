//! Pressure-sensitive outline generation for freehand strokes.
//!
//! Turns a polyline of pressure-tagged points into a closed polygon whose
//! width follows (simulated) pen pressure. Two passes: the raw points are
//! streamlined into evenly spaced stroke points carrying direction vectors
//! and running lengths, then left/right offset points are emitted around
//! them with rounded caps at the ends and at sharp corners.

use crate::input::InputPoint;
use kurbo::{Point, Vec2};

/// How quickly simulated pressure reacts to drawing speed.
const RATE_OF_PRESSURE_CHANGE: f64 = 0.275;

/// Slightly over PI so half-turn caps close without a seam.
const FIXED_PI: f64 = std::f64::consts::PI + 0.0001;

/// Segments in a start cap, corner cap or dot.
const CAP_STEPS: usize = 13;

/// Segments in the end cap.
const END_CAP_STEPS: usize = 29;

/// Parameters for [`stroke_outline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineOptions {
    /// Base diameter of the stroke.
    pub size: f64,
    /// How much pressure affects the width (0 = constant width).
    pub thinning: f64,
    /// Minimum spacing between emitted outline points, as a fraction of `size`.
    pub smoothing: f64,
    /// How strongly raw input is pulled towards the previous point.
    pub streamline: f64,
    /// Derive pressure from drawing speed instead of the device.
    pub simulate_pressure: bool,
    /// Whether the gesture has finished (the last raw point is used as-is).
    pub last: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
            simulate_pressure: true,
            last: false,
        }
    }
}

impl OutlineOptions {
    /// Fixed parameters used when rendering a stroke of the given width.
    pub fn for_stroke_width(width: f64) -> Self {
        Self {
            size: width,
            ..Self::default()
        }
    }
}

/// A streamlined point on the stroke's spine.
#[derive(Debug, Clone, Copy)]
struct SpinePoint {
    point: Point,
    pressure: f64,
    /// Unit vector pointing back towards the previous spine point.
    vector: Vec2,
    distance: f64,
    running_length: f64,
}

/// Compute the outline polygon for a stroke.
///
/// Missing pressure is treated as [`crate::input::DEFAULT_PRESSURE`].
/// Returns an empty outline for empty input or a non-positive size.
pub fn stroke_outline(points: &[InputPoint], options: &OutlineOptions) -> Vec<Point> {
    let raw: Vec<(Point, f64)> = points
        .iter()
        .map(|p| (p.position, p.pressure_or_default()))
        .collect();
    let spine = spine_points(&raw, options);
    outline_points(&spine, options)
}

fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len < f64::EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

fn rotate_around(p: Point, center: Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    let px = p.x - center.x;
    let py = p.y - center.y;
    Point::new(px * c - py * s + center.x, px * s + py * c + center.y)
}

fn stroke_radius(size: f64, thinning: f64, pressure: f64) -> f64 {
    size * (0.5 - thinning * (0.5 - pressure))
}

fn simulated_pressure(previous: f64, distance: f64, size: f64) -> f64 {
    let speed = (distance / size).min(1.0);
    let rate = (1.0 - speed).min(1.0);
    (previous + (rate - previous) * (speed * RATE_OF_PRESSURE_CHANGE)).min(1.0)
}

fn spine_points(raw: &[(Point, f64)], options: &OutlineOptions) -> Vec<SpinePoint> {
    if raw.is_empty() {
        return Vec::new();
    }

    let t = 0.15 + (1.0 - options.streamline) * 0.85;

    // Pad very short input so the stroke has a direction.
    let mut pts = raw.to_vec();
    if pts.len() == 1 {
        let (p, pressure) = pts[0];
        pts.push((p + Vec2::new(1.0, 1.0), pressure));
    } else if pts.len() == 2 {
        let (a, pa) = pts[0];
        let (b, pb) = pts[1];
        pts = (0..5)
            .map(|i| {
                let f = i as f64 / 4.0;
                (a.lerp(b, f), pa + (pb - pa) * f)
            })
            .collect();
    }

    let mut spine = vec![SpinePoint {
        point: pts[0].0,
        pressure: pts[0].1,
        vector: Vec2::new(1.0, 1.0),
        distance: 0.0,
        running_length: 0.0,
    }];

    let max = pts.len() - 1;
    let mut reached_minimum_length = false;
    let mut running_length = 0.0;

    for (i, &(raw_point, pressure)) in pts.iter().enumerate().skip(1) {
        let prev = spine[spine.len() - 1].point;
        let point = if options.last && i == max {
            raw_point
        } else {
            prev.lerp(raw_point, t)
        };
        if point == prev {
            continue;
        }

        let distance = point.distance(prev);
        running_length += distance;

        // Skip jitter at the very start of a stroke.
        if i < max && !reached_minimum_length {
            if running_length < options.size {
                continue;
            }
            reached_minimum_length = true;
        }

        spine.push(SpinePoint {
            point,
            pressure,
            vector: unit(prev - point),
            distance,
            running_length,
        });
    }

    spine[0].vector = spine.get(1).map(|p| p.vector).unwrap_or(Vec2::ZERO);
    spine
}

fn outline_points(spine: &[SpinePoint], options: &OutlineOptions) -> Vec<Point> {
    let size = options.size;
    let thinning = options.thinning;

    if spine.is_empty() || size <= 0.0 {
        return Vec::new();
    }

    let last_index = spine.len() - 1;
    let total_length = spine[last_index].running_length;
    let min_distance = (size * options.smoothing).powi(2);

    let mut left: Vec<Point> = Vec::new();
    let mut right: Vec<Point> = Vec::new();

    // Seed simulated pressure from the first few points so the stroke
    // doesn't start with a blob.
    let mut prev_pressure = spine.iter().take(10).fold(spine[0].pressure, |acc, sp| {
        let pressure = if options.simulate_pressure {
            simulated_pressure(acc, sp.distance, size)
        } else {
            sp.pressure
        };
        (acc + pressure) / 2.0
    });

    let mut radius = stroke_radius(size, thinning, spine[last_index].pressure);
    let mut first_radius: Option<f64> = None;
    let mut prev_vector = spine[0].vector;
    let mut pl = spine[0].point;
    let mut pr = pl;
    let mut prev_was_sharp = false;

    for (i, sp) in spine.iter().enumerate() {
        let is_last = i == last_index;

        // Points too close to the end are covered by the end cap.
        if !is_last && total_length - sp.running_length < 3.0 {
            continue;
        }

        let mut pressure = sp.pressure;
        if thinning != 0.0 {
            if options.simulate_pressure {
                pressure = simulated_pressure(prev_pressure, sp.distance, size);
            }
            radius = stroke_radius(size, thinning, pressure);
        } else {
            radius = size / 2.0;
        }
        if first_radius.is_none() {
            first_radius = Some(radius);
        }
        radius = radius.max(0.01);

        let next_vector = if is_last { sp.vector } else { spine[i + 1].vector };
        let next_dot = if is_last { 1.0 } else { sp.vector.dot(next_vector) };
        let prev_dot = sp.vector.dot(prev_vector);

        let is_sharp = prev_dot < 0.0 && !prev_was_sharp;
        let next_is_sharp = next_dot < 0.0;

        if is_sharp || next_is_sharp {
            // Round the corner with a half turn on each side.
            let offset = perpendicular(prev_vector) * radius;
            for step in 0..=CAP_STEPS {
                let t = step as f64 / CAP_STEPS as f64;
                pl = rotate_around(sp.point - offset, sp.point, FIXED_PI * t);
                left.push(pl);
                pr = rotate_around(sp.point + offset, sp.point, -FIXED_PI * t);
                right.push(pr);
            }
            if next_is_sharp {
                prev_was_sharp = true;
            }
            continue;
        }
        prev_was_sharp = false;

        if is_last {
            let offset = perpendicular(sp.vector) * radius;
            left.push(sp.point - offset);
            right.push(sp.point + offset);
            continue;
        }

        let offset = perpendicular(next_vector.lerp(sp.vector, next_dot)) * radius;

        let tl = sp.point - offset;
        if i <= 1 || (pl - tl).hypot2() > min_distance {
            left.push(tl);
            pl = tl;
        }

        let tr = sp.point + offset;
        if i <= 1 || (pr - tr).hypot2() > min_distance {
            right.push(tr);
            pr = tr;
        }

        prev_pressure = pressure;
        prev_vector = sp.vector;
    }

    let first_point = spine[0].point;
    let last_point = if spine.len() > 1 {
        spine[last_index].point
    } else {
        first_point + Vec2::new(1.0, 1.0)
    };

    // A lone point becomes a dot.
    if spine.len() == 1 {
        let r = first_radius.unwrap_or(radius);
        let direction = unit(perpendicular(first_point - last_point));
        let start = first_point - direction * r;
        return (1..=CAP_STEPS)
            .map(|step| {
                let t = step as f64 / CAP_STEPS as f64;
                rotate_around(start, first_point, FIXED_PI * 2.0 * t)
            })
            .collect();
    }

    let mut start_cap = Vec::with_capacity(CAP_STEPS + 1);
    if let Some(&anchor) = right.first() {
        for step in 0..=CAP_STEPS {
            let t = step as f64 / CAP_STEPS as f64;
            start_cap.push(rotate_around(anchor, first_point, FIXED_PI * t));
        }
    }

    let direction = perpendicular(-spine[last_index].vector);
    let end_start = last_point + direction * radius;
    let end_cap = (1..END_CAP_STEPS).map(|step| {
        let t = step as f64 / END_CAP_STEPS as f64;
        rotate_around(end_start, last_point, FIXED_PI * 3.0 * t)
    });

    let mut outline = left;
    outline.extend(end_cap);
    outline.extend(right.into_iter().rev());
    outline.extend(start_cap);
    outline
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<InputPoint> {
        coords
            .iter()
            .map(|&(x, y)| InputPoint::new(Point::new(x, y), None, 0))
            .collect()
    }

    fn max_distance(outline: &[Point], from: Point) -> f64 {
        outline.iter().map(|p| p.distance(from)).fold(0.0, f64::max)
    }

    #[test]
    fn test_empty_input() {
        let outline = stroke_outline(&[], &OutlineOptions::default());
        assert!(outline.is_empty());
    }

    #[test]
    fn test_non_positive_size() {
        let options = OutlineOptions::for_stroke_width(0.0);
        let outline = stroke_outline(&points(&[(0.0, 0.0), (10.0, 10.0)]), &options);
        assert!(outline.is_empty());
    }

    #[test]
    fn test_single_point_produces_dot() {
        let options = OutlineOptions::for_stroke_width(4.0);
        let outline = stroke_outline(&points(&[(50.0, 50.0)]), &options);
        assert!(!outline.is_empty());
        assert!(max_distance(&outline, Point::new(50.0, 50.0)) <= 4.0 + 2.0);
    }

    #[test]
    fn test_outline_stays_near_horizontal_line() {
        let options = OutlineOptions::for_stroke_width(4.0);
        let input = points(&[(0.0, 0.0), (25.0, 0.0), (50.0, 0.0), (75.0, 0.0), (100.0, 0.0)]);
        let outline = stroke_outline(&input, &options);

        assert!(outline.len() > CAP_STEPS);
        for p in &outline {
            assert!(p.y.abs() <= 4.0, "outline point {p:?} too far from the line");
            assert!(p.x >= -4.0 && p.x <= 104.0);
        }
        // The outline spans both sides of the spine.
        assert!(outline.iter().any(|p| p.y > 0.5));
        assert!(outline.iter().any(|p| p.y < -0.5));
    }

    #[test]
    fn test_wider_stroke_gives_wider_outline() {
        let input = points(&[(0.0, 0.0), (30.0, 0.0), (60.0, 0.0), (90.0, 0.0)]);
        let thin = stroke_outline(&input, &OutlineOptions::for_stroke_width(1.0));
        let thick = stroke_outline(&input, &OutlineOptions::for_stroke_width(5.0));

        let spread = |o: &[Point]| o.iter().map(|p| p.y.abs()).fold(0.0, f64::max);
        assert!(spread(&thick) > spread(&thin));
    }

    #[test]
    fn test_rotate_around() {
        let p = rotate_around(Point::new(1.0, 0.0), Point::ZERO, std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }
}
