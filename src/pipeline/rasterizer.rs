use glam::{I64Vec2, Vec2};

use super::Canvas;

/// Integer line stepping between two cells, endpoints included.
///
/// `plot` is called for every cell on the way, in order from `start` to
/// `end`, whether or not it lies on any canvas.
pub fn bresenham<F>(start: I64Vec2, end: I64Vec2, mut plot: F)
where
    F: FnMut(I64Vec2),
{
    let (mut x0, mut y0) = (start.x, start.y);
    let (x1, y1) = (end.x, end.y);

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        plot(I64Vec2::new(x0, y0));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Liang-Barsky clip of the segment `start..end` against the box
/// `min..=max`. `None` when nothing of the segment is inside.
///
/// Works in f64: endpoints can sit billions of cells away, where f32 has no
/// precision left for the parameter.
pub fn clip_segment(start: Vec2, end: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let (start, end) = (start.as_dvec2(), end.as_dvec2());
    let (min, max) = (min.as_dvec2(), max.as_dvec2());
    let d = end - start;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-d.x, start.x - min.x),
        (d.x, max.x - start.x),
        (-d.y, start.y - min.y),
        (d.y, max.y - start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some(((start + d * t0).as_vec2(), (start + d * t1).as_vec2()))
}

/// Box, in cells, that line endpoints are clipped to before stepping.
///
/// It extends one canvas size past every side, so the clipped endpoints are
/// always off screen and the visible cells match the unclipped line.
fn guard_band(canvas: &Canvas) -> (Vec2, Vec2) {
    let margin = canvas.width().max(canvas.height()) as f32;
    (
        Vec2::splat(-margin),
        Vec2::new(
            canvas.width() as f32 + margin,
            canvas.height() as f32 + margin,
        ),
    )
}

fn to_cell(p: Vec2) -> I64Vec2 {
    I64Vec2::new(p.x.round() as i64, p.y.round() as i64)
}

/// Draws a one-cell-wide line between two projected points.
///
/// Endpoints are rounded to the nearest cell. Cells off the canvas are
/// skipped, and lines with a non-finite endpoint are not drawn at all.
pub fn draw_line(canvas: &mut Canvas, start: Vec2, end: Vec2, ch: char) {
    if !start.is_finite() || !end.is_finite() {
        return;
    }

    let (min, max) = guard_band(canvas);
    let inside = |p: Vec2| p.cmpge(min).all() && p.cmple(max).all();
    let (start, end) = if inside(start) && inside(end) {
        (start, end)
    } else {
        match clip_segment(start, end, min, max) {
            Some(clipped) => clipped,
            None => return,
        }
    };

    bresenham(to_cell(start), to_cell(end), |p| {
        canvas.set(p.x, p.y, ch);
    });
}

/// One non-horizontal polygon side, directed from its top row to its bottom
/// row.
#[derive(Debug, Clone, Copy)]
struct EdgeEntry {
    y_min: i64,
    y_max: i64,
    /// x where the edge meets row `y_min`
    x_at_min: f32,
    inv_slope: f32,
}

#[derive(Debug, Clone, Copy)]
struct ActiveEdge {
    y_max: i64,
    x: f32,
    inv_slope: f32,
}

/// Scanline fill of the polygon `points` (projected corners in loop order)
/// with `ch`, using the even-odd rule.
///
/// Corners are rounded to cells first. An edge joins the active set on the
/// row of its upper end and leaves it on the row of its lower end, except on
/// the polygon's last row, which keeps the edges ending there so the bottom
/// boundary is filled too. Rows and columns are clipped to the canvas.
pub fn fill_polygon(canvas: &mut Canvas, points: &[Vec2], ch: char) {
    if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
        return;
    }

    let corners: Vec<I64Vec2> = points.iter().map(|&p| to_cell(p)).collect();

    let mut table: Vec<EdgeEntry> = corners
        .iter()
        .zip(corners.iter().cycle().skip(1))
        .filter(|(a, b)| a.y != b.y)
        .map(|(&a, &b)| {
            let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
            EdgeEntry {
                y_min: top.y,
                y_max: bottom.y,
                x_at_min: top.x as f32,
                inv_slope: (bottom.x - top.x) as f32 / (bottom.y - top.y) as f32,
            }
        })
        .collect();
    if table.is_empty() {
        // Flat polygon: a single row.
        let y = corners[0].y;
        let min_x = corners.iter().map(|c| c.x).min().unwrap_or_default();
        let max_x = corners.iter().map(|c| c.x).max().unwrap_or_default();
        fill_span(canvas, y, min_x, max_x, ch);
        return;
    }
    table.sort_by_key(|e| e.y_min);

    let poly_y_min = table[0].y_min;
    let poly_y_max = table.iter().map(|e| e.y_max).max().unwrap_or(poly_y_min);
    let first_row = poly_y_min.max(0);
    let last_row = poly_y_max.min(canvas.height() as i64 - 1);

    let mut next = 0;
    let mut active: Vec<ActiveEdge> = Vec::with_capacity(table.len());
    let mut crossings: Vec<f32> = Vec::with_capacity(table.len());

    for y in first_row..=last_row {
        while next < table.len() && table[next].y_min <= y {
            let e = table[next];
            active.push(ActiveEdge {
                y_max: e.y_max,
                x: e.x_at_min + (y - e.y_min) as f32 * e.inv_slope,
                inv_slope: e.inv_slope,
            });
            next += 1;
        }
        active.retain(|e| e.y_max > y || (e.y_max == y && y == poly_y_max));

        crossings.clear();
        crossings.extend(active.iter().map(|e| e.x));
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            fill_span(canvas, y, pair[0].round() as i64, pair[1].round() as i64, ch);
        }

        for e in &mut active {
            e.x += e.inv_slope;
        }
    }
}

/// Fills `x_start..=x_end` on row `y`, clipped to the canvas.
fn fill_span(canvas: &mut Canvas, y: i64, x_start: i64, x_end: i64, ch: char) {
    if !(0..canvas.height() as i64).contains(&y) {
        return;
    }
    let from = x_start.max(0);
    let to = x_end.min(canvas.width() as i64 - 1);
    for x in from..=to {
        canvas.set(x, y, ch);
    }
}
