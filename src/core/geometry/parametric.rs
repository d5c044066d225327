use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::{Edge, Face, Shape};

/// Latitude/longitude sphere.
///
/// Vertex `ring * segments + segment` sits at polar angle `PI * ring / rings`
/// and azimuth `TAU * segment / segments`, so there are `(rings + 1) * segments`
/// vertices and both pole rings collapse to a point.
pub fn sphere(center: Vec3, radius: f32, segments: usize, rings: usize) -> Shape {
    let mut vertices = Vec::with_capacity((rings + 1) * segments);
    for i in 0..=rings {
        let theta = PI * i as f32 / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for j in 0..segments {
            let phi = TAU * j as f32 / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            vertices.push(
                center
                    + radius * Vec3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta),
            );
        }
    }

    let mut edges: Vec<Edge> = Vec::with_capacity(2 * rings * segments);
    let mut faces = Vec::with_capacity(rings * segments);
    for i in 0..rings {
        for j in 0..segments {
            let current = i * segments + j;
            let next_segment = i * segments + (j + 1) % segments;
            let next_ring = current + segments;
            let next_both = next_segment + segments;

            edges.push((current, next_ring));
            edges.push((current, next_segment));

            // Cells touching a pole lose their collapsed side so that the
            // first three corners stay distinct.
            let face = if i == 0 {
                Face::new([current, next_ring, next_both])
            } else if i == rings - 1 {
                Face::new([current, next_ring, next_segment])
            } else {
                Face::new([current, next_ring, next_both, next_segment])
            };
            faces.push(face);
        }
    }

    Shape::new("sphere", center, vertices, edges, Some(faces))
}

/// Torus around the z axis, centered at the origin.
///
/// Vertex `i * segments + j` sits at angle `theta_i` around the ring and
/// `phi_j` around the tube; both directions wrap.
pub fn donut(major_radius: f32, minor_radius: f32, segments: usize) -> Shape {
    let mut vertices = Vec::with_capacity(segments * segments);
    for i in 0..segments {
        let theta = TAU * i as f32 / segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for j in 0..segments {
            let phi = TAU * j as f32 / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let ring = major_radius + minor_radius * cos_phi;
            vertices.push(Vec3::new(ring * cos_theta, ring * sin_theta, minor_radius * sin_phi));
        }
    }

    let mut edges: Vec<Edge> = Vec::with_capacity(2 * segments * segments);
    let mut faces = Vec::with_capacity(segments * segments);
    for i in 0..segments {
        let next_i = (i + 1) % segments;
        for j in 0..segments {
            let next_j = (j + 1) % segments;
            let current = i * segments + j;

            edges.push((current, i * segments + next_j));
            edges.push((current, next_i * segments + j));

            faces.push(Face::new([
                current,
                next_i * segments + j,
                next_i * segments + next_j,
                i * segments + next_j,
            ]));
        }
    }

    Shape::new("donut", Vec3::ZERO, vertices, edges, Some(faces))
}

/// Two coplanar loops of radius `size / 4` touching at `center`.
///
/// Loop A (indices `0..segments`) is centered at `+size / 4` on x, loop B
/// (indices `segments..2 * segments`) at `-size / 4`. Vertex `i` of one loop
/// is joined to vertex `i` of the other.
pub fn figure8(center: Vec3, size: f32, segments: usize) -> Shape {
    let radius = size / 4.0;
    let offset_x = size / 4.0;

    let ring = |loop_center: Vec3| {
        (0..segments).map(move |i| {
            let theta = TAU * i as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            loop_center + Vec3::new(radius * cos_theta, radius * sin_theta, 0.0)
        })
    };

    let mut vertices = Vec::with_capacity(2 * segments);
    vertices.extend(ring(center + Vec3::new(offset_x, 0.0, 0.0)));
    let offset = vertices.len();
    vertices.extend(ring(center - Vec3::new(offset_x, 0.0, 0.0)));

    let mut edges: Vec<Edge> = Vec::with_capacity(3 * segments);
    for i in 0..segments {
        let next = (i + 1) % segments;
        edges.push((i, next));
        edges.push((offset + i, offset + next));
    }
    for i in 0..segments {
        edges.push((i, offset + i));
    }

    // One disc per loop, then one bridge quad per segment pair.
    let mut faces = Vec::with_capacity(segments + 2);
    faces.push(Face::new((0..segments).collect::<Vec<_>>()));
    faces.push(Face::new((offset..offset + segments).collect::<Vec<_>>()));
    for i in 0..segments {
        let next = (i + 1) % segments;
        faces.push(Face::new([i, next, offset + next, offset + i]));
    }

    Shape::new("figure8", center, vertices, edges, Some(faces))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_layout() {
        let sphere = sphere(Vec3::ZERO, 2.0, 8, 6);
        assert_eq!(sphere.vertices().len(), 7 * 8);
        assert_eq!(sphere.edges().len(), 2 * 6 * 8);
        assert_eq!(sphere.faces().map(<[Face]>::len), Some(6 * 8));
        for v in sphere.vertices() {
            assert!((v.length() - 2.0).abs() < 1e-5);
        }
        // ring * segments + segment
        assert!(sphere.vertices()[0].abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5));
        assert!(sphere.vertices()[6 * 8].abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5));
    }

    #[test]
    fn sphere_edges_wrap_within_ring() {
        let sphere = sphere(Vec3::ZERO, 1.0, 4, 2);
        assert!(sphere.edges().contains(&(7, 4)));
        assert!(sphere.edges().contains(&(3, 7)));
        assert!(!sphere.edges().contains(&(7, 8)));
    }

    #[test]
    fn sphere_faces_point_outward() {
        let sphere = sphere(Vec3::ZERO, 3.0, 12, 12);
        for face in sphere.faces().unwrap() {
            let normal = face.normal(sphere.vertices());
            let anchor = sphere.vertices()[face.vertices[1]];
            assert!(normal.dot(anchor) > 0.0, "{face:?}");
        }
    }

    #[test]
    fn donut_layout() {
        let donut = donut(3.0, 1.0, 10);
        assert_eq!(donut.vertices().len(), 100);
        assert_eq!(donut.edges().len(), 200);
        assert_eq!(donut.faces().map(<[Face]>::len), Some(100));
        assert_eq!(donut.center(), Vec3::ZERO);
        assert!(donut.vertices()[0].abs_diff_eq(Vec3::new(4.0, 0.0, 0.0), 1e-6));
        // Every vertex lies on the tube surface.
        for v in donut.vertices() {
            let from_ring = Vec3::new(v.x, v.y, 0.0).length() - 3.0;
            assert!((from_ring.hypot(v.z) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn donut_wraps_both_directions() {
        let donut = donut(3.0, 1.0, 4);
        assert!(donut.edges().contains(&(3, 0)));
        assert!(donut.edges().contains(&(12, 0)));
    }

    #[test]
    fn figure8_loops_touch_at_center() {
        let center = Vec3::new(1.0, -1.0, 2.0);
        let shape = figure8(center, 8.0, 16);
        assert_eq!(shape.vertices().len(), 32);
        assert_eq!(shape.edges().len(), 48);
        assert_eq!(shape.center(), center);
        // Loop A at theta = PI and loop B at theta = 0 meet in the middle.
        assert!(shape.vertices()[8].abs_diff_eq(center, 1e-5));
        assert!(shape.vertices()[16].abs_diff_eq(center, 1e-5));
    }

    #[test]
    fn figure8_faces_are_not_duplicated() {
        let shape = figure8(Vec3::ZERO, 8.0, 16);
        let faces = shape.faces().unwrap();
        assert_eq!(faces.len(), 16 + 2);
        for (i, a) in faces.iter().enumerate() {
            for b in &faces[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(faces[0].vertices.len(), 16);
        assert_eq!(faces[1].vertices[0], 16);
    }
}
