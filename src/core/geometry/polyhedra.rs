use glam::Vec3;

use super::{Face, Shape};

/// Axis-aligned cube with edge length `size`.
///
/// Faces are wound counter-clockwise seen from outside.
pub fn cube(center: Vec3, size: f32) -> Shape {
    let s = size / 2.0;
    let vertices = [
        [-s, -s, -s],
        [s, -s, -s],
        [s, s, -s],
        [-s, s, -s],
        [-s, -s, s],
        [s, -s, s],
        [s, s, s],
        [-s, s, s],
    ]
    .into_iter()
    .map(|corner| center + Vec3::from_array(corner))
    .collect();

    #[rustfmt::skip]
    let edges = vec![
        (0, 1), (1, 2), (2, 3), (3, 0), // back square
        (4, 5), (5, 6), (6, 7), (7, 4), // front square
        (0, 4), (1, 5), (2, 6), (3, 7), // connecting edges
    ];

    let faces = vec![
        Face::new([0, 3, 2, 1]), // -z
        Face::new([4, 5, 6, 7]), // +z
        Face::new([0, 1, 5, 4]), // -y
        Face::new([2, 3, 7, 6]), // +y
        Face::new([0, 4, 7, 3]), // -x
        Face::new([1, 2, 6, 5]), // +x
    ];

    Shape::new("cube", center, vertices, edges, Some(faces))
}

/// Square-based pyramid: base of side `size` in the plane of `center`, apex
/// `size` above it.
pub fn pyramid(center: Vec3, size: f32) -> Shape {
    let s = size / 2.0;
    let vertices = vec![
        center + Vec3::new(-s, -s, 0.0),
        center + Vec3::new(s, -s, 0.0),
        center + Vec3::new(s, s, 0.0),
        center + Vec3::new(-s, s, 0.0),
        center + Vec3::new(0.0, 0.0, size),
    ];
    #[rustfmt::skip]
    let edges = vec![
        (0, 1), (1, 2), (2, 3), (3, 0), // base
        (0, 4), (1, 4), (2, 4), (3, 4), // sides
    ];
    Shape::new("pyramid", center, vertices, edges, None)
}

pub fn tetrahedron(center: Vec3, size: f32) -> Shape {
    let s = size / std::f32::consts::SQRT_2;
    let vertices = vec![
        center + Vec3::new(s, s, s),
        center + Vec3::new(-s, -s, s),
        center + Vec3::new(-s, s, -s),
        center + Vec3::new(s, -s, -s),
    ];
    let edges = vec![(0, 1), (1, 2), (2, 0), (0, 3), (1, 3), (2, 3)];
    Shape::new("tetrahedron", center, vertices, edges, None)
}

pub fn octahedron(center: Vec3, size: f32) -> Shape {
    let s = size / 2.0;
    let vertices = vec![
        center + Vec3::new(0.0, 0.0, s), // top
        center + Vec3::new(s, 0.0, 0.0),
        center + Vec3::new(0.0, s, 0.0),
        center + Vec3::new(-s, 0.0, 0.0),
        center + Vec3::new(0.0, -s, 0.0),
        center + Vec3::new(0.0, 0.0, -s), // bottom
    ];
    #[rustfmt::skip]
    let edges = vec![
        (0, 1), (0, 2), (0, 3), (0, 4),
        (5, 1), (5, 2), (5, 3), (5, 4),
        (1, 2), (2, 3), (3, 4), (4, 1),
    ];
    Shape::new("octahedron", center, vertices, edges, None)
}
