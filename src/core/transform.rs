use glam::Vec3;

/// Per-frame angle increments in radians (x, y, z).
pub const ROTATION_STEP: Vec3 = Vec3::new(0.03, 0.02, 0.01);

/// Rotates `v` about the origin: first about X, then about Y, then about Z,
/// each step working on the coordinates left by the previous one.
///
/// This is not the same as multiplying by a single combined matrix built in
/// another order, so keep the sequence as is.
pub fn rotate_vertex(v: Vec3, angle_x: f32, angle_y: f32, angle_z: f32) -> Vec3 {
    let Vec3 { mut x, mut y, mut z } = v;

    let (sin_x, cos_x) = angle_x.sin_cos();
    (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);

    let (sin_y, cos_y) = angle_y.sin_cos();
    (x, z) = (x * cos_y + z * sin_y, -x * sin_y + z * cos_y);

    let (sin_z, cos_z) = angle_z.sin_cos();
    (x, y) = (x * cos_z - y * sin_z, x * sin_z + y * cos_z);

    Vec3::new(x, y, z)
}

/// Undoes [`rotate_vertex`] with the same angles: Z by `-angle_z`, then Y by
/// `-angle_y`, then X by `-angle_x`.
pub fn inverse_rotate_vertex(v: Vec3, angle_x: f32, angle_y: f32, angle_z: f32) -> Vec3 {
    let v = rotate_vertex(v, 0.0, 0.0, -angle_z);
    let v = rotate_vertex(v, 0.0, -angle_y, 0.0);
    rotate_vertex(v, -angle_x, 0.0, 0.0)
}

/// Accumulated rotation of the shape on screen.
///
/// Angles grow without bound; sin/cos take care of the wrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Adds one frame's worth of rotation.
    pub fn advance(&mut self, step: Vec3) {
        self.x += step.x;
        self.y += step.y;
        self.z += step.z;
    }

    /// Rotates `v` about `center` rather than the origin.
    pub fn apply(&self, v: Vec3, center: Vec3) -> Vec3 {
        rotate_vertex(v - center, self.x, self.y, self.z) + center
    }

    /// Rotates a whole vertex buffer into `out`, reusing its allocation.
    pub fn apply_all(&self, vertices: &[Vec3], center: Vec3, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(vertices.iter().map(|&v| self.apply(v, center)));
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANGLES: [(f32, f32, f32); 5] = [
        (0.3, 0.0, 0.0),
        (0.0, 1.2, 0.0),
        (0.0, 0.0, -2.5),
        (0.7, -1.1, 2.9),
        (12.0, 5.5, -7.25),
    ];

    fn samples() -> [Vec3; 4] {
        [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-2.5, 0.0, 0.5),
            Vec3::new(0.0, -4.0, 1.0),
            Vec3::new(3.0, 3.0, -3.0),
        ]
    }

    #[test]
    fn zero_rotation_is_identity() {
        for v in samples() {
            assert!(rotate_vertex(v, 0.0, 0.0, 0.0).abs_diff_eq(v, 1e-6));
        }
    }

    #[test]
    fn rotation_preserves_length() {
        for v in samples() {
            for (ax, ay, az) in ANGLES {
                let rotated = rotate_vertex(v, ax, ay, az);
                assert!((rotated.length() - v.length()).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn x_rotation_keeps_x() {
        let v = Vec3::new(1.5, 2.0, -3.0);
        let rotated = rotate_vertex(v, 0.8, 0.0, 0.0);
        assert_eq!(rotated.x, v.x);
        assert!((rotated.y.hypot(rotated.z) - v.y.hypot(v.z)).abs() < 1e-5);
    }

    #[test]
    fn quarter_turns_follow_right_hand_rule() {
        let half_pi = std::f32::consts::FRAC_PI_2;
        assert!(rotate_vertex(Vec3::Y, half_pi, 0.0, 0.0).abs_diff_eq(Vec3::Z, 1e-6));
        assert!(rotate_vertex(Vec3::Z, 0.0, half_pi, 0.0).abs_diff_eq(Vec3::X, 1e-6));
        assert!(rotate_vertex(Vec3::X, 0.0, 0.0, half_pi).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn exact_inverse_restores_vertex() {
        for v in samples() {
            for (ax, ay, az) in ANGLES {
                let back = inverse_rotate_vertex(rotate_vertex(v, ax, ay, az), ax, ay, az);
                assert!(back.abs_diff_eq(v, 1e-4), "{v} -> {back}");
            }
        }
    }

    #[test]
    fn naive_reverse_negation_is_not_an_inverse() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let (a, b, c) = (0.7, -1.1, 2.9);
        let forward = rotate_vertex(v, a, b, c);
        let naive = rotate_vertex(forward, -c, -b, -a);
        assert!(!naive.abs_diff_eq(v, 1e-3));
    }

    #[test]
    fn rotation_about_center_fixes_center() {
        let center = Vec3::new(4.0, -1.0, 2.0);
        let state = RotationState::new(0.4, 1.0, -0.3);
        assert!(state.apply(center, center).abs_diff_eq(center, 1e-6));

        let v = center + Vec3::new(1.0, 1.0, 0.0);
        let rotated = state.apply(v, center);
        assert!((rotated.distance(center) - v.distance(center)).abs() < 1e-5);
    }

    #[test]
    fn advance_accumulates_steps() {
        let mut state = RotationState::zero();
        for _ in 0..10 {
            state.advance(ROTATION_STEP);
        }
        assert!((state.x - 0.3).abs() < 1e-5);
        assert!((state.y - 0.2).abs() < 1e-5);
        assert!((state.z - 0.1).abs() < 1e-5);
    }

    #[test]
    fn apply_all_reuses_buffer() {
        let state = RotationState::new(0.1, 0.2, 0.3);
        let mut out = vec![Vec3::ZERO; 10];
        state.apply_all(&samples(), Vec3::ZERO, &mut out);
        assert_eq!(out.len(), 4);
        assert_eq!(out[2], state.apply(samples()[2], Vec3::ZERO));
    }
}
