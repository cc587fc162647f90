use glam::DVec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl BoundingBox {
    pub fn new(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        min_z: f64,
        max_z: f64,
    ) -> BoundingBox {
        BoundingBox {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    // axis-aligned box of the given full size centred on `center`
    pub fn around(center: DVec3, size: DVec3) -> BoundingBox {
        let half = size / 2.0;
        BoundingBox::new(
            center.x - half.x,
            center.x + half.x,
            center.y - half.y,
            center.y + half.y,
            center.z - half.z,
            center.z + half.z,
        )
    }

    pub fn is_colliding(&self, other: &BoundingBox) -> bool {
        // https://developer.mozilla.org/en-US/docs/Games/Techniques/3D_collision_detection
        (self.min_x <= other.max_x && self.max_x >= other.min_x)
            && (self.min_y <= other.max_y && self.max_y >= other.min_y)
            && (self.min_z <= other.max_z && self.max_z >= other.min_z)
    }

    // Refit around a ship of `size` (x = width, z = length) at `pos` that is
    // yawed to face `forward`. Ships stay level, so only yaw matters.
    pub fn set_dimensions(&mut self, pos: &DVec3, size: &DVec3, forward: &DVec3) {
        let flat_forward = DVec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let flat_forward = if flat_forward == DVec3::ZERO {
            DVec3::Z
        } else {
            flat_forward
        };
        let flat_right = DVec3::new(flat_forward.z, 0.0, -flat_forward.x);

        // because of symmetry, two corners are enough to find the extrema
        let x_2 = size.x / 2.0;
        let z_2 = size.z / 2.0;
        let corners = [
            flat_right * x_2 + flat_forward * z_2,
            flat_right * -x_2 + flat_forward * z_2,
        ];

        let x_dist = corners.iter().map(|corner| corner.x.abs()).fold(0.0, f64::max);
        let z_dist = corners.iter().map(|corner| corner.z.abs()).fold(0.0, f64::max);
        let y_dist = size.y / 2.0;

        self.min_x = pos.x - x_dist;
        self.max_x = pos.x + x_dist;
        self.min_y = pos.y - y_dist;
        self.max_y = pos.y + y_dist;
        self.min_z = pos.z - z_dist;
        self.max_z = pos.z + z_dist;
    }
}
