use std::f32::consts::{FRAC_PI_2, PI};

/// Number of `f32` values per vertex: `position.xyz` followed by `normal.xyz`.
pub const FLOATS_PER_VERTEX: usize = 6;

/// Shared meshes every draw call picks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
}

impl MeshKind {
    pub const ALL: [MeshKind; 2] = [MeshKind::Cube, MeshKind::Sphere];

    pub fn label(self) -> &'static str {
        match self {
            MeshKind::Cube => "cube",
            MeshKind::Sphere => "sphere",
        }
    }
}

/// Interleaved vertex and index arrays ready for upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Builds the mesh for `kind` with its default dimensions.
    pub fn build(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Cube => Self::cube(),
            MeshKind::Sphere => Self::sphere(0.5, 36, 18),
        }
    }

    /// Unit cube centered on the origin, one quad per face so every face
    /// carries its own normal.
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            indices: CUBE_INDICES.to_vec(),
        }
    }

    /// UV sphere centered on the origin. Poles produce a single triangle
    /// per sector.
    pub fn sphere(radius: f32, sectors: u32, stacks: u32) -> Self {
        let sectors = sectors.max(3);
        let stacks = stacks.max(2);
        let mut vertices =
            Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize * FLOATS_PER_VERTEX);

        for i in 0..=stacks {
            let stack_angle = FRAC_PI_2 - i as f32 * PI / stacks as f32;
            let ring = radius * stack_angle.cos();
            let z = radius * stack_angle.sin();
            for j in 0..=sectors {
                let sector_angle = j as f32 * 2.0 * PI / sectors as f32;
                let x = ring * sector_angle.cos();
                let y = ring * sector_angle.sin();
                vertices.extend_from_slice(&[x, y, z, x / radius, y / radius, z / radius]);
            }
        }

        let mut indices = Vec::new();
        for i in 0..stacks {
            let mut k1 = i * (sectors + 1);
            let mut k2 = k1 + sectors + 1;
            for _ in 0..sectors {
                if i != 0 {
                    indices.extend_from_slice(&[k1, k2, k1 + 1]);
                }
                if i != stacks - 1 {
                    indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
                }
                k1 += 1;
                k2 += 1;
            }
        }

        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

const CUBE_VERTICES: &[f32] = &[
    // positions        // normals
    -0.5, -0.5, 0.5, 0.0, 0.0, 1.0, 0.5, -0.5, 0.5, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5, 0.0, 0.0, 1.0,
    -0.5, 0.5, 0.5, 0.0, 0.0, 1.0, -0.5, -0.5, -0.5, 0.0, 0.0, -1.0, 0.5, -0.5, -0.5, 0.0, 0.0,
    -1.0, 0.5, 0.5, -0.5, 0.0, 0.0, -1.0, -0.5, 0.5, -0.5, 0.0, 0.0, -1.0, -0.5, -0.5, -0.5, -1.0,
    0.0, 0.0, -0.5, -0.5, 0.5, -1.0, 0.0, 0.0, -0.5, 0.5, 0.5, -1.0, 0.0, 0.0, -0.5, 0.5, -0.5,
    -1.0, 0.0, 0.0, 0.5, -0.5, -0.5, 1.0, 0.0, 0.0, 0.5, -0.5, 0.5, 1.0, 0.0, 0.0, 0.5, 0.5, 0.5,
    1.0, 0.0, 0.0, 0.5, 0.5, -0.5, 1.0, 0.0, 0.0, -0.5, -0.5, -0.5, 0.0, -1.0, 0.0, 0.5, -0.5,
    -0.5, 0.0, -1.0, 0.0, 0.5, -0.5, 0.5, 0.0, -1.0, 0.0, -0.5, -0.5, 0.5, 0.0, -1.0, 0.0, -0.5,
    0.5, -0.5, 0.0, 1.0, 0.0, 0.5, 0.5, -0.5, 0.0, 1.0, 0.0, 0.5, 0.5, 0.5, 0.0, 1.0, 0.0, -0.5,
    0.5, 0.5, 0.0, 1.0, 0.0,
];

const CUBE_INDICES: &[u32] = &[
    0, 1, 2, 0, 2, 3, // front
    4, 6, 5, 4, 7, 6, // back
    8, 9, 10, 8, 10, 11, // left
    12, 14, 13, 12, 15, 14, // right
    16, 18, 17, 16, 19, 18, // bottom
    20, 21, 22, 20, 22, 23, // top
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_one_quad_per_face() {
        let cube = MeshData::cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.index_count(), 36);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertex_count()));
    }

    #[test]
    fn sphere_vertices_lie_on_radius_with_unit_normals() {
        let sphere = MeshData::sphere(0.5, 12, 6);
        assert_eq!(sphere.vertex_count(), 7 * 13);
        for vertex in sphere.vertices.chunks(FLOATS_PER_VERTEX) {
            let position = glam::Vec3::new(vertex[0], vertex[1], vertex[2]);
            let normal = glam::Vec3::new(vertex[3], vertex[4], vertex[5]);
            assert!((position.length() - 0.5).abs() < 1e-5);
            assert!((normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_poles_emit_single_triangles() {
        let (sectors, stacks) = (12u32, 6u32);
        let sphere = MeshData::sphere(1.0, sectors, stacks);
        let triangles = sectors * 2 * (stacks - 1);
        assert_eq!(sphere.index_count(), triangles * 3);
        assert!(sphere
            .indices
            .iter()
            .all(|&i| (i as usize) < sphere.vertex_count()));
    }
}
