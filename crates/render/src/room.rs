use bytemuck::{Pod, Zeroable};
use std::ops::Range;

/// Interleaved room vertex: position, inward normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RoomVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// One textured quad of the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Surface {
    Floor,
    Ceiling,
    BackWall,
    FrontWall,
    LeftWall,
    RightWall,
}

impl Surface {
    /// Surfaces in mesh order.
    pub const ALL: [Surface; 6] = [
        Surface::Floor,
        Surface::Ceiling,
        Surface::BackWall,
        Surface::FrontWall,
        Surface::LeftWall,
        Surface::RightWall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Surface::Floor => "floor",
            Surface::Ceiling => "ceiling",
            Surface::BackWall => "back wall",
            Surface::FrontWall => "front wall",
            Surface::LeftWall => "left wall",
            Surface::RightWall => "right wall",
        }
    }

    pub fn is_wall(self) -> bool {
        !matches!(self, Surface::Floor | Surface::Ceiling)
    }

    fn index(self) -> u32 {
        self as u32
    }

    /// Normal pointing into the room.
    fn normal(self) -> [f32; 3] {
        match self {
            Surface::Floor => [0.0, 1.0, 0.0],
            Surface::Ceiling => [0.0, -1.0, 0.0],
            Surface::BackWall => [0.0, 0.0, 1.0],
            Surface::FrontWall => [0.0, 0.0, -1.0],
            Surface::LeftWall => [1.0, 0.0, 0.0],
            Surface::RightWall => [-1.0, 0.0, 0.0],
        }
    }

    /// Quad corners as bottom-left, bottom-right, top-right, top-left for a
    /// room spanning [-h, h] in X/Z and [0, y] in Y.
    fn corners(self, h: f32, y: f32) -> [[f32; 3]; 4] {
        #[rustfmt::skip]
        let corners = match self {
            Surface::Floor     => [[-h, 0.0, -h], [ h, 0.0, -h], [ h, 0.0,  h], [-h, 0.0,  h]],
            Surface::Ceiling   => [[-h,   y, -h], [ h,   y, -h], [ h,   y,  h], [-h,   y,  h]],
            Surface::BackWall  => [[-h, 0.0, -h], [ h, 0.0, -h], [ h,   y, -h], [-h,   y, -h]],
            Surface::FrontWall => [[-h, 0.0,  h], [ h, 0.0,  h], [ h,   y,  h], [-h,   y,  h]],
            Surface::LeftWall  => [[-h, 0.0, -h], [-h, 0.0,  h], [-h,   y,  h], [-h,   y, -h]],
            Surface::RightWall => [[ h, 0.0, -h], [ h, 0.0,  h], [ h,   y,  h], [ h,   y, -h]],
        };
        corners
    }
}

const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Static room geometry: four vertices and two triangles per surface.
#[derive(Debug, Clone)]
pub struct RoomMesh {
    pub vertices: Vec<RoomVertex>,
    pub indices: Vec<u16>,
}

impl RoomMesh {
    /// Build the room spanning [-half_extent, half_extent] in X/Z and
    /// [0, height] in Y.
    pub fn build(half_extent: f32, height: f32) -> Self {
        let mut vertices = Vec::with_capacity(Surface::ALL.len() * 4);
        let mut indices = Vec::with_capacity(Surface::ALL.len() * 6);

        for surface in Surface::ALL {
            let base = vertices.len() as u16;
            let normal = surface.normal();
            for (position, uv) in surface.corners(half_extent, height).into_iter().zip(QUAD_UVS) {
                vertices.push(RoomVertex {
                    position,
                    normal,
                    uv,
                });
            }
            indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        }

        tracing::debug!(
            vertices = vertices.len(),
            indices = indices.len(),
            "built room mesh"
        );
        Self { vertices, indices }
    }

    /// The gallery room at its fixed size.
    pub fn gallery() -> Self {
        use gallery_common::config::{ROOM_HALF_EXTENT, ROOM_HEIGHT};
        Self::build(ROOM_HALF_EXTENT, ROOM_HEIGHT)
    }

    /// Index range to draw a single surface.
    pub fn surface_range(&self, surface: Surface) -> Range<u32> {
        let start = surface.index() * QUAD_INDICES.len() as u32;
        start..start + QUAD_INDICES.len() as u32
    }

    pub fn vertices_of(&self, surface: Surface) -> &[RoomVertex] {
        let start = surface.index() as usize * 4;
        &self.vertices[start..start + 4]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn gallery_mesh_counts() {
        let mesh = RoomMesh::gallery();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn surface_ranges_tile_index_buffer() {
        let mesh = RoomMesh::gallery();
        let mut next = 0;
        for surface in Surface::ALL {
            let range = mesh.surface_range(surface);
            assert_eq!(range.start, next);
            assert_eq!(range.len(), 6);
            next = range.end;
        }
        assert_eq!(next as usize, mesh.indices.len());
    }

    #[test]
    fn each_surface_references_its_own_vertices() {
        let mesh = RoomMesh::gallery();
        for (n, surface) in Surface::ALL.into_iter().enumerate() {
            let range = mesh.surface_range(surface);
            for &i in &mesh.indices[range.start as usize..range.end as usize] {
                assert_eq!(i as usize / 4, n, "{} uses a foreign vertex", surface.name());
            }
        }
    }

    #[test]
    fn normals_point_inwards() {
        let mesh = RoomMesh::gallery();
        let centre = Vec3::new(0.0, 2.5, 0.0);
        for surface in Surface::ALL {
            for v in mesh.vertices_of(surface) {
                let to_centre = centre - Vec3::from(v.position);
                assert!(Vec3::from(v.normal).dot(to_centre) > 0.0, "{}", surface.name());
            }
        }
    }

    #[test]
    fn surfaces_are_planar_and_on_room_boundary() {
        let mesh = RoomMesh::gallery();
        for surface in Surface::ALL {
            let verts = mesh.vertices_of(surface);
            let n = Vec3::from(verts[0].normal);
            let d = n.dot(Vec3::from(verts[0].position));
            for v in verts {
                assert!((n.dot(Vec3::from(v.position)) - d).abs() < 1e-6);
                let p = Vec3::from(v.position);
                assert!(p.x.abs() <= 5.0 && p.z.abs() <= 5.0);
                assert!((0.0..=5.0).contains(&p.y));
            }
        }
    }

    #[test]
    fn uvs_cover_unit_square() {
        let mesh = RoomMesh::gallery();
        let floor = mesh.vertices_of(Surface::Floor);
        let uvs: Vec<_> = floor.iter().map(|v| v.uv).collect();
        assert_eq!(uvs, QUAD_UVS.to_vec());
    }

    #[test]
    fn walls_vs_horizontal() {
        assert!(!Surface::Floor.is_wall());
        assert!(!Surface::Ceiling.is_wall());
        assert_eq!(Surface::ALL.iter().filter(|s| s.is_wall()).count(), 4);
    }
}
