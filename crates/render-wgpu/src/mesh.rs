use bytemuck::{Pod, Zeroable};
use freelook_common::MeshKind;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side mesh ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn for_kind(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Triangle => Self::triangle(),
            MeshKind::Cube => Self::cube(),
        }
    }

    /// Upright textured triangle in the XY plane.
    pub fn triangle() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            Vertex { position: [-0.4, -0.5, 0.0], uv: [0.0, 0.0] },
            Vertex { position: [ 0.4, -0.5, 0.0], uv: [1.0, 0.0] },
            Vertex { position: [ 0.0,  0.5, 0.0], uv: [0.5, 1.0] },
        ];
        Self {
            vertices,
            indices: vec![0, 1, 2],
        }
    }

    /// Unit cube, one full texture per face.
    pub fn cube() -> Self {
        let p = 0.5_f32;
        #[rustfmt::skip]
        let vertices = vec![
            // +Z face
            Vertex { position: [-p, -p,  p], uv: [0.0, 0.0] },
            Vertex { position: [ p, -p,  p], uv: [1.0, 0.0] },
            Vertex { position: [ p,  p,  p], uv: [1.0, 1.0] },
            Vertex { position: [-p,  p,  p], uv: [0.0, 1.0] },
            // -Z face
            Vertex { position: [ p, -p, -p], uv: [0.0, 0.0] },
            Vertex { position: [-p, -p, -p], uv: [1.0, 0.0] },
            Vertex { position: [-p,  p, -p], uv: [1.0, 1.0] },
            Vertex { position: [ p,  p, -p], uv: [0.0, 1.0] },
            // +X face
            Vertex { position: [ p, -p,  p], uv: [0.0, 0.0] },
            Vertex { position: [ p, -p, -p], uv: [1.0, 0.0] },
            Vertex { position: [ p,  p, -p], uv: [1.0, 1.0] },
            Vertex { position: [ p,  p,  p], uv: [0.0, 1.0] },
            // -X face
            Vertex { position: [-p, -p, -p], uv: [0.0, 0.0] },
            Vertex { position: [-p, -p,  p], uv: [1.0, 0.0] },
            Vertex { position: [-p,  p,  p], uv: [1.0, 1.0] },
            Vertex { position: [-p,  p, -p], uv: [0.0, 1.0] },
            // +Y face
            Vertex { position: [-p,  p,  p], uv: [0.0, 0.0] },
            Vertex { position: [ p,  p,  p], uv: [1.0, 0.0] },
            Vertex { position: [ p,  p, -p], uv: [1.0, 1.0] },
            Vertex { position: [-p,  p, -p], uv: [0.0, 1.0] },
            // -Y face
            Vertex { position: [-p, -p, -p], uv: [0.0, 0.0] },
            Vertex { position: [ p, -p, -p], uv: [1.0, 0.0] },
            Vertex { position: [ p, -p,  p], uv: [1.0, 1.0] },
            Vertex { position: [-p, -p,  p], uv: [0.0, 1.0] },
        ];
        #[rustfmt::skip]
        let indices: Vec<u16> = vec![
            0,1,2, 2,3,0,       // +Z
            4,5,6, 6,7,4,       // -Z
            8,9,10, 10,11,8,    // +X
            12,13,14, 14,15,12, // -X
            16,17,18, 18,19,16, // +Y
            20,21,22, 22,23,20, // -Y
        ];
        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
