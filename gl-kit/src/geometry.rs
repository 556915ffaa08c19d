use std::ffi::c_void;
use thiserror::Error;

/// Vertex data in block layout: all values of the first attribute, then all
/// values of the second, never interleaved.
pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Uploads the data in one static transfer. The buffer is immutable
    /// afterwards.
    pub fn build(self) -> Result<Geometry, GeometryError> {
        let layout = BlockLayout::new(&self.attributes, self.data.len())?;

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.data.len() * std::mem::size_of::<f32>()) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        Ok(Geometry { vao, vbo, layout })
    }
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
}

#[derive(Copy, Clone)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

/// Where each attribute's block starts within a block-layout buffer.
///
/// The invariant is that every block holds the same vertex count, so the
/// total element count must be a multiple of the per-vertex component sum.
pub struct BlockLayout {
    vertices: usize,
    blocks: Vec<AttributeBlock>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AttributeBlock {
    pub components: usize,
    /// Offset of the block start, in floats from the buffer start.
    pub offset: usize,
}

impl BlockLayout {
    pub fn new(attributes: &[VertexAttribute], data_len: usize) -> Result<Self, GeometryError> {
        let per_vertex: usize = attributes.iter().map(|a| a.size()).sum();

        if per_vertex == 0 || data_len % per_vertex != 0 {
            return Err(GeometryError::InvalidDataLength);
        }

        let vertices = data_len / per_vertex;

        let mut blocks = Vec::with_capacity(attributes.len());
        let mut offset = 0;

        for attr in attributes {
            blocks.push(AttributeBlock {
                components: attr.size(),
                offset,
            });
            offset += attr.size() * vertices;
        }

        Ok(Self { vertices, blocks })
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    pub fn blocks(&self) -> &[AttributeBlock] {
        &self.blocks
    }
}

/// One vertex buffer plus the layout a draw call reads it with.
///
/// Handles are valid from `build` until drop; the VAO carries no attribute
/// pointer state, pointers are set per draw.
pub struct Geometry {
    vao: u32,
    vbo: u32,
    layout: BlockLayout,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vbo(&self) -> u32 {
        self.vbo
    }

    pub fn vertices(&self) -> usize {
        self.layout.vertices()
    }

    pub fn blocks(&self) -> &[AttributeBlock] {
        self.layout.blocks()
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_layout_offsets() {
        let layout = BlockLayout::new(
            &[VertexAttribute::Vec4, VertexAttribute::Vec4],
            36 * 8,
        )
        .unwrap();

        assert_eq!(layout.vertices(), 36);
        assert_eq!(
            layout.blocks(),
            &[
                AttributeBlock {
                    components: 4,
                    offset: 0
                },
                AttributeBlock {
                    components: 4,
                    offset: 144
                },
            ]
        );
    }

    #[test]
    fn uneven_data_length_is_rejected() {
        let layout = BlockLayout::new(&[VertexAttribute::Vec4, VertexAttribute::Vec4], 36 * 8 + 1);

        assert!(matches!(layout, Err(GeometryError::InvalidDataLength)));
    }

    #[test]
    fn no_attributes_is_rejected() {
        let layout = BlockLayout::new(&[], 12);

        assert!(matches!(layout, Err(GeometryError::InvalidDataLength)));
    }

    #[test]
    fn single_attribute_block_starts_at_zero() {
        let layout = BlockLayout::new(&[VertexAttribute::Vec4], 12).unwrap();

        assert_eq!(layout.vertices(), 3);
        assert_eq!(layout.blocks()[0].offset, 0);
    }
}
