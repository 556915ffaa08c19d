use std::path::PathBuf;

use framework::shaders::ShaderSource;
use framework::{Application, GlContext, SceneError};

use gl_kit::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_kit::program::{Program, ProgramBuilder};
use gl_kit::renderer::FrontFace;

const OFFSET: (f32, f32) = (0.5, 0.25);

// 36 vec4 positions followed by 36 vec4 colors, one color per face.
#[rustfmt::skip]
const CUBE: [f32; 288] = [
     0.25,  0.25,  0.75, 1.0,
     0.25, -0.25,  0.75, 1.0,
    -0.25,  0.25,  0.75, 1.0,

     0.25, -0.25,  0.75, 1.0,
    -0.25, -0.25,  0.75, 1.0,
    -0.25,  0.25,  0.75, 1.0,

     0.25,  0.25, -0.75, 1.0,
    -0.25,  0.25, -0.75, 1.0,
     0.25, -0.25, -0.75, 1.0,

     0.25, -0.25, -0.75, 1.0,
    -0.25,  0.25, -0.75, 1.0,
    -0.25, -0.25, -0.75, 1.0,

    -0.25,  0.25,  0.75, 1.0,
    -0.25, -0.25,  0.75, 1.0,
    -0.25, -0.25, -0.75, 1.0,

    -0.25,  0.25,  0.75, 1.0,
    -0.25, -0.25, -0.75, 1.0,
    -0.25,  0.25, -0.75, 1.0,

     0.25,  0.25,  0.75, 1.0,
     0.25, -0.25, -0.75, 1.0,
     0.25, -0.25,  0.75, 1.0,

     0.25,  0.25,  0.75, 1.0,
     0.25,  0.25, -0.75, 1.0,
     0.25, -0.25, -0.75, 1.0,

     0.25,  0.25, -0.75, 1.0,
     0.25,  0.25,  0.75, 1.0,
    -0.25,  0.25,  0.75, 1.0,

     0.25,  0.25, -0.75, 1.0,
    -0.25,  0.25,  0.75, 1.0,
    -0.25,  0.25, -0.75, 1.0,

     0.25, -0.25, -0.75, 1.0,
    -0.25, -0.25,  0.75, 1.0,
     0.25, -0.25,  0.75, 1.0,

     0.25, -0.25, -0.75, 1.0,
    -0.25, -0.25, -0.75, 1.0,
    -0.25, -0.25,  0.75, 1.0,

    0.0, 0.0, 1.0, 1.0,
    0.0, 0.0, 1.0, 1.0,
    0.0, 0.0, 1.0, 1.0,

    0.0, 0.0, 1.0, 1.0,
    0.0, 0.0, 1.0, 1.0,
    0.0, 0.0, 1.0, 1.0,

    0.8, 0.8, 0.8, 1.0,
    0.8, 0.8, 0.8, 1.0,
    0.8, 0.8, 0.8, 1.0,

    0.8, 0.8, 0.8, 1.0,
    0.8, 0.8, 0.8, 1.0,
    0.8, 0.8, 0.8, 1.0,

    0.0, 1.0, 0.0, 1.0,
    0.0, 1.0, 0.0, 1.0,
    0.0, 1.0, 0.0, 1.0,

    0.0, 1.0, 0.0, 1.0,
    0.0, 1.0, 0.0, 1.0,
    0.0, 1.0, 0.0, 1.0,

    0.5, 0.5, 0.0, 1.0,
    0.5, 0.5, 0.0, 1.0,
    0.5, 0.5, 0.0, 1.0,

    0.5, 0.5, 0.0, 1.0,
    0.5, 0.5, 0.0, 1.0,
    0.5, 0.5, 0.0, 1.0,

    1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 1.0,

    1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 1.0,

    0.0, 1.0, 1.0, 1.0,
    0.0, 1.0, 1.0, 1.0,
    0.0, 1.0, 1.0, 1.0,

    0.0, 1.0, 1.0, 1.0,
    0.0, 1.0, 1.0, 1.0,
    0.0, 1.0, 1.0, 1.0,
];

/// A face-colored cube drawn without a projection, shifted by a constant
/// offset uniform. Faces are wound clockwise, back faces are culled.
pub struct OrthoCube {
    data_dir: PathBuf,
    program: Option<Program>,
    cube: Option<Geometry>,
}

impl OrthoCube {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            program: None,
            cube: None,
        }
    }
}

impl Application for OrthoCube {
    fn init(&mut self, ctx: &mut GlContext) -> Result<(), SceneError> {
        let source = ShaderSource::load(
            &self.data_dir,
            "ortho-with-offset.vert",
            "standard-colors.frag",
        )?;

        self.program = Some(ProgramBuilder::new(&source.vert, &source.frag).build()?);
        self.cube = Some(
            GeometryBuilder::new(&CUBE)
                .with_attribute(VertexAttribute::Vec4)
                .with_attribute(VertexAttribute::Vec4)
                .build()?,
        );

        ctx.renderer.enable_back_culling(FrontFace::Clockwise);

        Ok(())
    }

    fn display(&mut self, ctx: &mut GlContext) {
        let (program, cube) = match (&self.program, &self.cube) {
            (Some(program), Some(cube)) => (program, cube),
            _ => return,
        };

        ctx.renderer.clear_color(0.0, 0.0, 0.0);

        program.set_vec2("offset", OFFSET.0, OFFSET.1);
        ctx.renderer.draw(cube, program);
    }

    fn reshape(&mut self, ctx: &mut GlContext, width: u32, height: u32) {
        ctx.renderer.resize(width, height);
    }

    fn end(&mut self, _ctx: &mut GlContext) {
        self.program = None;
        self.cube = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gl_kit::geometry::BlockLayout;

    #[test]
    fn cube_blocks_hold_the_same_vertex_count() {
        let layout = BlockLayout::new(
            &[VertexAttribute::Vec4, VertexAttribute::Vec4],
            CUBE.len(),
        )
        .unwrap();

        assert_eq!(layout.vertices(), 36);
        assert_eq!(layout.blocks()[1].offset, 36 * 4);
    }

    #[test]
    fn cube_colors_are_valid_rgba() {
        let colors = &CUBE[36 * 4..];

        for component in colors {
            assert!((0.0..=1.0).contains(component));
        }

        for alpha in colors.iter().skip(3).step_by(4) {
            assert_eq!(*alpha, 1.0);
        }
    }
}
