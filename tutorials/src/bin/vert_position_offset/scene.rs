use std::path::PathBuf;

use cgmath::Vector2;

use framework::shaders::ShaderSource;
use framework::{Application, GlContext, SceneError};

use gl_kit::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_kit::program::{Program, ProgramBuilder};

#[rustfmt::skip]
const TRIANGLE: [f32; 12] = [
     0.25,  0.25, 0.0, 1.0,
     0.25, -0.25, 0.0, 1.0,
    -0.25, -0.25, 0.0, 1.0,
];

const LOOP_DURATION: f32 = 5.0;
const OFFSET_RADIUS: f32 = 0.5;

/// A white triangle orbiting on a circle, moved by a per-frame `offset`
/// uniform computed on the CPU.
pub struct VertPositionOffset {
    data_dir: PathBuf,
    program: Option<Program>,
    triangle: Option<Geometry>,
}

impl VertPositionOffset {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            program: None,
            triangle: None,
        }
    }
}

impl Application for VertPositionOffset {
    fn init(&mut self, _ctx: &mut GlContext) -> Result<(), SceneError> {
        let source = ShaderSource::load(&self.data_dir, "position-offset.vert", "standard.frag")?;

        self.program = Some(ProgramBuilder::new(&source.vert, &source.frag).build()?);
        self.triangle = Some(
            GeometryBuilder::new(&TRIANGLE)
                .with_attribute(VertexAttribute::Vec4)
                .build()?,
        );

        Ok(())
    }

    fn display(&mut self, ctx: &mut GlContext) {
        let (program, triangle) = match (&self.program, &self.triangle) {
            (Some(program), Some(triangle)) => (program, triangle),
            _ => return,
        };

        let offset = position_offsets(ctx.elapsed());

        ctx.renderer.clear_color(0.0, 0.0, 0.0);

        program.set_vec2("offset", offset.x, offset.y);
        ctx.renderer.draw(triangle, program);
    }

    fn reshape(&mut self, ctx: &mut GlContext, width: u32, height: u32) {
        ctx.renderer.resize(width, height);
    }

    fn end(&mut self, _ctx: &mut GlContext) {
        self.program = None;
        self.triangle = None;
    }
}

/// Sweeps a full circle of radius 0.5 once every five seconds.
fn position_offsets(elapsed: f32) -> Vector2<f32> {
    let scale = std::f32::consts::TAU / LOOP_DURATION;
    let through_loop = elapsed % LOOP_DURATION;

    Vector2::new(
        (through_loop * scale).cos() * OFFSET_RADIUS,
        (through_loop * scale).sin() * OFFSET_RADIUS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use gl_kit::geometry::BlockLayout;

    #[test]
    fn offset_starts_on_the_positive_x_axis() {
        let offset = position_offsets(0.0);

        assert!((offset.x - 0.5).abs() < 1e-6);
        assert!(offset.y.abs() < 1e-6);
    }

    #[test]
    fn offset_repeats_every_five_seconds() {
        let first = position_offsets(2.5);
        let second = position_offsets(2.5 + LOOP_DURATION);

        assert!((first.x - second.x).abs() < 1e-4);
        assert!((first.y - second.y).abs() < 1e-4);
    }

    #[test]
    fn offset_stays_on_the_circle() {
        for i in 0..50 {
            let offset = position_offsets(i as f32 * 0.17);
            let radius = (offset.x * offset.x + offset.y * offset.y).sqrt();

            assert!((radius - OFFSET_RADIUS).abs() < 1e-4);
        }
    }

    #[test]
    fn triangle_data_is_three_vec4_positions() {
        let layout = BlockLayout::new(&[VertexAttribute::Vec4], TRIANGLE.len()).unwrap();

        assert_eq!(layout.vertices(), 3);
    }
}
