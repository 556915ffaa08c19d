use crate::geometry::Geometry;
use crate::program::Program;

use std::ffi::c_void;

#[derive(Copy, Clone, Debug)]
pub enum FrontFace {
    Clockwise,
    CounterClockwise,
}

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    /// Draws the geometry as triangles.
    ///
    /// Attribute arrays are enabled for the duration of this one call and
    /// disabled again afterwards; the VAO holds no pointer state between
    /// draws.
    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        let p_id = program.id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::BindBuffer(gl::ARRAY_BUFFER, geometry.vbo());

            for (i, block) in geometry.blocks().iter().enumerate() {
                gl::EnableVertexAttribArray(i as u32);
                gl::VertexAttribPointer(
                    i as u32,
                    block.components as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (block.components * std::mem::size_of::<f32>()) as i32,
                    (block.offset * std::mem::size_of::<f32>()) as *const c_void,
                );
            }

            gl::DrawArrays(gl::TRIANGLES, 0, geometry.vertices() as i32);

            for i in 0..geometry.blocks().len() {
                gl::DisableVertexAttribArray(i as u32);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    pub fn enable_back_culling(&self, front: FrontFace) {
        let winding = match front {
            FrontFace::Clockwise => gl::CW,
            FrontFace::CounterClockwise => gl::CCW,
        };

        unsafe {
            gl::Enable(gl::CULL_FACE);
            gl::CullFace(gl::BACK);
            gl::FrontFace(winding);
        }
    }
}
