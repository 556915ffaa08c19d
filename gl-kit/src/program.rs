use gl::types::{GLenum, GLuint};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_char, CString};
use thiserror::Error;

pub struct ProgramBuilder {
    vert: CString,
    frag: CString,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: CString::new(vert_src).unwrap(),
            frag: CString::new(frag_src).unwrap(),
        }
    }

    pub fn build(self) -> Result<Program, ProgramError> {
        unsafe {
            let vert = compile_stage(gl::VERTEX_SHADER, &self.vert)?;

            let frag = match compile_stage(gl::FRAGMENT_SHADER, &self.frag) {
                Ok(frag) => frag,
                Err(e) => {
                    gl::DeleteShader(vert);
                    return Err(e);
                }
            };

            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            // stage objects are not needed once the program is linked
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            let mut success: i32 = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != 1 {
                let mut buf = [0_u8; 1024];

                gl::GetProgramInfoLog(
                    program,
                    buf.len() as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );

                gl::DeleteProgram(program);
                return Err(ProgramError::Linking(info_log_to_string(&buf)));
            }

            Ok(Program {
                id: program,
                locations: LocationCache::default(),
            })
        }
    }
}

unsafe fn compile_stage(kind: GLenum, src: &CString) -> Result<GLuint, ProgramError> {
    let shader = gl::CreateShader(kind);

    gl::ShaderSource(
        shader,
        1,
        (&src.as_ptr()) as *const *const c_char,
        std::ptr::null(),
    );
    gl::CompileShader(shader);

    let mut success: i32 = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);
    if success != 1 {
        let mut buf = [0_u8; 1024];

        gl::GetShaderInfoLog(
            shader,
            buf.len() as i32,
            std::ptr::null_mut(),
            buf.as_mut_ptr() as *mut c_char,
        );

        gl::DeleteShader(shader);
        return Err(ProgramError::Compilation(info_log_to_string(&buf)));
    }

    Ok(shader)
}

fn info_log_to_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());

    String::from_utf8_lossy(&buf[..end]).to_string()
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("{0}")]
    Compilation(String),
    #[error("{0}")]
    Linking(String),
}

/// Linked shader program.
///
/// The device-side object is valid while the GL context that created it is
/// current; dropping the handle deletes the object.
pub struct Program {
    id: GLuint,
    locations: LocationCache,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Resolves a uniform location by name, caching the result.
    ///
    /// Unknown names resolve to `-1`, which turns the corresponding uniform
    /// writes into silent no-ops rather than errors.
    pub fn uniform_location(&self, name: &str) -> i32 {
        if let Some(location) = self.locations.get(name) {
            return location;
        }

        let c_name = CString::new(name).unwrap();
        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        self.locations.insert(name, location);
        location
    }

    pub fn set_vec2(&self, name: &str, x: f32, y: f32) {
        let location = self.uniform_location(name);
        unsafe { gl::ProgramUniform2f(self.id, location, x, y) }
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        let location = self.uniform_location(name);
        unsafe { gl::ProgramUniform1f(self.id, location, value) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[derive(Default)]
struct LocationCache(RefCell<HashMap<String, i32>>);

impl LocationCache {
    fn get(&self, name: &str) -> Option<i32> {
        self.0.borrow().get(name).copied()
    }

    fn insert(&self, name: &str, location: i32) {
        self.0.borrow_mut().insert(name.to_string(), location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_location_is_stable() {
        let cache = LocationCache::default();

        assert_eq!(cache.get("offset"), None);

        cache.insert("offset", 3);

        assert_eq!(cache.get("offset"), Some(3));
        assert_eq!(cache.get("offset"), Some(3));
    }

    #[test]
    fn missing_uniform_sentinel_is_cached() {
        let cache = LocationCache::default();

        cache.insert("no_such_uniform", -1);

        assert_eq!(cache.get("no_such_uniform"), Some(-1));
    }

    #[test]
    fn info_log_stops_at_the_terminator() {
        let buf = *b"0:1: error\0garbage";

        assert_eq!(info_log_to_string(&buf), "0:1: error");
    }

    #[test]
    fn unterminated_info_log_is_kept_whole() {
        let buf = *b"full";

        assert_eq!(info_log_to_string(&buf), "full");
    }
}
