use std::time::Instant;

use thiserror::Error;

use gl_kit::geometry::GeometryError;
use gl_kit::program::ProgramError;
use gl_kit::renderer::GlRenderer;

use crate::shaders::ShaderLoadError;

pub use winit::event::VirtualKeyCode as Key;

/// Handle to the active rendering context, passed into every callback.
pub struct GlContext {
    pub renderer: GlRenderer,
    started: Instant,
}

impl GlContext {
    pub(crate) fn new() -> Self {
        Self {
            renderer: GlRenderer::new(),
            started: Instant::now(),
        }
    }

    /// Seconds since `init` ran.
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

/// Lifecycle contract of one example scene.
///
/// The event loop invokes the callbacks synchronously on one thread, never
/// concurrently and never reentrantly: `init` once, then `display`/`reshape`/
/// `keyboard` while the window lives, then `end` once. Every device resource
/// is created in `init` and released in `end`; `display` only uses existing
/// handles.
pub trait Application {
    fn init(&mut self, ctx: &mut GlContext) -> Result<(), SceneError>;

    /// Renders one frame. Must be a pure function of current state plus
    /// `ctx.elapsed()` and must not allocate device resources.
    fn display(&mut self, ctx: &mut GlContext);

    fn reshape(&mut self, ctx: &mut GlContext, width: u32, height: u32);

    fn end(&mut self, ctx: &mut GlContext);

    fn keyboard(&mut self, key: Key, pressed: bool) -> KeyResponse {
        if pressed && key == Key::Escape {
            KeyResponse::Exit
        } else {
            KeyResponse::Continue
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyResponse {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("shader program error: {0}")]
    Program(#[from] ProgramError),
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("shader source error: {0}")]
    ShaderLoad(#[from] ShaderLoadError),
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("init called on an already initialized application")]
    AlreadyInitialized,
    #[error(transparent)]
    Scene(#[from] SceneError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Rendering,
    TornDown,
}

/// Drives an [`Application`] through its state machine:
/// `Uninitialized -> Rendering -> TornDown`.
///
/// Out-of-phase `display`/`reshape` calls are dropped with a warning instead
/// of reaching the application, and `end` runs the application's teardown at
/// most once.
pub struct Lifecycle<A: Application> {
    app: A,
    phase: Phase,
}

impl<A: Application> Lifecycle<A> {
    pub fn new(app: A) -> Self {
        Self {
            app,
            phase: Phase::Uninitialized,
        }
    }

    pub fn init(&mut self, ctx: &mut GlContext) -> Result<(), LifecycleError> {
        if self.phase != Phase::Uninitialized {
            return Err(LifecycleError::AlreadyInitialized);
        }

        self.app.init(ctx)?;
        self.phase = Phase::Rendering;

        Ok(())
    }

    pub fn display(&mut self, ctx: &mut GlContext) {
        if self.phase != Phase::Rendering {
            log::warn!("display called outside of the rendering phase");
            return;
        }

        self.app.display(ctx);
    }

    pub fn reshape(&mut self, ctx: &mut GlContext, width: u32, height: u32) {
        if self.phase != Phase::Rendering {
            log::warn!("reshape called outside of the rendering phase");
            return;
        }

        self.app.reshape(ctx, width, height);
    }

    pub fn key(&mut self, key: Key, pressed: bool) -> KeyResponse {
        if self.phase != Phase::Rendering {
            return KeyResponse::Continue;
        }

        self.app.keyboard(key, pressed)
    }

    pub fn end(&mut self, ctx: &mut GlContext) {
        if self.phase != Phase::Rendering {
            return;
        }

        self.app.end(ctx);
        self.phase = Phase::TornDown;
    }

    pub fn is_torn_down(&self) -> bool {
        self.phase == Phase::TornDown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        inits: usize,
        displays: usize,
        reshapes: usize,
        ends: usize,
    }

    impl Application for Recorder {
        fn init(&mut self, _ctx: &mut GlContext) -> Result<(), SceneError> {
            self.inits += 1;
            Ok(())
        }

        fn display(&mut self, _ctx: &mut GlContext) {
            self.displays += 1;
        }

        fn reshape(&mut self, _ctx: &mut GlContext, _width: u32, _height: u32) {
            self.reshapes += 1;
        }

        fn end(&mut self, _ctx: &mut GlContext) {
            self.ends += 1;
        }
    }

    #[test]
    fn escape_tears_down_exactly_once() {
        let mut ctx = GlContext::new();
        let mut lifecycle = Lifecycle::new(Recorder::default());

        lifecycle.init(&mut ctx).unwrap();
        lifecycle.display(&mut ctx);

        assert_eq!(lifecycle.key(Key::Escape, true), KeyResponse::Exit);
        lifecycle.end(&mut ctx);

        // window close after escape must not run teardown again
        lifecycle.end(&mut ctx);

        assert!(lifecycle.is_torn_down());
        assert_eq!(lifecycle.app.ends, 1);
    }

    #[test]
    fn callbacks_after_teardown_are_dropped() {
        let mut ctx = GlContext::new();
        let mut lifecycle = Lifecycle::new(Recorder::default());

        lifecycle.init(&mut ctx).unwrap();
        lifecycle.end(&mut ctx);

        lifecycle.display(&mut ctx);
        lifecycle.reshape(&mut ctx, 640, 480);

        assert_eq!(lifecycle.app.displays, 0);
        assert_eq!(lifecycle.app.reshapes, 0);
        assert_eq!(lifecycle.key(Key::Escape, true), KeyResponse::Continue);
    }

    #[test]
    fn double_init_is_an_error() {
        let mut ctx = GlContext::new();
        let mut lifecycle = Lifecycle::new(Recorder::default());

        lifecycle.init(&mut ctx).unwrap();

        assert!(matches!(
            lifecycle.init(&mut ctx),
            Err(LifecycleError::AlreadyInitialized)
        ));
        assert_eq!(lifecycle.app.inits, 1);
    }

    #[test]
    fn callbacks_before_init_are_dropped() {
        let mut ctx = GlContext::new();
        let mut lifecycle = Lifecycle::new(Recorder::default());

        lifecycle.display(&mut ctx);
        lifecycle.end(&mut ctx);

        assert_eq!(lifecycle.app.displays, 0);
        assert_eq!(lifecycle.app.ends, 0);
        assert!(!lifecycle.is_torn_down());
    }

    #[test]
    fn other_keys_keep_rendering() {
        let mut ctx = GlContext::new();
        let mut lifecycle = Lifecycle::new(Recorder::default());

        lifecycle.init(&mut ctx).unwrap();

        assert_eq!(lifecycle.key(Key::Space, true), KeyResponse::Continue);
        assert_eq!(lifecycle.key(Key::Escape, false), KeyResponse::Continue);
    }
}
