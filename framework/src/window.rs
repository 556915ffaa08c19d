use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use std::ffi::CString;
use std::num::NonZeroU32;

use crate::app::{Application, GlContext, KeyResponse, Lifecycle};

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Owns the window, surface, GL context and event loop, and drives an
/// [`Application`] through its lifecycle.
pub struct Runner {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
}

impl Runner {
    pub fn new(config: WindowConfig) -> Result<Self, FrameworkError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(config.width, config.height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title(&config.title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .map_err(|_| FrameworkError::Window)?;

        let window = window.ok_or(FrameworkError::Window)?;
        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 5))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config);

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
        })
    }

    /// Initializes the application and runs the event loop until the window
    /// closes or the application asks to exit.
    ///
    /// Initialization failures are fatal: the error is logged and the process
    /// exits non-zero.
    pub fn run<A: Application + 'static>(self, app: A) -> ! {
        let Runner {
            event_loop,
            gl_context,
            gl_window,
        } = self;

        let mut ctx = GlContext::new();
        let mut lifecycle = Lifecycle::new(app);

        if let Err(e) = lifecycle.init(&mut ctx) {
            log::error!("initialization failed: {e}");
            std::process::exit(1);
        }

        let size = gl_window.window.inner_size();
        lifecycle.reshape(&mut ctx, size.width, size.height);

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if size.width != 0 && size.height != 0 {
                            gl_window.surface.resize(
                                &gl_context,
                                NonZeroU32::new(size.width).unwrap(),
                                NonZeroU32::new(size.height).unwrap(),
                            );
                            lifecycle.reshape(&mut ctx, size.width, size.height);
                        }
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        if let Some(key) = input.virtual_keycode {
                            let pressed = input.state == ElementState::Pressed;

                            if lifecycle.key(key, pressed) == KeyResponse::Exit {
                                lifecycle.end(&mut ctx);
                                control_flow.set_exit();
                            }
                        }
                    }
                    WindowEvent::CloseRequested => {
                        lifecycle.end(&mut ctx);
                        control_flow.set_exit();
                    }
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    lifecycle.display(&mut ctx);
                    gl_window.surface.swap_buffers(&gl_context).unwrap();
                }
                Event::RedrawEventsCleared => {
                    gl_window.window.request_redraw();
                }
                Event::LoopDestroyed => {
                    // backstop, a no-op when escape or close already ran it
                    lifecycle.end(&mut ctx);
                }
                _ => (),
            }
        })
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    fn new(window: Window, config: &Config) -> Self {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );

        let surface = unsafe {
            config
                .display()
                .create_window_surface(config, &attrs)
                .unwrap()
        };

        Self { window, surface }
    }
}

#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error("could not create a window")]
    Window,
    #[error("could not create a GL context: {0}")]
    Context(#[from] glutin::error::Error),
}
