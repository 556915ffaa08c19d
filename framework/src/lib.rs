pub mod app;
pub mod shaders;
pub mod window;

pub use app::{Application, GlContext, Key, KeyResponse, Lifecycle, LifecycleError, SceneError};
pub use window::{FrameworkError, Runner, WindowConfig};
