mod gl_;
mod window;

use crate::Key;

pub(crate) use gl_::Gl;
pub use window::GLFWWindow;

pub(crate) fn glfw_key_to_key(key: glfw::Key) -> Option<Key> {
    match key {
        glfw::Key::Right => Some(Key::Right),
        _ => None,
    }
}
