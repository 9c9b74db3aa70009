use std::{
    thread,
    time::{Duration, Instant},
};

use glfw::Context;

use crate::{
    platform::{WindowClient, WindowEvent},
    EngineError,
};

use super::Gl;

pub struct GLFWWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,

    frame_time: Duration,

    gl: super::Gl,
}

impl crate::platform::WindowTrait for GLFWWindow {
    fn new(width: u32, height: u32, title: &str, frame_rate: u32) -> Result<Self, EngineError> {
        let mut glfw = glfw::init(|error, description| {
            log::error!("glfw error {error:?}: {description}");
        })?;

        glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
        glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(EngineError::WindowCreation { width, height })?;

        window.make_current();

        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);
        window.set_key_polling(true);

        let mut gl = Gl::new(width, height, |s| window.get_proc_address(s) as _)?;

        let (framebuffer_width, framebuffer_height) = window.get_framebuffer_size();
        gl.resize(framebuffer_width as u32, framebuffer_height as u32);

        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        Ok(Self {
            glfw,
            window,
            events,

            frame_time: Duration::from_nanos(1_000_000_000 / frame_rate.max(1) as u64),

            gl,
        })
    }

    fn run<T>(&mut self, client: &mut T) -> Result<(), EngineError>
    where
        T: WindowClient,
    {
        let mut next_frame_time = Instant::now() + self.frame_time;

        loop {
            self.glfw.poll_events();

            for (_, glfw_event) in glfw::flush_messages(&self.events) {
                use crate::platform::WindowEvent as W;
                use glfw::WindowEvent as E;
                let event = match glfw_event {
                    E::Key(key, _, action, _) => W::Key {
                        key: match super::glfw_key_to_key(key) {
                            Some(key) => key,
                            None => continue,
                        },
                        pressed: match action {
                            glfw::Action::Release => false,
                            glfw::Action::Press => true,
                            glfw::Action::Repeat => continue,
                        },
                    },
                    E::FramebufferSize(width, height) => {
                        self.gl.resize(width as u32, height as u32);
                        continue;
                    }
                    E::Close => WindowEvent::WindowClose,
                    _ => continue,
                };

                client.handle_event(event);
            }

            if !client.frame() {
                return Ok(());
            }

            self.gl.draw(client.get_pixels())?;
            self.window.swap_buffers();

            let cur_time = Instant::now();
            if cur_time < next_frame_time {
                thread::sleep(next_frame_time - cur_time);
                next_frame_time += self.frame_time;
            } else {
                // Fell behind, drop the missed deadlines instead of bursting.
                next_frame_time = cur_time + self.frame_time;
            }
        }
    }
}

impl Drop for GLFWWindow {
    fn drop(&mut self) {
        self.gl.deinit();
    }
}
