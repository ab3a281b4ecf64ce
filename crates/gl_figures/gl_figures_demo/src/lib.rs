// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::sync::mpsc::Receiver;

use gl_figures::Surface;
use glfw::{Action, Context, Glfw, Key, OpenGlProfileHint, WindowEvent, WindowHint, WindowMode};
use thiserror::Error;

pub mod debug;

#[derive(Debug, Error)]
pub enum WindowError {
	#[error("could not initialize GLFW: {0:?}")]
	Init(glfw::InitError),
	#[error("could not create window (glfwCreateWindow returned null)")]
	Creation,
	#[error("could not load OpenGL function {0}")]
	Loader(&'static str),
}

/// GLFW, plus the window hints used for the next window.
pub struct WindowSystem {
	glfw: Glfw,
}

/// A window with a current OpenGL context.
pub struct Window {
	glfw: Glfw,
	window: glfw::Window,
	events: Receiver<(f64, WindowEvent)>,
	resize: Option<(i32, i32)>,
}

impl WindowSystem {
	pub fn initialize() -> Result<Self, WindowError> {
		let glfw = glfw::init(glfw::LOG_ERRORS).map_err(WindowError::Init)?;
		Ok(Self { glfw })
	}

	pub fn configure_context(&mut self, major: u32, minor: u32, core_profile: bool) {
		self.glfw.window_hint(WindowHint::ContextVersion(major, minor));
		if core_profile {
			self.glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
			// required for core contexts on macOS
			self.glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
		}
	}

	pub fn set_debug_context(&mut self, enabled: bool) {
		self.glfw.window_hint(WindowHint::OpenGlDebugContext(enabled));
	}

	/// Create a window, make its context current and load OpenGL for it.
	pub fn create_window(
		&mut self,
		width: u32,
		height: u32,
		title: &str,
	) -> Result<Window, WindowError> {
		let (mut window, events) = self
			.glfw
			.create_window(width, height, title, WindowMode::Windowed)
			.ok_or(WindowError::Creation)?;

		window.make_current();
		window.set_framebuffer_size_polling(true);

		gl::load_with(|p| window.get_proc_address(p));
		check_gl_loaded()?;

		unsafe { gl::Viewport(0, 0, width as i32, height as i32) };

		log::info!("created {width}x{height} window {title:?}");
		Ok(Window {
			glfw: self.glfw.clone(),
			window,
			events,
			resize: None,
		})
	}
}

macro_rules! required_gl {
	($($func:ident),* $(,)?) => {
		fn check_gl_loaded() -> Result<(), WindowError> {
			$(
				if !gl::$func::is_loaded() {
					return Err(WindowError::Loader(concat!("gl", stringify!($func))))
				}
			)*
			Ok(())
		}
	}
}

required_gl! {
	CreateShader, ShaderSource, CompileShader, GetShaderiv, GetShaderInfoLog,
	CreateProgram, AttachShader, LinkProgram, GetProgramiv, UseProgram,
	GenBuffers, BindBuffer, BufferData, GenVertexArrays, BindVertexArray,
	VertexAttribPointer, EnableVertexAttribArray, DrawArrays,
	ClearColor, Clear, Viewport,
}

macro_rules! char_keys {
	($($c:literal => $key:ident),* $(,)?) => {
		/// GLFW key for `a-z`, `A-Z` and `0-9`.
		pub fn key_for_char(c: char) -> Option<Key> {
			match c.to_ascii_uppercase() {
				$($c => Some(Key::$key),)*
				_ => None,
			}
		}
	}
}

#[rustfmt::skip]
char_keys! {
	'A' => A, 'B' => B, 'C' => C, 'D' => D, 'E' => E, 'F' => F, 'G' => G,
	'H' => H, 'I' => I, 'J' => J, 'K' => K, 'L' => L, 'M' => M, 'N' => N,
	'O' => O, 'P' => P, 'Q' => Q, 'R' => R, 'S' => S, 'T' => T, 'U' => U,
	'V' => V, 'W' => W, 'X' => X, 'Y' => Y, 'Z' => Z,
	'0' => Num0, '1' => Num1, '2' => Num2, '3' => Num3, '4' => Num4,
	'5' => Num5, '6' => Num6, '7' => Num7, '8' => Num8, '9' => Num9,
}

impl Surface for Window {
	fn should_close(&self) -> bool {
		self.window.should_close()
	}

	fn request_close(&mut self) {
		self.window.set_should_close(true);
	}

	fn request_close_on_key(&mut self, key: char) {
		match key_for_char(key) {
			Some(key) =>
				if self.window.get_key(key) == Action::Press {
					log::debug!("{key:?} pressed, closing window");
					self.request_close();
				},
			None => log::debug!("no key for {key:?}, ignoring close request"),
		}
	}

	fn swap_buffers(&mut self) {
		self.window.swap_buffers();
	}

	fn poll_events(&mut self) {
		self.glfw.poll_events();
		for (_, event) in glfw::flush_messages(&self.events) {
			match event {
				WindowEvent::FramebufferSize(width, height) => {
					self.resize = Some((width, height));
				},
				_ => {},
			}
		}
	}

	fn take_resize(&mut self) -> Option<(i32, i32)> {
		self.resize.take()
	}
}
