// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::{fmt, fs, path::Path};

use gl::types::{GLenum, GLuint};
use thiserror::Error;

use crate::driver::{Driver, INFO_LOG_MAX};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
	Vertex,
	Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderHandle(pub GLuint);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHandle(pub GLuint);

/// A single shader stage: its source text and, once compiled,
/// the driver's shader object.
pub struct ShaderUnit<'d, D: Driver> {
	driver: &'d D,
	stage: ShaderStage,
	source: String,
	handle: Option<ShaderHandle>,
}

/// Shader units linked into one executable program.
pub struct ShaderProgram<'d, D: Driver> {
	driver: &'d D,
	program: ProgramHandle,
	attached: Vec<(ShaderStage, ShaderHandle)>,
	linked: bool,
}

impl ShaderStage {
	#[inline]
	pub fn gl_type(&self) -> GLenum {
		match self {
			Self::Vertex => gl::VERTEX_SHADER,
			Self::Fragment => gl::FRAGMENT_SHADER,
		}
	}
}

impl fmt::Display for ShaderStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Vertex => "vertex",
			Self::Fragment => "fragment",
		})
	}
}

#[derive(Debug, Error)]
pub enum ShaderCompileError {
	#[error("could not create shader (glCreateShader returned 0)")]
	CouldNotCreate,
	#[error("could not compile shader - driver log:\n{0}\n")]
	Compile(String),
}

#[derive(Debug, Error)]
pub enum ShaderLinkError {
	#[error("could not create program (glCreateProgram returned 0)")]
	CouldNotCreate,
	#[error("{0} shader must be compiled before it is attached")]
	NotCompiled(ShaderStage),
	#[error("no {0} shader attached")]
	MissingStage(ShaderStage),
	#[error("could not link shader - driver log:\n{0}\n")]
	Link(String),
}

impl<'d, D: Driver> ShaderUnit<'d, D> {
	pub fn new(driver: &'d D, stage: ShaderStage) -> Self {
		Self {
			driver,
			stage,
			source: String::new(),
			handle: None,
		}
	}

	/// Read the shader source from `path`.
	///
	/// A file that cannot be read is logged and leaves the source empty,
	/// which then fails in [`compile`](Self::compile).
	pub fn load_source(&mut self, path: impl AsRef<Path>) {
		let path = path.as_ref();
		self.source = match fs::read_to_string(path) {
			Ok(source) => source,
			Err(e) => {
				log::error!("could not read {} shader source {path:?}: {e}", self.stage);
				String::new()
			},
		};
	}

	pub fn set_source(&mut self, source: impl Into<String>) {
		self.source = source.into();
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn stage(&self) -> ShaderStage {
		self.stage
	}

	pub fn compile(&mut self) -> Result<ShaderHandle, ShaderCompileError> {
		self.release();

		let shader = self.driver.create_shader(self.stage.gl_type());
		if shader == 0 {
			return Err(ShaderCompileError::CouldNotCreate)
		}

		self.driver.shader_source(shader, &self.source);
		self.driver.compile_shader(shader);

		if !self.driver.shader_compile_status(shader) {
			let log = self.driver.shader_info_log(shader, INFO_LOG_MAX);
			log::error!("{} shader compilation failed:\n{log}", self.stage);
			self.driver.delete_shader(shader);

			return Err(ShaderCompileError::Compile(log))
		}

		log::debug!("compiled {} shader {shader}", self.stage);
		let handle = ShaderHandle(shader);
		self.handle = Some(handle);
		Ok(handle)
	}

	/// The compiled shader object, if the last [`compile`](Self::compile) succeeded.
	pub fn handle(&self) -> Option<ShaderHandle> {
		self.handle
	}

	fn release(&mut self) {
		if let Some(ShaderHandle(shader)) = self.handle.take() {
			self.driver.delete_shader(shader);
		}
	}
}

impl<D: Driver> Drop for ShaderUnit<'_, D> {
	fn drop(&mut self) {
		// Reduces refcount for shader.
		// The backing object stays alive while attached to a program.
		self.release();
	}
}

impl<'d, D: Driver> ShaderProgram<'d, D> {
	pub fn create(driver: &'d D) -> Result<Self, ShaderLinkError> {
		let program = driver.create_program();
		if program == 0 {
			return Err(ShaderLinkError::CouldNotCreate)
		}

		Ok(Self {
			driver,
			program: ProgramHandle(program),
			attached: Vec::new(),
			linked: false,
		})
	}

	/// Attach a compiled unit. Attaching the same shader object twice is a no-op.
	pub fn attach(&mut self, unit: &ShaderUnit<'_, D>) -> Result<(), ShaderLinkError> {
		let shader = unit.handle().ok_or(ShaderLinkError::NotCompiled(unit.stage()))?;
		if self.attached.iter().any(|(_, s)| *s == shader) {
			log::debug!("shader {} already attached to program {}", shader.0, self.program.0);
			return Ok(())
		}

		self.driver.attach_shader(self.program.0, shader.0);
		self.attached.push((unit.stage(), shader));
		Ok(())
	}

	/// Link the attached units, then detach them.
	///
	/// Linking an already linked program does nothing, since its
	/// shaders are no longer attached.
	pub fn link(&mut self) -> Result<(), ShaderLinkError> {
		if self.linked {
			log::debug!("program {} already linked", self.program.0);
			return Ok(())
		}

		for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
			if !self.attached.iter().any(|(s, _)| *s == stage) {
				log::error!("cannot link program {}: no {stage} shader", self.program.0);
				return Err(ShaderLinkError::MissingStage(stage))
			}
		}

		self.driver.link_program(self.program.0);

		// allows earlier deletion of shader objects.
		for (_, shader) in self.attached.drain(..) {
			self.driver.detach_shader(self.program.0, shader.0);
		}

		if !self.driver.program_link_status(self.program.0) {
			let log = self.driver.program_info_log(self.program.0, INFO_LOG_MAX);
			log::error!("program linking failed:\n{log}");

			return Err(ShaderLinkError::Link(log))
		}

		log::debug!("linked program {}", self.program.0);
		self.linked = true;
		Ok(())
	}

	pub fn handle(&self) -> ProgramHandle {
		self.program
	}

	pub fn is_linked(&self) -> bool {
		self.linked
	}

	/// Make this program current. An unlinked program binds program 0 instead.
	pub fn bind(&self) {
		match self.linked {
			true => self.driver.use_program(self.program.0),
			false => self.driver.use_program(0),
		}
	}
}

impl<D: Driver> Drop for ShaderProgram<'_, D> {
	fn drop(&mut self) {
		self.driver.delete_program(self.program.0);
	}
}
