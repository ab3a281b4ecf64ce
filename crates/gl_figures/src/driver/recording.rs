// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! A [`Driver`] that records every call instead of talking to a GPU.
//!
//! Compilation succeeds for any source containing `void main`.
//! Linking succeeds when the attached shaders are all compiled and
//! include both a vertex and a fragment shader.

use std::{
	cell::{Cell, RefCell},
	collections::HashMap,
};

use gl::types::{GLbitfield, GLenum, GLfloat, GLint, GLsizei, GLuint};

use super::Driver;
use crate::figure::VertexAttribute;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	CreateShader(GLenum),
	ShaderSource(GLuint),
	CompileShader(GLuint),
	DeleteShader(GLuint),
	CreateProgram,
	AttachShader(GLuint, GLuint),
	DetachShader(GLuint, GLuint),
	LinkProgram(GLuint),
	UseProgram(GLuint),
	DeleteProgram(GLuint),
	GenBuffer(GLuint),
	BindBuffer(GLenum, GLuint),
	BufferData {
		target: GLenum,
		data: Vec<u8>,
		usage: GLenum,
	},
	DeleteBuffer(GLuint),
	GenVertexArray(GLuint),
	BindVertexArray(GLuint),
	DeleteVertexArray(GLuint),
	VertexAttribPointer {
		index: GLuint,
		count: usize,
		ty: GLenum,
		stride: GLsizei,
		offset: usize,
	},
	EnableVertexAttribArray(GLuint),
	DrawArrays {
		mode: GLenum,
		first: GLint,
		count: GLsizei,
	},
	ClearColor([GLfloat; 4]),
	Clear(GLbitfield),
	Viewport(GLint, GLint, GLsizei, GLsizei),
}

struct RecordedShader {
	ty: GLenum,
	source: String,
	compiled: bool,
}

#[derive(Default)]
struct RecordedProgram {
	attached: Vec<GLuint>,
	linked: bool,
}

#[derive(Default)]
pub struct RecordingDriver {
	calls: RefCell<Vec<Call>>,
	next_name: Cell<GLuint>,
	/// Makes every `create_*` call return 0.
	pub refuse_create: Cell<bool>,
	/// Makes every link fail, as for mismatched stage interfaces.
	pub refuse_link: Cell<bool>,
	shaders: RefCell<HashMap<GLuint, RecordedShader>>,
	programs: RefCell<HashMap<GLuint, RecordedProgram>>,
}

impl RecordingDriver {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.borrow().clone()
	}

	pub fn take_calls(&self) -> Vec<Call> {
		self.calls.take()
	}

	/// `(first, count)` of every recorded draw call, in order.
	pub fn draws(&self) -> Vec<(GLint, GLsizei)> {
		self.calls
			.borrow()
			.iter()
			.filter_map(|call| match call {
				Call::DrawArrays { first, count, .. } => Some((*first, *count)),
				_ => None,
			})
			.collect()
	}

	fn record(&self, call: Call) {
		self.calls.borrow_mut().push(call);
	}

	fn name(&self) -> GLuint {
		let name = self.next_name.get() + 1;
		self.next_name.set(name);
		name
	}
}

/// Cut a log to `max_len - 1` bytes, like a driver writing into a
/// `max_len` byte buffer with a null terminator.
fn truncate_log(log: String, max_len: usize) -> String {
	let bytes = &log.as_bytes()[..log.len().min(max_len.saturating_sub(1))];
	String::from_utf8_lossy(bytes).into_owned()
}

impl Driver for RecordingDriver {
	fn create_shader(&self, ty: GLenum) -> GLuint {
		self.record(Call::CreateShader(ty));
		if self.refuse_create.get() {
			return 0
		}

		let shader = self.name();
		self.shaders.borrow_mut().insert(shader, RecordedShader {
			ty,
			source: String::new(),
			compiled: false,
		});
		shader
	}

	fn shader_source(&self, shader: GLuint, source: &str) {
		self.record(Call::ShaderSource(shader));
		if let Some(s) = self.shaders.borrow_mut().get_mut(&shader) {
			s.source = source.to_owned();
		}
	}

	fn compile_shader(&self, shader: GLuint) {
		self.record(Call::CompileShader(shader));
		if let Some(s) = self.shaders.borrow_mut().get_mut(&shader) {
			s.compiled = s.source.contains("void main");
		}
	}

	fn shader_compile_status(&self, shader: GLuint) -> bool {
		self.shaders.borrow().get(&shader).map(|s| s.compiled).unwrap_or(false)
	}

	fn shader_info_log(&self, shader: GLuint, max_len: usize) -> String {
		let log = match self.shaders.borrow().get(&shader) {
			Some(s) if s.compiled => String::new(),
			Some(s) if s.source.trim().is_empty() =>
				"0:1(1): error: syntax error, unexpected end of file".to_owned(),
			Some(_) => "0:1(1): error: missing function `main`".to_owned(),
			None => "error: invalid shader name".to_owned(),
		};
		truncate_log(log, max_len)
	}

	fn delete_shader(&self, shader: GLuint) {
		self.record(Call::DeleteShader(shader));
	}

	fn create_program(&self) -> GLuint {
		self.record(Call::CreateProgram);
		if self.refuse_create.get() {
			return 0
		}

		let program = self.name();
		self.programs.borrow_mut().insert(program, RecordedProgram::default());
		program
	}

	fn attach_shader(&self, program: GLuint, shader: GLuint) {
		self.record(Call::AttachShader(program, shader));
		if let Some(p) = self.programs.borrow_mut().get_mut(&program) {
			p.attached.push(shader);
		}
	}

	fn detach_shader(&self, program: GLuint, shader: GLuint) {
		self.record(Call::DetachShader(program, shader));
		if let Some(p) = self.programs.borrow_mut().get_mut(&program) {
			p.attached.retain(|s| *s != shader);
		}
	}

	fn link_program(&self, program: GLuint) {
		self.record(Call::LinkProgram(program));
		let shaders = self.shaders.borrow();
		if let Some(p) = self.programs.borrow_mut().get_mut(&program) {
			let attached = p.attached.iter().filter_map(|s| shaders.get(s)).collect::<Vec<_>>();
			p.linked = !self.refuse_link.get()
				&& attached.iter().all(|s| s.compiled)
				&& attached.iter().any(|s| s.ty == gl::VERTEX_SHADER)
				&& attached.iter().any(|s| s.ty == gl::FRAGMENT_SHADER);
		}
	}

	fn program_link_status(&self, program: GLuint) -> bool {
		self.programs.borrow().get(&program).map(|p| p.linked).unwrap_or(false)
	}

	fn program_info_log(&self, program: GLuint, max_len: usize) -> String {
		let log = match self.program_link_status(program) {
			true => String::new(),
			false => "error: fragment shader input `v_color` has no matching vertex shader output"
				.to_owned(),
		};
		truncate_log(log, max_len)
	}

	fn use_program(&self, program: GLuint) {
		self.record(Call::UseProgram(program));
	}

	fn delete_program(&self, program: GLuint) {
		self.record(Call::DeleteProgram(program));
	}

	fn gen_buffer(&self) -> GLuint {
		let buffer = self.name();
		self.record(Call::GenBuffer(buffer));
		buffer
	}

	fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
		self.record(Call::BindBuffer(target, buffer));
	}

	fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum) {
		self.record(Call::BufferData {
			target,
			data: data.to_vec(),
			usage,
		});
	}

	fn delete_buffer(&self, buffer: GLuint) {
		self.record(Call::DeleteBuffer(buffer));
	}

	fn gen_vertex_array(&self) -> GLuint {
		let vao = self.name();
		self.record(Call::GenVertexArray(vao));
		vao
	}

	fn bind_vertex_array(&self, vao: GLuint) {
		self.record(Call::BindVertexArray(vao));
	}

	fn delete_vertex_array(&self, vao: GLuint) {
		self.record(Call::DeleteVertexArray(vao));
	}

	fn vertex_attrib_pointer(
		&self,
		index: GLuint,
		attribute: &VertexAttribute,
		stride: GLsizei,
		offset: usize,
	) {
		self.record(Call::VertexAttribPointer {
			index,
			count: attribute.count,
			ty: attribute.ty,
			stride,
			offset,
		});
	}

	fn enable_vertex_attrib_array(&self, index: GLuint) {
		self.record(Call::EnableVertexAttribArray(index));
	}

	fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
		self.record(Call::DrawArrays { mode, first, count });
	}

	fn clear_color(&self, r: GLfloat, g: GLfloat, b: GLfloat, a: GLfloat) {
		self.record(Call::ClearColor([r, g, b, a]));
	}

	fn clear(&self, mask: GLbitfield) {
		self.record(Call::Clear(mask));
	}

	fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
		self.record(Call::Viewport(x, y, width, height));
	}
}
