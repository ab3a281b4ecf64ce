// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::{ffi::c_void, marker::PhantomData};

use gl::types::{GLbitfield, GLchar, GLenum, GLfloat, GLint, GLsizei, GLsizeiptr, GLuint};

use super::Driver;
use crate::figure::VertexAttribute;

/// [`Driver`] backed by the loaded OpenGL function pointers.
///
/// Not `Send` or `Sync`: a GL context is current on exactly one thread.
pub struct GlDriver {
	_not_send: PhantomData<*const ()>,
}

impl GlDriver {
	/// # SAFETY
	/// * GL function pointers must be loaded (`gl::load_with`)
	/// * the context they were loaded for must be current on this thread
	///   for as long as the driver lives
	pub unsafe fn new() -> Self {
		Self {
			_not_send: PhantomData,
		}
	}
}

/// Reads an info log through `read`, which receives the buffer capacity,
/// a slot for the written length, and the buffer.
unsafe fn read_info_log(
	max_len: usize,
	read: impl FnOnce(GLsizei, &mut GLsizei, *mut GLchar),
) -> String {
	let mut log = vec![0u8; max_len];
	let mut written = 0 as GLsizei;
	read(max_len as GLsizei, &mut written, log.as_mut_ptr() as *mut GLchar);
	// written length excludes the null terminator
	log.truncate(written.clamp(0, max_len as GLsizei) as usize);

	// drivers should not hand back invalid utf8, but a truncated
	// log can split a multibyte character.
	String::from_utf8_lossy(&log).into_owned()
}

impl Driver for GlDriver {
	fn create_shader(&self, ty: GLenum) -> GLuint {
		unsafe { gl::CreateShader(ty) }
	}

	fn shader_source(&self, shader: GLuint, source: &str) {
		let src_ptr = source.as_bytes().as_ptr() as *const GLchar;
		let len = source.len() as GLint;
		unsafe { gl::ShaderSource(shader, 1, &src_ptr, &len) };
	}

	fn compile_shader(&self, shader: GLuint) {
		unsafe { gl::CompileShader(shader) };
	}

	fn shader_compile_status(&self, shader: GLuint) -> bool {
		let mut compile_status = 0 as GLint;
		unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut compile_status) };
		compile_status == gl::TRUE as GLint
	}

	fn shader_info_log(&self, shader: GLuint, max_len: usize) -> String {
		unsafe {
			read_info_log(max_len, |cap, written, buf| {
				gl::GetShaderInfoLog(shader, cap, written, buf)
			})
		}
	}

	fn delete_shader(&self, shader: GLuint) {
		// The driver only deletes the backing object once it is
		// no longer attached to any program.
		unsafe { gl::DeleteShader(shader) };
	}

	fn create_program(&self) -> GLuint {
		unsafe { gl::CreateProgram() }
	}

	fn attach_shader(&self, program: GLuint, shader: GLuint) {
		unsafe { gl::AttachShader(program, shader) };
	}

	fn detach_shader(&self, program: GLuint, shader: GLuint) {
		unsafe { gl::DetachShader(program, shader) };
	}

	fn link_program(&self, program: GLuint) {
		unsafe { gl::LinkProgram(program) };
	}

	fn program_link_status(&self, program: GLuint) -> bool {
		let mut link_status = 0 as GLint;
		unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut link_status) };
		link_status == gl::TRUE as GLint
	}

	fn program_info_log(&self, program: GLuint, max_len: usize) -> String {
		unsafe {
			read_info_log(max_len, |cap, written, buf| {
				gl::GetProgramInfoLog(program, cap, written, buf)
			})
		}
	}

	fn use_program(&self, program: GLuint) {
		unsafe { gl::UseProgram(program) };
	}

	fn delete_program(&self, program: GLuint) {
		unsafe { gl::DeleteProgram(program) };
	}

	fn gen_buffer(&self) -> GLuint {
		let mut buffer = 0;
		unsafe { gl::GenBuffers(1, &mut buffer) };
		buffer
	}

	fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
		unsafe { gl::BindBuffer(target, buffer) };
	}

	fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum) {
		unsafe {
			gl::BufferData(
				target,
				data.len() as GLsizeiptr,
				data.as_ptr() as *const c_void,
				usage,
			)
		};
	}

	fn delete_buffer(&self, buffer: GLuint) {
		unsafe { gl::DeleteBuffers(1, &buffer) };
	}

	fn gen_vertex_array(&self) -> GLuint {
		let mut vao = 0;
		unsafe { gl::GenVertexArrays(1, &mut vao) };
		vao
	}

	fn bind_vertex_array(&self, vao: GLuint) {
		unsafe { gl::BindVertexArray(vao) };
	}

	fn delete_vertex_array(&self, vao: GLuint) {
		unsafe { gl::DeleteVertexArrays(1, &vao) };
	}

	fn vertex_attrib_pointer(
		&self,
		index: GLuint,
		attribute: &VertexAttribute,
		stride: GLsizei,
		offset: usize,
	) {
		unsafe {
			gl::VertexAttribPointer(
				index,
				attribute.count as GLint,
				attribute.ty,
				gl::FALSE,
				stride,
				offset as *const c_void,
			)
		};
	}

	fn enable_vertex_attrib_array(&self, index: GLuint) {
		unsafe { gl::EnableVertexAttribArray(index) };
	}

	fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
		unsafe { gl::DrawArrays(mode, first, count) };
	}

	fn clear_color(&self, r: GLfloat, g: GLfloat, b: GLfloat, a: GLfloat) {
		unsafe { gl::ClearColor(r, g, b, a) };
	}

	fn clear(&self, mask: GLbitfield) {
		unsafe { gl::Clear(mask) };
	}

	fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
		unsafe { gl::Viewport(x, y, width, height) };
	}
}
