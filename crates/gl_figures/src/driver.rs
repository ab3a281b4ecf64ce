// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use gl::types::{GLbitfield, GLenum, GLfloat, GLint, GLsizei, GLuint};

use crate::figure::VertexAttribute;

mod opengl;
#[cfg(test)]
pub(crate) mod recording;

pub use opengl::GlDriver;

/// Maximum number of bytes read back from a shader or program info log.
pub const INFO_LOG_MAX: usize = 512;

/// The OpenGL entry points used by this crate.
///
/// Object names are plain `GLuint`s, as handed out by the driver.
/// A return value of 0 from any `create_*`/`gen_*` call means the object
/// could not be created.
pub trait Driver {
	fn create_shader(&self, ty: GLenum) -> GLuint;
	fn shader_source(&self, shader: GLuint, source: &str);
	fn compile_shader(&self, shader: GLuint);
	fn shader_compile_status(&self, shader: GLuint) -> bool;
	/// Read at most `max_len` bytes of the shader's info log.
	fn shader_info_log(&self, shader: GLuint, max_len: usize) -> String;
	fn delete_shader(&self, shader: GLuint);

	fn create_program(&self) -> GLuint;
	fn attach_shader(&self, program: GLuint, shader: GLuint);
	fn detach_shader(&self, program: GLuint, shader: GLuint);
	fn link_program(&self, program: GLuint);
	fn program_link_status(&self, program: GLuint) -> bool;
	/// Read at most `max_len` bytes of the program's info log.
	fn program_info_log(&self, program: GLuint, max_len: usize) -> String;
	fn use_program(&self, program: GLuint);
	fn delete_program(&self, program: GLuint);

	fn gen_buffer(&self) -> GLuint;
	fn bind_buffer(&self, target: GLenum, buffer: GLuint);
	fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum);
	fn delete_buffer(&self, buffer: GLuint);

	fn gen_vertex_array(&self) -> GLuint;
	fn bind_vertex_array(&self, vao: GLuint);
	fn delete_vertex_array(&self, vao: GLuint);
	/// Describe attribute `index` of the bound vertex array.
	/// `stride` and `offset` are in bytes.
	fn vertex_attrib_pointer(
		&self,
		index: GLuint,
		attribute: &VertexAttribute,
		stride: GLsizei,
		offset: usize,
	);
	fn enable_vertex_attrib_array(&self, index: GLuint);

	fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);
	fn clear_color(&self, r: GLfloat, g: GLfloat, b: GLfloat, a: GLfloat);
	fn clear(&self, mask: GLbitfield);
	fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
}
