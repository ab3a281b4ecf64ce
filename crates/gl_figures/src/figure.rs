// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use gl::types::{GLint, GLsizei, GLuint};
use thiserror::Error;

pub use self::attribute::VertexAttribute;
use crate::driver::Driver;

pub mod attribute;

/// Number of `f32`s in one [`VertexRecord`].
pub const RECORD_FLOATS: usize = 6;

const _: () = assert!(std::mem::size_of::<VertexRecord>() == RECORD_FLOATS * 4);

/// Position and color of one vertex, stored interleaved.
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct VertexRecord {
	pub position: [f32; 3],
	pub color: [f32; 3],
}

impl VertexRecord {
	/// position at offset 0, color right after it.
	pub const VERTEX_ATTRIBUTES: &'static [VertexAttribute] =
		&[VertexAttribute::new::<f32>(3), VertexAttribute::new::<f32>(3)];

	pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
		Self { position, color }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
	Triangle,
	Rectangle,
}

impl ShapeKind {
	/// `(first, count)` of each `TRIANGLES` draw issued for this shape.
	///
	/// A rectangle is drawn as two 3-vertex triangles starting at
	/// vertices 0 and 1 of its 4 uploaded vertices.
	pub const fn draw_ranges(&self) -> &'static [(GLint, GLsizei)] {
		match self {
			Self::Triangle => &[(0, 3)],
			Self::Rectangle => &[(0, 3), (1, 3)],
		}
	}
}

#[derive(Debug, Error)]
pub enum FigureError {
	#[error("{0} floats do not make whole vertex records of {} floats", RECORD_FLOATS)]
	Misaligned(usize),
}

struct GpuBuffers {
	vbo: GLuint,
	vao: GLuint,
}

/// A fixed shape and its static vertex buffer.
pub struct Figure<'d, D: Driver> {
	driver: &'d D,
	kind: ShapeKind,
	vertices: Vec<VertexRecord>,
	buffers: Option<GpuBuffers>,
}

impl<'d, D: Driver> Figure<'d, D> {
	pub fn new(driver: &'d D, kind: ShapeKind, vertices: Vec<VertexRecord>) -> Self {
		Self {
			driver,
			kind,
			vertices,
			buffers: None,
		}
	}

	/// Build a figure from flattened `[x, y, z, r, g, b, ...]` floats.
	pub fn from_flat(driver: &'d D, kind: ShapeKind, floats: &[f32]) -> Result<Self, FigureError> {
		let vertices = bytemuck::try_cast_slice::<f32, VertexRecord>(floats)
			.map_err(|_| FigureError::Misaligned(floats.len()))?;

		Ok(Self::new(driver, kind, vertices.to_vec()))
	}

	pub fn kind(&self) -> ShapeKind {
		self.kind
	}

	pub fn vertices(&self) -> &[VertexRecord] {
		&self.vertices
	}

	pub fn is_uploaded(&self) -> bool {
		self.buffers.is_some()
	}

	/// Upload the vertices into a new static vertex buffer and
	/// describe their layout in a new vertex array.
	///
	/// Only the first call uploads; the buffer is never rewritten.
	pub fn upload_buffers(&mut self) {
		if self.buffers.is_some() {
			log::warn!("{:?} figure already uploaded, ignoring", self.kind);
			return
		}

		let vbo = self.driver.gen_buffer();
		self.driver.bind_buffer(gl::ARRAY_BUFFER, vbo);
		self.driver.buffer_data(
			gl::ARRAY_BUFFER,
			bytemuck::cast_slice(self.vertices.as_slice()),
			gl::STATIC_DRAW,
		);

		let vao = self.driver.gen_vertex_array();
		self.driver.bind_vertex_array(vao);
		self.set_vertex_attributes();

		log::debug!(
			"uploaded {:?} figure: {} vertices (vbo {vbo}, vao {vao})",
			self.kind,
			self.vertices.len()
		);
		self.buffers = Some(GpuBuffers { vbo, vao });
	}

	/// # NOTES
	/// * VAO and VBO must be bound
	fn set_vertex_attributes(&self) {
		let stride = attribute::stride(VertexRecord::VERTEX_ATTRIBUTES);
		let mut offset = 0;

		for (i, attribute) in VertexRecord::VERTEX_ATTRIBUTES.iter().enumerate() {
			self.driver.vertex_attrib_pointer(i as u32, attribute, stride, offset);
			self.driver.enable_vertex_attrib_array(i as u32);

			offset += attribute.size();
		}
	}

	/// Issue this figure's draw calls with whatever program is bound.
	pub fn draw(&self) {
		let Some(buffers) = &self.buffers else {
			log::trace!("{:?} figure drawn before upload, skipping", self.kind);
			return
		};

		self.driver.bind_vertex_array(buffers.vao);
		for &(first, count) in self.kind.draw_ranges() {
			self.driver.draw_arrays(gl::TRIANGLES, first, count);
		}
	}
}

impl<D: Driver> Drop for Figure<'_, D> {
	fn drop(&mut self) {
		if let Some(GpuBuffers { vbo, vao }) = self.buffers.take() {
			self.driver.delete_vertex_array(vao);
			self.driver.delete_buffer(vbo);
		}
	}
}
