// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use gl::types::{GLenum, GLsizei};

/// One interleaved vertex attribute: `count` components of a GL scalar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
	pub ty: GLenum,
	pub count: usize,
	pub ty_size: usize,
}

impl VertexAttribute {
	pub const fn new<T: GLtype>(count: usize) -> Self {
		VertexAttribute {
			ty: T::GL_TYPE,
			count,
			ty_size: std::mem::size_of::<T>(),
		}
	}

	#[inline]
	pub const fn size(&self) -> usize {
		self.count * self.ty_size
	}
}

/// Byte stride of a vertex made of `attributes`, laid out back to back.
pub fn stride(attributes: &[VertexAttribute]) -> GLsizei {
	attributes.iter().map(VertexAttribute::size).sum::<usize>() as GLsizei
}

/// Scalar types usable as float vertex attribute components.
pub trait GLtype: Sized {
	const GL_TYPE: GLenum;
}

impl GLtype for f32 {
	const GL_TYPE: GLenum = gl::FLOAT;
}
