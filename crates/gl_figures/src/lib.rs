// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Small OpenGL figure renderer: shader units, a linked program,
//! static vertex figures and a frame loop over a window [`scene::Surface`].

pub mod app;
pub mod driver;
pub mod figure;
pub mod scene;
pub mod shader;

pub use app::{build_scene, AppConfig};
pub use driver::{Driver, GlDriver};
pub use figure::{Figure, FigureError, ShapeKind, VertexRecord};
pub use scene::{Scene, Surface};
pub use shader::{
	ProgramHandle,
	ShaderCompileError,
	ShaderHandle,
	ShaderLinkError,
	ShaderProgram,
	ShaderStage,
	ShaderUnit,
};
