// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use std::path::PathBuf;

use crate::{
	driver::Driver,
	figure::{Figure, ShapeKind, VertexRecord},
	scene::Scene,
	shader::{ShaderLinkError, ShaderProgram, ShaderStage, ShaderUnit},
};


pub const TRIANGLE_VERTICES: [VertexRecord; 3] = [
	VertexRecord::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
	VertexRecord::new([0.0, -0.3, 0.0], [0.0, 1.0, 0.0]),
	VertexRecord::new([-0.5, 0.0, 0.0], [0.0, 0.0, 1.0]),
];

pub const RECTANGLE_VERTICES: [VertexRecord; 4] = [
	VertexRecord::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
	VertexRecord::new([0.0, 0.3, 0.0], [0.0, 1.0, 0.0]),
	VertexRecord::new([0.5, 0.0, 0.0], [0.0, 0.0, 1.0]),
	VertexRecord::new([0.5, 0.3, 0.0], [1.0, 0.0, 1.0]),
];

/// Fixed settings of the demo window and scene.
#[derive(Debug, Clone)]
pub struct AppConfig {
	pub width: u32,
	pub height: u32,
	pub title: String,
	/// Requested OpenGL context version, `(major, minor)`.
	pub gl_version: (u32, u32),
	pub core_profile: bool,
	/// Request a debug context and forward driver messages to the log.
	pub debug_context: bool,
	pub vertex_shader: PathBuf,
	pub fragment_shader: PathBuf,
	pub clear_color: [f32; 4],
	pub close_key: char,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			width: 800,
			height: 600,
			title: "test".to_owned(),
			gl_version: (4, 0),
			core_profile: true,
			debug_context: cfg!(debug_assertions),
			vertex_shader: "shaders/vertex.vs".into(),
			fragment_shader: "shaders/fragment.fs".into(),
			clear_color: [0.0, 0.0, 0.5, 1.0],
			close_key: 'F',
		}
	}
}

/// Compile, link and upload everything the demo draws.
///
/// Shader read, compile, attach and link failures are logged and
/// the scene is built anyway; only a program that cannot be created
/// at all is an error.
pub fn build_scene<'d, D: Driver>(
	driver: &'d D,
	config: &AppConfig,
) -> Result<Scene<'d, D>, ShaderLinkError> {
	let mut vertex = ShaderUnit::new(driver, ShaderStage::Vertex);
	vertex.load_source(&config.vertex_shader);
	// compile logs its own failures
	let _ = vertex.compile();

	let mut fragment = ShaderUnit::new(driver, ShaderStage::Fragment);
	fragment.load_source(&config.fragment_shader);
	let _ = fragment.compile();

	let mut program = ShaderProgram::create(driver)?;
	for unit in [&vertex, &fragment] {
		if let Err(e) = program.attach(unit) {
			log::warn!("{e}");
		}
	}
	let _ = program.link();

	let mut figures = vec![
		Figure::new(driver, ShapeKind::Triangle, TRIANGLE_VERTICES.to_vec()),
		Figure::new(driver, ShapeKind::Rectangle, RECTANGLE_VERTICES.to_vec()),
	];
	figures.iter_mut().for_each(Figure::upload_buffers);

	Ok(Scene::new(driver, program, figures, config.clear_color, config.close_key))
}
