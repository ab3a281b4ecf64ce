// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! Draws a triangle and a rectangle until the window is closed or `F` is pressed.
//!
//! Shaders are read from `shaders/vertex.vs` and `shaders/fragment.fs`
//! relative to the working directory.

use std::process::ExitCode;

use gl_figures::{build_scene, AppConfig, GlDriver};
use gl_figures_demo::{debug, WindowSystem};

fn main() -> ExitCode {
	env_logger::init();

	let config = AppConfig::default();

	let mut window_system = match WindowSystem::initialize() {
		Ok(x) => x,
		Err(e) => {
			log::error!("{e}");
			return ExitCode::FAILURE
		},
	};

	let (major, minor) = config.gl_version;
	window_system.configure_context(major, minor, config.core_profile);
	window_system.set_debug_context(config.debug_context);

	let mut window =
		match window_system.create_window(config.width, config.height, &config.title) {
			Ok(x) => x,
			Err(e) => {
				log::error!("{e}");
				return ExitCode::FAILURE
			},
		};

	if config.debug_context && !debug::setup_gl_debug() {
		log::warn!("driver has no debug output, OpenGL messages will not be logged");
	}

	// SAFETY: `create_window` loaded OpenGL for the window's context,
	// which stays current on this thread until `window` is dropped.
	let driver = unsafe { GlDriver::new() };

	let scene = match build_scene(&driver, &config) {
		Ok(x) => x,
		Err(e) => {
			log::error!("{e}");
			return ExitCode::FAILURE
		},
	};

	scene.run(&mut window);
	ExitCode::SUCCESS
}
