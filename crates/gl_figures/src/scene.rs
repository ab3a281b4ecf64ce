// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

use crate::{driver::Driver, figure::Figure, shader::ShaderProgram};

#[cfg(test)]
pub(crate) mod scripted;

/// The window side of the frame loop.
pub trait Surface {
	fn should_close(&self) -> bool;
	fn request_close(&mut self);
	/// Request close if `key` is currently held down.
	fn request_close_on_key(&mut self, key: char);
	fn swap_buffers(&mut self);
	/// Process pending window system events.
	fn poll_events(&mut self);
	/// Framebuffer size seen by the last [`poll_events`](Self::poll_events),
	/// if it changed. Returned once.
	fn take_resize(&mut self) -> Option<(i32, i32)>;
}

/// Everything drawn each frame.
pub struct Scene<'d, D: Driver> {
	driver: &'d D,
	program: ShaderProgram<'d, D>,
	figures: Vec<Figure<'d, D>>,
	clear_color: [f32; 4],
	close_key: char,
}

impl<'d, D: Driver> Scene<'d, D> {
	pub fn new(
		driver: &'d D,
		program: ShaderProgram<'d, D>,
		figures: Vec<Figure<'d, D>>,
		clear_color: [f32; 4],
		close_key: char,
	) -> Self {
		Self {
			driver,
			program,
			figures,
			clear_color,
			close_key,
		}
	}

	pub fn program(&self) -> &ShaderProgram<'d, D> {
		&self.program
	}

	pub fn figures(&self) -> &[Figure<'d, D>] {
		&self.figures
	}

	pub fn render_frame(&self, surface: &mut impl Surface) {
		if let Some((width, height)) = surface.take_resize() {
			log::debug!("framebuffer resized to {width}x{height}");
			self.driver.viewport(0, 0, width, height);
		}

		surface.request_close_on_key(self.close_key);

		let [r, g, b, a] = self.clear_color;
		self.driver.clear_color(r, g, b, a);
		self.driver.clear(gl::COLOR_BUFFER_BIT);

		self.program.bind();
		self.figures.iter().for_each(Figure::draw);

		surface.swap_buffers();
		surface.poll_events();
	}

	/// Render frames until the surface is asked to close.
	/// Returns the number of frames rendered.
	pub fn run(&self, surface: &mut impl Surface) -> u64 {
		let mut frames = 0;
		while !surface.should_close() {
			self.render_frame(surface);
			frames += 1;
		}

		log::info!("surface closed after {frames} frames");
		frames
	}
}
