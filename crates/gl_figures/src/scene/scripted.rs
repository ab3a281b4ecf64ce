// Copyright (C) 2022 the ITK authors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/./

//! A [`Surface`] driven by a fixed script of per-frame input.

use std::collections::HashMap;

use super::Surface;

#[derive(Default)]
pub struct ScriptedSurface {
	/// Frame index (counted in `poll_events` calls) from which each key is held.
	pub pressed_from: HashMap<char, u64>,
	/// Resize reported by the poll ending the given frame.
	pub resizes: HashMap<u64, (i32, i32)>,
	/// Stop after this many frames even if nothing requested close.
	pub frame_limit: Option<u64>,
	pub frame: u64,
	pub swaps: u64,
	should_close: bool,
	pending_resize: Option<(i32, i32)>,
}

impl ScriptedSurface {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn press_from(mut self, key: char, frame: u64) -> Self {
		self.pressed_from.insert(key, frame);
		self
	}
}

impl Surface for ScriptedSurface {
	fn should_close(&self) -> bool {
		self.should_close || self.frame_limit.map(|l| self.frame >= l).unwrap_or(false)
	}

	fn request_close(&mut self) {
		self.should_close = true;
	}

	fn request_close_on_key(&mut self, key: char) {
		if self.pressed_from.get(&key).map(|k| self.frame >= *k).unwrap_or(false) {
			self.request_close();
		}
	}

	fn swap_buffers(&mut self) {
		self.swaps += 1;
	}

	fn poll_events(&mut self) {
		if let Some(size) = self.resizes.get(&self.frame) {
			self.pending_resize = Some(*size);
		}
		self.frame += 1;
	}

	fn take_resize(&mut self) -> Option<(i32, i32)> {
		self.pending_resize.take()
	}
}
