// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Compositing of the final pixel buffer.

pub mod compositor;
pub mod font;
