// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the scene and the overlay transform.

pub mod overlay;
pub mod scene;
