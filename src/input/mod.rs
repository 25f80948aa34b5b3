// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Gesture interpretation.
//!
//! This module turns raw pointer events into overlay mutations: a drag
//! session translates the overlay, and a two-pointer horizontal pinch
//! nudges the zoom percentage. The UI layer is only a thin adapter that
//! synthesizes [`PointerEvent`]s from mouse and touch input.

pub mod gesture;

pub use gesture::{GestureController, PointerEvent, PointerKind};
