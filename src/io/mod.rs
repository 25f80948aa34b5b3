// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: photo sources, JPEG export and composition files.

pub mod export;
pub mod serialization;
pub mod source;
