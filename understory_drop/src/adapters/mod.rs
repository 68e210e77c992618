// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host trait implementations for concrete element trees.
//!
//! Each adapter is behind a feature so the core crate carries no tree dependency.

#[cfg(feature = "element_tree_adapter")]
pub mod element_tree;
