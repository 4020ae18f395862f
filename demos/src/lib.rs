// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable Canopy demos. See the `examples/` directory of this package;
//! each demo drives the dispatcher headlessly over the in-memory scene.
