// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Donation Tracker - Auth Server
//!
//! Bearer-token authentication for the donation tracker API, plus the
//! profile sync that mirrors every authenticated user into the hosted
//! record store.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token parsing, claims validation, the auth gate
//! - `profiles` - Local profile storage (record store or in-memory)
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod profiles;
pub mod state;
