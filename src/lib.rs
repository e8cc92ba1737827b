// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava Club Tracker: periodic fetch-and-merge of a club's activity feed
//!
//! This crate pulls a Strava club's public activities page by page, keeps a
//! duplicate-free CSV dataset of them across runs, and computes descriptive
//! statistics over that dataset.
//!
//! Runs are expected to be sequential. Nothing guards the dataset file
//! against two processes writing it at the same time.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod error_log;
pub mod models;
pub mod services;
pub mod time_utils;
