//! # Trainplan Backend
//!
//! Backend for a coach/athlete training-log application.
//!
//! This crate provides the server side of a weekly training planner: coaches
//! provision athlete accounts and plan sessions on a calendar grid, athletes
//! log completion data against those sessions. The backend exposes a REST
//! API via Axum for the web frontend.
//!
//! ## Features
//!
//! - **Account provisioning**: privileged creation and removal of athlete
//!   accounts on the hosted auth platform
//! - **Invitations**: single-use, expiring tokens that let a new athlete set
//!   their own password
//! - **Planning**: one planned session per athlete per day, organized in a
//!   rolling Monday-anchored week window
//! - **Completion logging**: structured completion data plus free-form
//!   completed sessions with subjective load markers
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Domain types shared across layers
//! - [`models`]: Calendar and week-window math
//! - [`db`]: Row storage, repository pattern, and persistence layer
//! - [`platform`]: Hosted auth platform client and its local stand-in
//! - [`services`]: Provisioning, invitation, password, and plan assembly
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod platform;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
