//! Integration tests for chartwall-app.
//!
//! These tests verify the refresh cycle against fakes at both
//! boundaries: a scripted symbol source and a recording wall surface.

pub mod common;
