//! Integration tests for vdp-seeder
//!
//! These tests use wiremock to stand in for dealer sites and run the batch
//! end-to-end over real HTTP.

mod batch_tests;
