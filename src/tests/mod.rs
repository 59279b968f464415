//! Crate-level test suites.
//!
//! - `team_client_tests`: HTTP behaviour of the team client against a
//!   wiremock server
//! - `app_flow_tests`: end-to-end flows through `AppState` (load, open,
//!   send, close) with a mocked backend
//! - `property`: proptest invariants

mod property;
