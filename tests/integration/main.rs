//! Integration tests for batstat.

mod util;

mod arg_tests;
mod config_tests;
mod invalid_config_tests;
mod replay_tests;
