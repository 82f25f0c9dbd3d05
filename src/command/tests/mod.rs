//! Unit tests for the command module.

mod adapter_tests;
