//! Population integration tests.
//!
//! These tests run the populate workflow end to end from a configuration
//! file:
//! 1. Load the fixture configuration
//! 2. Populate a sink with a fixed seed
//! 3. Check the persisted count and the validation summary file

mod memory_populate;
mod mongodb_populate;
