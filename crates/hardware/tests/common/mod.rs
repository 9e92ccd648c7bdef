//! Shared test helpers.


pub use harness::TestContext;
