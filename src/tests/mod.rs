// Test modules for api-regress
//
// Each source unit has a matching test file focused on behavior verification.

// Test helper utilities (mock transport, fixtures)
pub mod helpers;

pub mod config;
pub mod error;
