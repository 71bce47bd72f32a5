//! Algorithm-level tests for drivermap-core

#[cfg(test)]
pub mod extension_tests;
#[cfg(test)]
pub mod method_map_tests;
