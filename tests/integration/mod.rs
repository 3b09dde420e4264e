//! Integration tests for frame rendering and provider discovery

mod config_integration;
mod discovery_scan;
mod render_fallback;
mod test_utils;
