//! Property-based tests for rendering guarantees

mod render_properties;
