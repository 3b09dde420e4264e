//! Invero: menu frame rendering and provider discovery
//!
//! A menu element is described by [`frame::Frame`]s. The [`render`] engine
//! resolves a frame against its fallback frame and a viewer
//! [`context::Context`] into a concrete [`item::ItemStack`]. Item sources,
//! element generators and activators are found once at startup by the
//! [`discovery`] scanner and kept in a [`registry::CapabilityRegistry`].

pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod frame;
pub mod icon;
pub mod item;
pub mod logging;
pub mod platform;
pub mod providers;
pub mod registry;
pub mod render;
