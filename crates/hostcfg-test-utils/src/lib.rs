//! Shared test utilities for the hostcfg workspace.
//!
//! A dev-dependency only. It depends on `hostcfg-fs` alone so every other
//! crate can use it without a dependency cycle.
//!
//! # Modules
//!
//! - [`home`]: [`TestHome`], a throwaway home directory with a backup root
//! - [`fixtures`]: sample host documents used across suites

pub mod fixtures;
pub mod home;

pub use home::TestHome;
