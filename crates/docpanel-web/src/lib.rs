#![forbid(unsafe_code)]

//! Browser front end for the docpanel theme.
//!
//! [`ThemePanels`] (wasm32 only) mounts every feature in one pass: the
//! preference store, the color scheme, the menu resize handle, the shared
//! backdrop with its panels, and the contact overlay. Each feature that is
//! missing its markup is skipped with a debug log; the rest still mount.
//!
//! The DOM contract lives in [`selectors`] and the projection-to-DOM
//! translation in [`patch`]; both are platform-independent and tested natively.

pub mod patch;
pub mod selectors;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
#[cfg(target_arch = "wasm32")]
pub use wasm::{ThemePanels, auto_mount, auto_unmount};
