//! Terminal user interface built on ratatui.
//!
//! This module provides the panels and modals of the credential manager,
//! their responsive arrangement, the modal stack and theme support.
//!
//! # Architecture
//!
//! ```text
//! App::draw → LayoutManager::observe → renderer::render → components → Frame
//! ```
//!
//! # Modules
//!
//! - [`components`]: Panels, modals and small widgets
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`layout`]: Width-based layout modes and panel composition
//! - [`pages`]: Named pages and the modal stack
//! - [`renderer`]: Top-level rendering coordinator
//! - [`theme`]: Color scheme definitions

pub mod components;
pub mod helpers;
pub mod layout;
pub mod pages;
pub mod renderer;
pub mod theme;

pub use layout::{LayoutManager, LayoutMode, PanelSet};
pub use pages::PageManager;
pub use renderer::render;
pub use theme::Theme;
