pub mod config;
pub mod effects;
pub mod fetch;
pub mod fonts;
pub mod gui;
pub mod icons;
pub mod loader;
pub mod logging;
pub mod overlay;
pub mod presentation;
pub mod settings;
pub mod view;
