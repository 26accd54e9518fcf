pub mod assets;
pub mod character;
pub mod clock;
pub mod error;
pub mod input;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod scene;
pub mod ui;

pub mod settings;
pub mod debug;
