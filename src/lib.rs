pub mod config;
pub mod console;
pub mod error;
pub mod events;
pub mod feed;
pub mod logging;
pub mod model;
pub mod store;
pub mod theme;

pub use config::Config;
pub use error::{Result, TaskdeckError};
pub use model::{OutputRecord, Project, Task};
pub use store::{MemoryOutputStore, OutputStore};
pub use theme::{Appearance, Rgb};
