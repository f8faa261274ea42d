pub mod content;
pub mod keywords;
pub mod plan;
pub mod render;

pub use content::*;
pub use plan::*;
