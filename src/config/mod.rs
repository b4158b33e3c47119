mod paths;
mod settings;

pub use paths::*;
pub use settings::*;
