pub mod fs;
pub mod guard;
pub mod yaml;
