pub mod ids;
pub mod image;
pub mod time;
