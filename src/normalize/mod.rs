pub mod mapper;
pub mod tables;

pub use mapper::{IndexedText, normalize};
