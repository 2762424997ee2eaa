pub mod error;
pub mod execute;
pub mod mode;
pub mod render;
pub mod report;
