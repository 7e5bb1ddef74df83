pub mod connections;
pub mod options;
