pub mod repository;
pub mod tree;
pub mod types;
