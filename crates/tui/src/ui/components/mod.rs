pub mod money;
pub mod summary;
