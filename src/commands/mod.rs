pub mod helper;
pub mod officer;
pub mod plan;
pub mod search;
