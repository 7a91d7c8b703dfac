pub mod alias;
pub mod contact;
pub mod demographics;
pub mod image;
pub mod officer;
pub mod response_plan;
pub mod response_strategy;
pub mod safety_warning;

pub use sea_orm;
