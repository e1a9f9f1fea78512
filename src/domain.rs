pub mod audit;
pub mod error;
pub mod message;
pub mod pagination;
pub mod widget;
