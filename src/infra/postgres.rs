pub mod audit_repo;
pub mod widget_repo;
