pub mod audit_log;
pub mod audit_log_initializer;
pub mod demo_data;
pub mod widget_service;
