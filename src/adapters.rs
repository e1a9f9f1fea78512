pub mod api_errors;
pub mod info_handler;
pub mod widget_handler;
