pub mod email_result;
pub mod page_elements;
pub mod page_session;
pub mod page_session_manager;
pub mod query;
pub mod search_error;
pub mod status;
