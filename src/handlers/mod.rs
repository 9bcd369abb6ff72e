pub mod page_handler;
pub mod search_handler;
