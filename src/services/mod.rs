pub mod input_controller;
pub mod query_store;
pub mod result_renderer;
pub mod results_source;
pub mod retry_policy;
pub mod sample_data;
pub mod search_orchestrator;
pub mod status_reporter;
pub mod workflow_trigger;
