pub mod build_path_use_case;
pub mod path_report;
pub mod pipeline_logger;
