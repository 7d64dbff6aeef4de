pub mod advisor;
pub mod completeness;
pub mod grading;
pub mod handlers;
pub mod report;
pub mod sentiment;
pub mod skills;
pub mod translate;
