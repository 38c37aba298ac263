pub mod commit;
pub mod export;
pub mod file;
pub mod project;
pub mod show;
pub mod task;
