pub mod history;
pub mod run;
pub mod summary;
pub mod version;
