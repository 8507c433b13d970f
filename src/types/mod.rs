pub mod activity;
pub mod config;
pub mod report;
pub mod scoring;
