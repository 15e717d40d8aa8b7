pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod ocr;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod scanner;
