//! different utility modules used throughout the project
/// terminal and file logging set up with simplelog
pub mod logger;
/// bounded trace of matrix operations, optionally forwarded to a consumer
pub mod op_trace;
