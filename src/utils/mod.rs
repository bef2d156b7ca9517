//! ユーティリティモジュール

pub mod dom;
pub mod fetch;
pub mod log_trace;
pub mod storage;
