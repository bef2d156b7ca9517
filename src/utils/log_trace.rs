//! 時系列トレースログ
//! 取得失敗やユーザー操作を記録し、コンソールにも出力する

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;

use super::storage::{BrowserStore, KeyValueStore};

const MAX_LOG_ENTRIES: usize = 200;
pub const STORAGE_KEY: &str = "tarija-log-trace";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String, // "fetch", "favorites", "weather", "view" など
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    persist: bool,
}

impl LogTrace {
    pub fn new() -> Self {
        let mut trace = LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            persist: cfg!(target_arch = "wasm32"),
        };
        trace.load_from_storage();
        trace
    }

    /// 永続化しないインスタンス
    #[cfg(test)]
    pub fn in_memory() -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            persist: false,
        }
    }

    pub fn log(&mut self, level: LogLevel, category: &str, message: &str, data: Option<serde_json::Value>) {
        let entry = LogEntry {
            timestamp: chrono::Local::now().to_rfc3339(),
            level,
            category: category.to_string(),
            message: message.to_string(),
            data,
        };

        write_console(level, &format!("[{}] {}", category, message));

        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);

        self.save_to_storage();
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.logs.iter().cloned().collect()
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
        if self.persist {
            BrowserStore.remove_item(STORAGE_KEY);
        }
    }

    fn load_from_storage(&mut self) {
        if !self.persist {
            return;
        }
        if let Some(logs) = BrowserStore.get_json::<Vec<LogEntry>>(STORAGE_KEY) {
            self.logs = logs.into_iter().rev().take(MAX_LOG_ENTRIES).rev().collect();
        }
    }

    fn save_to_storage(&self) {
        if !self.persist {
            return;
        }
        BrowserStore.set_json(STORAGE_KEY, &self.get_logs());
    }
}

impl Default for LogTrace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: LogLevel, line: &str) {
    match level {
        LogLevel::Error => web_sys::console::error_1(&line.into()),
        LogLevel::Warn => web_sys::console::warn_1(&line.into()),
        LogLevel::Info => web_sys::console::log_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(level: LogLevel, line: &str) {
    if level != LogLevel::Info {
        eprintln!("{}", line);
    }
}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> = std::cell::RefCell::new(LogTrace::new());
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Info, category, message, None));
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Warn, category, message, None));
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Error, category, message, None));
}

pub fn log_error_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Error, category, message, Some(data)));
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| trace.borrow().get_logs_json())
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| trace.borrow_mut().clear());
}

// 開発者ツールから呼べるように公開
#[wasm_bindgen(js_name = getLogs)]
pub fn export_logs() -> String {
    get_logs_json()
}

#[wasm_bindgen(js_name = clearLogs)]
pub fn export_clear_logs() {
    clear_logs();
    log_info("log-trace", "ログを消去しました");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut trace = LogTrace::in_memory();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            trace.log(LogLevel::Info, "test", &format!("entry {}", i), None);
        }
        let logs = trace.get_logs();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }

    #[test]
    fn test_json_export_levels() {
        let mut trace = LogTrace::in_memory();
        trace.log(LogLevel::Error, "fetch", "HTTP 404", Some(serde_json::json!({"url": "data/trails.json"})));
        let json = trace.get_logs_json();
        assert!(json.contains("\"level\": \"error\""));
        assert!(json.contains("data/trails.json"));
        trace.clear();
        assert_eq!(trace.get_logs_json(), "[]");
    }

    #[test]
    fn test_global_helpers() {
        clear_logs();
        log_warn("config", "bad override");
        let logs: Vec<LogEntry> = serde_json::from_str(&get_logs_json()).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].level, LogLevel::Warn);
        assert_eq!(logs[0].category, "config");
    }
}
