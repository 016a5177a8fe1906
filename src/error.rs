//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum GreekUtilsError {
    // 规则相关错误
    /// 规则本身不合法（如空 pattern），属于调用方的数据错误
    #[error("Invalid rule #{index}: {reason}")]
    InvalidRule { index: usize, reason: String },
    #[error("Rule load failed: {0}")]
    RuleLoadError(String),

    // 编译相关错误
    #[error("Regex compilation failed: {0}")]
    RegexCompileError(#[from] RegexError),

    // 转换器相关错误
    #[error("Transliterator not initialized")]
    NotInitialized,

    // 序列化/反序列化错误
    #[error("JSON parse failed: {0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("MessagePack (de)serialization failed: {0}")]
    MsgPackError(String),

    // 基础错误
    #[error("IO operation failed: {0}")]
    IoError(#[from] IoError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type GreekResult<T> = Result<T, GreekUtilsError>;
