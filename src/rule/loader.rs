//! 规则加载管理器
//! 负责从 JSON / MessagePack 数据或本地文件加载外部规则表

use std::path::Path;
use rmp_serde::{Serializer, from_slice};
use serde::Serialize;
use tracing::debug;

use super::model::RuleSet;
use crate::error::{GreekResult, GreekUtilsError};

/// 规则文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFileType {
    /// [{"pattern": "...", "replacement": "..."}]
    Json,
    /// 同结构的 MessagePack 编码
    MsgPack,
}

impl RuleFileType {
    /// 按扩展名识别文件类型
    pub fn from_path(path: &Path) -> GreekResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(RuleFileType::Json),
            Some("mp") | Some("msgpack") => Ok(RuleFileType::MsgPack),
            _ => Err(GreekUtilsError::InvalidInput(format!(
                "unsupported rule file extension: {}",
                path.display()
            ))),
        }
    }
}

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 解析 JSON 字符串
    pub fn from_json_str(json: &str) -> GreekResult<RuleSet> {
        Ok(serde_json::from_str(json)?)
    }

    /// 解析 JSON 字节
    pub fn from_json_slice(bytes: &[u8]) -> GreekResult<RuleSet> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// 解析 MessagePack 字节
    pub fn from_msgpack_slice(bytes: &[u8]) -> GreekResult<RuleSet> {
        from_slice(bytes).map_err(|e| GreekUtilsError::MsgPackError(format!("deserialize failed: {}", e)))
    }

    /// 序列化为 MessagePack
    pub fn to_msgpack(rule_set: &RuleSet) -> GreekResult<Vec<u8>> {
        let mut data = Vec::new();
        rule_set
            .serialize(&mut Serializer::new(&mut data).with_struct_map())
            .map_err(|e| GreekUtilsError::MsgPackError(format!("serialize failed: {}", e)))?;
        Ok(data)
    }

    /// 按字节内容和文件类型解析
    pub fn from_slice(bytes: &[u8], file_type: RuleFileType) -> GreekResult<RuleSet> {
        match file_type {
            RuleFileType::Json => Self::from_json_slice(bytes),
            RuleFileType::MsgPack => Self::from_msgpack_slice(bytes),
        }
    }

    /// 从本地文件加载规则表（按扩展名识别格式）
    pub async fn load_file(path: impl AsRef<Path>) -> GreekResult<RuleSet> {
        let path = path.as_ref();
        let file_type = RuleFileType::from_path(path)?;
        let data = tokio::fs::read(path).await?;

        let rule_set = Self::from_slice(&data, file_type).map_err(|e| {
            GreekUtilsError::RuleLoadError(format!("{}: {}", path.display(), e))
        })?;

        debug!("规则文件加载成功：{}，规则数：{}", path.display(), rule_set.len());
        Ok(rule_set)
    }

    /// 将规则表写入本地文件（按扩展名选择格式）
    pub async fn save_file(path: impl AsRef<Path>, rule_set: &RuleSet) -> GreekResult<()> {
        let path = path.as_ref();
        let data = match RuleFileType::from_path(path)? {
            RuleFileType::Json => serde_json::to_vec_pretty(rule_set)?,
            RuleFileType::MsgPack => Self::to_msgpack(rule_set)?,
        };

        debug!("规则表序列化成功，数据大小：{} 字节", data.len());
        tokio::fs::write(path, data).await?;
        Ok(())
    }
}
