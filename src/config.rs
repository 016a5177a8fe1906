//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 全局配置
#[derive(Debug, Clone, Default)]
pub struct GlobalConfig {
    // 自定义规则表目录，目录下同名文件覆盖内置规则表（<stem>.json / <stem>.mp）
    pub rule_dir: Option<PathBuf>,
    // 调用方未传 ignore 时使用的默认排除字符
    pub default_ignore: Option<String>,
    // 是否启用详细日志
    pub verbose: bool,
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn rule_dir(mut self, dir: PathBuf) -> Self {
        self.config.rule_dir = Some(dir);
        self
    }

    pub fn default_ignore(mut self, ignore: impl Into<String>) -> Self {
        let ignore = ignore.into();
        // 空字符串等价于不排除
        self.config.default_ignore = if ignore.is_empty() { None } else { Some(ignore) };
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
