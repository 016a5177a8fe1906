//! greek-utils - 希腊文 / greeklish / 拉丁字母转写与变音符号清理

// 导出全局错误类型
pub use self::error::{GreekUtilsError, GreekResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    SubstitutionRule, RuleSet, MatchMode, ExclusionSet, RuleLoader, RuleFileType
};

// 导出编译模块核心接口
pub use self::compiler::{
    CompiledRule, CompiledRuleSet, RuleCompiler, Matcher, substitute, substitute_opt
};

// 导出转换模块核心接口（含全局单例的简化接口）
pub use self::converter::{
    Conversion,
    Transliterator,
    init_greek_utils,
    init_greek_utils_with_config,
    global_transliterator,
    to_greek,
    to_greeklish,
    to_phonetic_latin,
    to_transliterated_latin,
    sanitize_diacritics,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod utils;
pub mod compiler;
pub mod converter;
