//! 规则模块：负责规则的数据模型、内置规则表与外部规则加载
pub mod model;
pub mod tables;
pub mod loader;

// 导出核心接口
pub use self::model::{ExclusionSet, MatchMode, RuleSet, SubstitutionRule};
pub use self::loader::{RuleFileType, RuleLoader};
