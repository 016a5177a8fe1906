//! 编译模块：将规则集编译为可执行的匹配器，并按序执行替换
pub mod pattern;
pub mod compiler;
pub mod substitute;

pub use self::pattern::{CompiledRule, CompiledRuleSet, Matcher};
pub use self::compiler::RuleCompiler;
pub use self::substitute::{substitute, substitute_opt};
