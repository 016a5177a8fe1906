//! 规则编译器核心
//! 仅负责将规则集编译为可执行的匹配器，pattern 一律按字面量转义

use std::time::Instant;
use regex::Regex;
use tracing::{debug, trace};

use super::pattern::{CompiledRule, CompiledRuleSet, Matcher};
use crate::error::{GreekResult, GreekUtilsError};
use crate::rule::{MatchMode, RuleSet, SubstitutionRule};

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则集
    pub fn compile(rule_set: &RuleSet, mode: MatchMode) -> GreekResult<CompiledRuleSet> {
        let start = Instant::now();
        let mut stats = CompileStats::default();
        let mut rules = Vec::with_capacity(rule_set.len());

        for (index, rule) in rule_set.iter().enumerate() {
            let matcher = Self::compile_matcher(index, rule, mode)?;
            trace!("规则 #{} {} 编译为 /{}/", index, rule, matcher.describe());
            stats.record(rule);
            rules.push(CompiledRule {
                matcher,
                replacement: rule.replacement.clone(),
            });
        }

        debug!(
            "✅ 规则编译完成（{}模式），耗时{:?}，规则{}条：单字符{}条、多字符{}条",
            mode,
            start.elapsed(),
            rules.len(),
            stats.single_char_count,
            stats.multi_char_count
        );

        Ok(CompiledRuleSet { rules, mode })
    }

    /// 编译单条规则
    fn compile_matcher(index: usize, rule: &SubstitutionRule, mode: MatchMode) -> GreekResult<Matcher> {
        // RuleSet 构造时已校验，这里再兜底一次，避免空正则匹配每个位置
        if rule.pattern.is_empty() {
            return Err(GreekUtilsError::InvalidRule {
                index,
                reason: "pattern must not be empty".to_string(),
            });
        }

        match mode {
            MatchMode::Exact => Ok(Matcher::Exact(Regex::new(&regex::escape(&rule.pattern))?)),
            MatchMode::Class => Ok(Matcher::Class(Regex::new(&Self::char_class(&rule.pattern))?)),
        }
    }

    /// 把 pattern 的每个字符转义后拼成字符类 `[...]`
    fn char_class(pattern: &str) -> String {
        let mut class = String::with_capacity(pattern.len() * 2 + 2);
        class.push('[');
        for c in pattern.chars() {
            let mut buf = [0u8; 4];
            class.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        }
        class.push(']');
        class
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    single_char_count: usize,
    multi_char_count: usize,
}

impl CompileStats {
    fn record(&mut self, rule: &SubstitutionRule) {
        if rule.pattern.chars().count() == 1 {
            self.single_char_count += 1;
        } else {
            self.multi_char_count += 1;
        }
    }
}
