//! 通用替换入口：一次性编译 + 执行

use std::borrow::Cow;

use super::compiler::RuleCompiler;
use crate::error::GreekResult;
use crate::rule::{ExclusionSet, MatchMode, RuleSet};

/// 按序把规则集应用到文本上
///
/// - 空文本、空规则集、空 ignore、永不匹配的规则都是正常的无操作
/// - `ignore` 中的字符永远不会作为匹配起点
/// - 仅在规则集无法编译时返回错误
///
/// 规则集需要反复使用时，先用 [`RuleCompiler::compile`] 编译一次更划算。
pub fn substitute<'t>(
    text: &'t str,
    rules: &RuleSet,
    mode: MatchMode,
    ignore: Option<&str>,
) -> GreekResult<Cow<'t, str>> {
    if text.is_empty() || rules.is_empty() {
        return Ok(Cow::Borrowed(text));
    }

    let compiled = RuleCompiler::compile(rules, mode)?;
    let ignore = ignore.and_then(ExclusionSet::parse);
    Ok(compiled.apply(text, ignore.as_ref()))
}

/// 同 [`substitute`]，文本缺失时原样返回 None
pub fn substitute_opt<'t>(
    text: Option<&'t str>,
    rules: &RuleSet,
    mode: MatchMode,
    ignore: Option<&str>,
) -> GreekResult<Option<Cow<'t, str>>> {
    text.map(|text| substitute(text, rules, mode, ignore)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        RuleSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty_and_absent_text_pass_through() {
        let set = rules(&[("a", "b")]);
        assert_eq!(substitute("", &set, MatchMode::Exact, None).unwrap(), "");
        assert_eq!(substitute_opt(None, &set, MatchMode::Exact, None).unwrap(), None);
        assert_eq!(
            substitute_opt(Some("a"), &set, MatchMode::Exact, None).unwrap().as_deref(),
            Some("b")
        );
    }

    #[test]
    fn test_empty_rule_set_is_noop() {
        let empty = RuleSet::default();
        for text in ["", "abc", "καλημέρα", "a-z [x]"] {
            assert_eq!(substitute(text, &empty, MatchMode::Exact, None).unwrap(), text);
            assert_eq!(substitute(text, &empty, MatchMode::Class, Some("a")).unwrap(), text);
        }
    }

    #[test]
    fn test_rules_are_applied_in_order() {
        let forward = rules(&[("ab", "x"), ("x", "y")]);
        assert_eq!(substitute("ab", &forward, MatchMode::Exact, None).unwrap(), "y");

        let reversed = rules(&[("x", "y"), ("ab", "x")]);
        assert_eq!(substitute("ab", &reversed, MatchMode::Exact, None).unwrap(), "x");
    }

    #[test]
    fn test_exclusion_protects_characters() {
        let set = rules(&[("a", "Z")]);
        assert_eq!(substitute("cat", &set, MatchMode::Class, Some("a")).unwrap(), "cat");
        assert_eq!(substitute("cat", &set, MatchMode::Class, None).unwrap(), "cZt");
        assert_eq!(substitute("cat", &set, MatchMode::Class, Some("")).unwrap(), "cZt");
    }

    #[test]
    fn test_class_and_exact_mode_diverge() {
        let set = rules(&[("ab", "X")]);
        assert_eq!(substitute("ab", &set, MatchMode::Exact, None).unwrap(), "X");
        assert_eq!(substitute("ab", &set, MatchMode::Class, None).unwrap(), "XX");
        assert_eq!(substitute("ba", &set, MatchMode::Exact, None).unwrap(), "ba");
    }

    #[test]
    fn test_single_pass_not_fixed_point() {
        // 替换结果不会被同一条规则再次匹配
        let set = rules(&[("a", "aa")]);
        assert_eq!(substitute("aa", &set, MatchMode::Exact, None).unwrap(), "aaaa");

        let set = rules(&[("aa", "a")]);
        assert_eq!(substitute("aaaa", &set, MatchMode::Exact, None).unwrap(), "aa");
        assert_eq!(substitute("aaa", &set, MatchMode::Exact, None).unwrap(), "aa");
    }

    #[test]
    fn test_non_matching_rules_do_not_fail() {
        let set = rules(&[("q", "w"), ("zz", "y")]);
        assert_eq!(substitute("abc", &set, MatchMode::Exact, Some("xyz")).unwrap(), "abc");
    }

    #[test]
    fn test_deterministic() {
        let set = rules(&[("ab", "x"), ("x", "yy"), ("y", "z")]);
        let first = substitute("abab cab", &set, MatchMode::Exact, Some("c")).unwrap().into_owned();
        for _ in 0..10 {
            assert_eq!(substitute("abab cab", &set, MatchMode::Exact, Some("c")).unwrap(), first);
        }
        assert_eq!(first, "zzzz czz");
    }
}
