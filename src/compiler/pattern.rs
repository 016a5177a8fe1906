//! 编译后模式模型
//! 规则编译后的结构，以及按序替换的执行逻辑

use std::borrow::Cow;
use regex::Regex;

use crate::rule::{ExclusionSet, MatchMode};

#[derive(Debug, Clone)]
pub enum Matcher {
    Exact(Regex), // 精确匹配（整段字面量）
    Class(Regex), // 字符类匹配（任一字符）
}

impl Matcher {
    #[inline]
    fn regex(&self) -> &Regex {
        match self {
            Matcher::Exact(regex) | Matcher::Class(regex) => regex,
        }
    }

    /// 规则描述（编译后的正则源码）
    pub fn describe(&self) -> &str {
        self.regex().as_str()
    }

    /// 全局替换：从左到右、互不重叠，每个位置最多替换一次
    ///
    /// 排除集的判断发生在每个候选起点：起始字符属于排除集时丢弃该候选，
    /// 并从下一个字符重新搜索（与 `(?![ignore])pattern` 的行为一致）。
    /// 没有任何替换时返回借用的原文。
    pub fn replace_all<'t>(
        &self,
        text: &'t str,
        replacement: &str,
        ignore: Option<&ExclusionSet>,
    ) -> Cow<'t, str> {
        let regex = self.regex();
        let mut out: Option<String> = None;
        let mut last = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let Some(m) = regex.find_at(text, pos) else {
                break;
            };

            if let Some(ignore) = ignore {
                if let Some(first) = text[m.start()..].chars().next() {
                    if ignore.contains(first) {
                        pos = m.start() + first.len_utf8();
                        continue;
                    }
                }
            }

            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[last..m.start()]);
            buf.push_str(replacement);
            last = m.end();
            // 空 pattern 在构建规则集时已被拒绝，m.end() 必然大于 m.start()
            pos = m.end();
        }

        match out {
            None => Cow::Borrowed(text),
            Some(mut buf) => {
                buf.push_str(&text[last..]);
                Cow::Owned(buf)
            }
        }
    }
}

/// 编译后的单条规则
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub matcher: Matcher,
    pub replacement: String,
}

/// 编译后的规则集（只读，可跨线程共享）
#[derive(Debug, Clone)]
pub struct CompiledRuleSet {
    pub rules: Vec<CompiledRule>,
    pub mode: MatchMode,
}

impl CompiledRuleSet {
    /// 按顺序执行所有规则
    ///
    /// 规则是累积的：前一条规则写入的字符对后一条规则可见。
    /// 空文本直接原样返回。
    pub fn apply<'t>(&self, text: &'t str, ignore: Option<&ExclusionSet>) -> Cow<'t, str> {
        let mut current: Cow<'t, str> = Cow::Borrowed(text);
        if text.is_empty() {
            return current;
        }

        for rule in &self.rules {
            let replaced = match rule.matcher.replace_all(&current, &rule.replacement, ignore) {
                Cow::Borrowed(_) => None,
                Cow::Owned(next) => Some(next),
            };
            if let Some(next) = replaced {
                current = Cow::Owned(next);
            }
        }

        current
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
