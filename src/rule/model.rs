//! 规则数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化

use std::collections::HashSet;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::error::{GreekResult, GreekUtilsError};

/// 单条替换规则：pattern -> replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    // 兼容 {find, replace} 形式的规则表
    #[serde(alias = "find")]
    pub pattern: String,
    #[serde(alias = "replace")]
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl fmt::Display for SubstitutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?}", self.pattern, self.replacement)
    }
}

impl<P: Into<String>, R: Into<String>> From<(P, R)> for SubstitutionRule {
    fn from((pattern, replacement): (P, R)) -> Self {
        Self::new(pattern, replacement)
    }
}

/// 有序规则集
///
/// 规则严格按顺序执行，第 i 条规则的输出即第 i+1 条规则的输入，
/// 规则表的编写依赖这种逐层叠加（先处理多字符组合，再处理剩余单字符）。
/// 构造和反序列化时都会校验，空 pattern 直接报错。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SubstitutionRule>", into = "Vec<SubstitutionRule>")]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    /// 校验并构建规则集
    pub fn new(rules: Vec<SubstitutionRule>) -> GreekResult<Self> {
        for (index, rule) in rules.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(GreekUtilsError::InvalidRule {
                    index,
                    reason: "pattern must not be empty".to_string(),
                });
            }
        }
        Ok(Self { rules })
    }

    /// 从 (pattern, replacement) 对构建
    pub fn from_pairs<I, P, R>(pairs: I) -> GreekResult<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        Self::new(pairs.into_iter().map(SubstitutionRule::from).collect())
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubstitutionRule> {
        self.rules.iter()
    }
}

impl TryFrom<Vec<SubstitutionRule>> for RuleSet {
    type Error = GreekUtilsError;

    fn try_from(rules: Vec<SubstitutionRule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<RuleSet> for Vec<SubstitutionRule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a SubstitutionRule;
    type IntoIter = std::slice::Iter<'a, SubstitutionRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// 匹配模式，整次调用统一生效（不区分单条规则）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// 精确匹配：pattern 作为完整字面量序列
    Exact,
    /// 字符类匹配：pattern 中每个字符都是独立候选
    Class,
}

impl MatchMode {
    /// 对应布尔形式的 exactMatch 参数
    pub fn from_exact(exact_match: bool) -> Self {
        if exact_match {
            MatchMode::Exact
        } else {
            MatchMode::Class
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, MatchMode::Exact)
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => f.write_str("exact"),
            MatchMode::Class => f.write_str("class"),
        }
    }
}

/// 排除字符集：集合内的字符永远不参与匹配
///
/// 字符均按字面量处理，`a-z` 表示三个字符而不是区间。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    chars: HashSet<char>,
}

impl ExclusionSet {
    /// 从 ignore 字符串构建；空字符串返回 None（等价于不排除）
    pub fn parse(ignore: &str) -> Option<Self> {
        if ignore.is_empty() {
            return None;
        }
        Some(Self {
            chars: ignore.chars().collect(),
        })
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
