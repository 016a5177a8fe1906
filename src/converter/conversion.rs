//! 转换类型定义：每种转换 = 一张规则表 + 一种匹配模式

use std::fmt;

use crate::rule::tables;
use crate::rule::{MatchMode, RuleSet};

/// 支持的转换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// greeklish / 拉丁字母 -> 希腊文
    ToGreek,
    /// 希腊文 -> greeklish
    ToGreeklish,
    /// 希腊文 -> 拉丁字母（按发音）
    ToPhoneticLatin,
    /// 希腊文 -> 拉丁字母（逐字母）
    ToTransliteratedLatin,
    /// 去除变音符号
    SanitizeDiacritics,
}

impl Conversion {
    pub const ALL: [Conversion; 5] = [
        Conversion::ToGreek,
        Conversion::ToGreeklish,
        Conversion::ToPhoneticLatin,
        Conversion::ToTransliteratedLatin,
        Conversion::SanitizeDiacritics,
    ];

    /// 四种文字转换用精确匹配，去变音符号用字符类匹配
    pub fn match_mode(self) -> MatchMode {
        match self {
            Conversion::SanitizeDiacritics => MatchMode::Class,
            _ => MatchMode::Exact,
        }
    }

    /// 内置规则表
    pub fn embedded_rules(self) -> &'static RuleSet {
        match self {
            Conversion::ToGreek => &tables::GREEKLISH_TO_GREEK,
            Conversion::ToGreeklish => &tables::GREEK_TO_GREEKLISH,
            Conversion::ToPhoneticLatin => &tables::GREEK_TO_PHONETIC_LATIN,
            Conversion::ToTransliteratedLatin => &tables::GREEK_TO_TRANSLITERATED_LATIN,
            Conversion::SanitizeDiacritics => &tables::DIACRITICS,
        }
    }

    /// 规则表文件名（不含扩展名），也用于 rule_dir 覆盖
    pub fn table_stem(self) -> &'static str {
        match self {
            Conversion::ToGreek => "greeklish_to_greek",
            Conversion::ToGreeklish => "greek_to_greeklish",
            Conversion::ToPhoneticLatin => "greek_to_phonetic_latin",
            Conversion::ToTransliteratedLatin => "greek_to_transliterated_latin",
            Conversion::SanitizeDiacritics => "diacritics",
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_stem())
    }
}
