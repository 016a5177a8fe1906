//! 内置规则表
//! 规则表以 JSON 形式随库编译进二进制，首次访问时解析，进程内只读共享

use once_cell::sync::Lazy;

use super::model::RuleSet;

static GREEKLISH_TO_GREEK_JSON: &str = include_str!("../../data/greeklish_to_greek.json");
static GREEK_TO_GREEKLISH_JSON: &str = include_str!("../../data/greek_to_greeklish.json");
static GREEK_TO_PHONETIC_LATIN_JSON: &str = include_str!("../../data/greek_to_phonetic_latin.json");
static GREEK_TO_TRANSLITERATED_LATIN_JSON: &str =
    include_str!("../../data/greek_to_transliterated_latin.json");
static DIACRITICS_JSON: &str = include_str!("../../data/diacritics.json");

/// 解析内置规则表，失败说明打包的数据文件已损坏
fn parse_embedded(name: &str, json: &str) -> RuleSet {
    serde_json::from_str(json).unwrap_or_else(|e| {
        eprintln!("致命错误: 内置规则表 {} 解析失败 - {}", name, e);
        panic!("内置规则表损坏，请检查 data/{}.json", name);
    })
}

/// greeklish -> 希腊文
pub static GREEKLISH_TO_GREEK: Lazy<RuleSet> =
    Lazy::new(|| parse_embedded("greeklish_to_greek", GREEKLISH_TO_GREEK_JSON));

/// 希腊文 -> greeklish
pub static GREEK_TO_GREEKLISH: Lazy<RuleSet> =
    Lazy::new(|| parse_embedded("greek_to_greeklish", GREEK_TO_GREEKLISH_JSON));

/// 希腊文 -> 拉丁字母（按发音）
pub static GREEK_TO_PHONETIC_LATIN: Lazy<RuleSet> =
    Lazy::new(|| parse_embedded("greek_to_phonetic_latin", GREEK_TO_PHONETIC_LATIN_JSON));

/// 希腊文 -> 拉丁字母（逐字母转写）
pub static GREEK_TO_TRANSLITERATED_LATIN: Lazy<RuleSet> = Lazy::new(|| {
    parse_embedded("greek_to_transliterated_latin", GREEK_TO_TRANSLITERATED_LATIN_JSON)
});

/// 带变音符号的字母 -> 基础字母（字符类模式）
pub static DIACRITICS: Lazy<RuleSet> = Lazy::new(|| parse_embedded("diacritics", DIACRITICS_JSON));
