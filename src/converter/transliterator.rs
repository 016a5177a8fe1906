//! 转换器核心：持有编译后的规则表，对外提供五种转换
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use super::conversion::Conversion;
use crate::compiler::{CompiledRuleSet, RuleCompiler};
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::GreekResult;
use crate::rule::{ExclusionSet, RuleLoader, RuleSet};
use crate::utils::preview_compact;

/// 规则目录中依次尝试的扩展名
const RULE_FILE_EXTENSIONS: [&str; 3] = ["json", "mp", "msgpack"];

/// 日志预览最大字符数
const PREVIEW_LEN: usize = 48;

/// 每种转换对应一份编译后的规则集
#[derive(Debug, Clone)]
struct CompiledTables {
    to_greek: Arc<CompiledRuleSet>,
    to_greeklish: Arc<CompiledRuleSet>,
    to_phonetic_latin: Arc<CompiledRuleSet>,
    to_transliterated_latin: Arc<CompiledRuleSet>,
    sanitize_diacritics: Arc<CompiledRuleSet>,
}

impl CompiledTables {
    /// 编译内置规则表
    fn compile_embedded() -> GreekResult<Self> {
        let compile = |c: Conversion| -> GreekResult<Arc<CompiledRuleSet>> {
            Ok(Arc::new(RuleCompiler::compile(c.embedded_rules(), c.match_mode())?))
        };

        Ok(Self {
            to_greek: compile(Conversion::ToGreek)?,
            to_greeklish: compile(Conversion::ToGreeklish)?,
            to_phonetic_latin: compile(Conversion::ToPhoneticLatin)?,
            to_transliterated_latin: compile(Conversion::ToTransliteratedLatin)?,
            sanitize_diacritics: compile(Conversion::SanitizeDiacritics)?,
        })
    }

    fn get(&self, conversion: Conversion) -> &Arc<CompiledRuleSet> {
        match conversion {
            Conversion::ToGreek => &self.to_greek,
            Conversion::ToGreeklish => &self.to_greeklish,
            Conversion::ToPhoneticLatin => &self.to_phonetic_latin,
            Conversion::ToTransliteratedLatin => &self.to_transliterated_latin,
            Conversion::SanitizeDiacritics => &self.sanitize_diacritics,
        }
    }

    fn get_mut(&mut self, conversion: Conversion) -> &mut Arc<CompiledRuleSet> {
        match conversion {
            Conversion::ToGreek => &mut self.to_greek,
            Conversion::ToGreeklish => &mut self.to_greeklish,
            Conversion::ToPhoneticLatin => &mut self.to_phonetic_latin,
            Conversion::ToTransliteratedLatin => &mut self.to_transliterated_latin,
            Conversion::SanitizeDiacritics => &mut self.sanitize_diacritics,
        }
    }
}

/// 内置规则表编译结果，全进程共享一份
static EMBEDDED_TABLES: Lazy<CompiledTables> = Lazy::new(|| {
    CompiledTables::compile_embedded().unwrap_or_else(|e| {
        eprintln!("致命错误: 内置规则表编译失败 - {}", e);
        panic!("内置规则表编译异常，请检查 data/ 目录下的规则文件");
    })
});

/// 希腊文转换器
#[derive(Debug, Clone)]
pub struct Transliterator {
    tables: CompiledTables,
    default_ignore: Option<ExclusionSet>,
    config: GlobalConfig,
}

impl Transliterator {
    /// 仅使用内置规则表、默认配置
    pub fn embedded() -> Self {
        Self::embedded_with_config(ConfigManager::get_default())
    }

    /// 使用内置规则表（忽略 config.rule_dir）
    pub fn embedded_with_config(config: GlobalConfig) -> Self {
        Self {
            tables: EMBEDDED_TABLES.clone(),
            default_ignore: config.default_ignore.as_deref().and_then(ExclusionSet::parse),
            config,
        }
    }

    /// 创建转换器
    ///
    /// `config.rule_dir` 下存在 `<stem>.json` / `<stem>.mp` / `<stem>.msgpack` 时，
    /// 用该文件覆盖对应的内置规则表；文件存在但内容不合法时直接报错。
    pub async fn new(config: GlobalConfig) -> GreekResult<Self> {
        let mut overrides = HashMap::new();
        if let Some(dir) = config.rule_dir.as_deref() {
            if tokio::fs::metadata(dir).await.map(|m| m.is_dir()).unwrap_or(false) {
                for conversion in Conversion::ALL {
                    if let Some(rule_set) = Self::load_override(dir, conversion).await? {
                        overrides.insert(conversion, rule_set);
                    }
                }
            } else {
                warn!("规则目录不存在或不是目录：{}，使用内置规则表", dir.display());
            }
        }

        let mut transliterator = Self::embedded_with_config(config);
        for (conversion, rule_set) in overrides {
            transliterator.replace_rules(conversion, &rule_set)?;
        }
        Ok(transliterator)
    }

    /// 在规则目录中查找并加载某个转换的规则表
    async fn load_override(dir: &Path, conversion: Conversion) -> GreekResult<Option<RuleSet>> {
        for ext in RULE_FILE_EXTENSIONS {
            let path = dir.join(format!("{}.{}", conversion.table_stem(), ext));
            if tokio::fs::metadata(&path).await.is_ok() {
                let rule_set = RuleLoader::load_file(&path).await?;
                debug!("[{}] 使用自定义规则表：{}", conversion, path.display());
                return Ok(Some(rule_set));
            }
        }
        Ok(None)
    }

    /// 替换某个转换的规则表（匹配模式保持该转换的固定模式）
    pub fn replace_rules(&mut self, conversion: Conversion, rule_set: &RuleSet) -> GreekResult<()> {
        let compiled = RuleCompiler::compile(rule_set, conversion.match_mode())?;
        *self.tables.get_mut(conversion) = Arc::new(compiled);
        Ok(())
    }

    /// 执行转换
    ///
    /// `ignore` 为 None 时使用配置中的 default_ignore；传入空字符串表示本次不排除任何字符。
    pub fn convert<'t>(&self, conversion: Conversion, text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
        let explicit;
        let ignore = match ignore {
            Some(chars) => {
                explicit = ExclusionSet::parse(chars);
                explicit.as_ref()
            }
            None => self.default_ignore.as_ref(),
        };

        let result = self.tables.get(conversion).apply(text, ignore);

        if self.config.verbose {
            debug!(
                "[{}] \"{}\" -> \"{}\"",
                conversion,
                preview_compact(text, PREVIEW_LEN),
                preview_compact(&result, PREVIEW_LEN)
            );
        }

        result
    }

    /// greeklish / 拉丁字母 -> 希腊文
    pub fn to_greek<'t>(&self, text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
        self.convert(Conversion::ToGreek, text, ignore)
    }

    /// 希腊文 -> greeklish
    pub fn to_greeklish<'t>(&self, text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
        self.convert(Conversion::ToGreeklish, text, ignore)
    }

    /// 希腊文 -> 拉丁字母（按发音）
    pub fn to_phonetic_latin<'t>(&self, text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
        self.convert(Conversion::ToPhoneticLatin, text, ignore)
    }

    /// 希腊文 -> 拉丁字母（逐字母）
    pub fn to_transliterated_latin<'t>(&self, text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
        self.convert(Conversion::ToTransliteratedLatin, text, ignore)
    }

    /// 去除变音符号（现代/古希腊文）
    pub fn sanitize_diacritics<'t>(&self, text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
        self.convert(Conversion::SanitizeDiacritics, text, ignore)
    }

    /// 某个转换当前使用的编译后规则集
    pub fn compiled_rules(&self, conversion: Conversion) -> &CompiledRuleSet {
        self.tables.get(conversion)
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::MatchMode;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("greek_utils_transliterator_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_to_greek() {
        let t = Transliterator::embedded();
        assert_eq!(t.to_greek("kalhmera", None), "καλημερα");
        assert_eq!(t.to_greek("Thalassa", None), "Θαλασσα");
        assert_eq!(t.to_greek("psari", None), "ψαρι");
        assert_eq!(t.to_greek("ksero", None), "ξερο");
    }

    #[test]
    fn test_to_greek_final_sigma() {
        let t = Transliterator::embedded();
        assert_eq!(t.to_greek("kosmos kai theos.", None), "κοσμος και θεος.");
    }

    #[test]
    fn test_to_greeklish() {
        let t = Transliterator::embedded();
        assert_eq!(t.to_greeklish("Καλημέρα κόσμε", None), "Kalhmera kosme");
        assert_eq!(t.to_greeklish("ψάρι", None), "psari");
        assert_eq!(t.to_greeklish("ΘΕΟΣ", None), "THEOS");
    }

    #[test]
    fn test_to_phonetic_latin() {
        let t = Transliterator::embedded();
        assert_eq!(t.to_phonetic_latin("μπαμπάς", None), "babas");
        assert_eq!(t.to_phonetic_latin("ευχαριστώ", None), "evcharisto");
        assert_eq!(t.to_phonetic_latin("παιδί", None), "pedi");
    }

    #[test]
    fn test_to_transliterated_latin() {
        let t = Transliterator::embedded();
        assert_eq!(t.to_transliterated_latin("άγγελος", None), "angelos");
        assert_eq!(t.to_transliterated_latin("Θεσσαλονίκη", None), "Thessaloniki");
        assert_eq!(t.to_transliterated_latin("μπύρα", None), "mpyra");
    }

    #[test]
    fn test_sanitize_diacritics() {
        let t = Transliterator::embedded();
        assert_eq!(t.sanitize_diacritics("Καλημέρα", None), "Καλημερα");
        assert_eq!(t.sanitize_diacritics("ἄνθρωπος ᾠδή", None), "ανθρωπος ωδη");
        assert_eq!(t.sanitize_diacritics("Ἥλιος ῥήτωρ", None), "Ηλιος ρητωρ");
        assert_eq!(t.sanitize_diacritics("plain text", None), "plain text");
    }

    #[test]
    fn test_ignore_protects_characters() {
        let t = Transliterator::embedded();
        assert_eq!(t.to_greeklish("αβγ", Some("β")), "aβg");
        assert_eq!(t.sanitize_diacritics("άέ", Some("ά")), "άε");
    }

    #[test]
    fn test_default_ignore_from_config() {
        let config = ConfigManager::custom().default_ignore("α").build();
        let t = Transliterator::embedded_with_config(config);
        assert_eq!(t.to_greeklish("αβ", None), "αb");
        // 显式传入的 ignore 优先，空字符串表示不排除
        assert_eq!(t.to_greeklish("αβ", Some("")), "ab");
        assert_eq!(t.to_greeklish("αβ", Some("β")), "aβ");
    }

    #[test]
    fn test_round_trip_greek_greeklish() {
        let t = Transliterator::embedded();
        for text in ["καλημερα κοσμε", "ψαρι θαλασσας και ουρανος."] {
            let latin = t.to_greeklish(text, None);
            assert_eq!(t.to_greek(&latin, None), text);
        }
    }

    #[test]
    fn test_round_trip_known_lossy_cases() {
        let t = Transliterator::embedded();
        // 重音丢失
        assert_eq!(t.to_greek(&t.to_greeklish("καλημέρα", None), None), "καλημερα");
        // 字符串末尾的 ς 无法还原
        assert_eq!(t.to_greek(&t.to_greeklish("μας", None), None), "μασ");
        // τ + η 写作 th，还原时被当成 θ
        assert_eq!(t.to_greek(&t.to_greeklish("στην ", None), None), "σθν ");
    }

    #[test]
    fn test_compiled_rules_use_conversion_mode() {
        let t = Transliterator::embedded();
        for conversion in Conversion::ALL {
            let compiled = t.compiled_rules(conversion);
            assert_eq!(compiled.mode, conversion.match_mode());
            assert_eq!(compiled.len(), conversion.embedded_rules().len());
        }
        assert_eq!(t.compiled_rules(Conversion::SanitizeDiacritics).mode, MatchMode::Class);
        assert!(t.compiled_rules(Conversion::ToGreek).mode.is_exact());
    }

    #[test]
    fn test_config_is_kept() {
        let config = ConfigManager::custom().default_ignore("ω").verbose(true).build();
        let t = Transliterator::embedded_with_config(config);
        assert_eq!(t.config().default_ignore.as_deref(), Some("ω"));
        assert!(t.config().verbose);
        assert!(t.config().rule_dir.is_none());
    }

    #[test]
    fn test_replace_rules_keeps_conversion_mode() {
        let mut t = Transliterator::embedded();
        let rules = RuleSet::from_pairs([("ab", "X")]).unwrap();

        t.replace_rules(Conversion::SanitizeDiacritics, &rules).unwrap();
        assert_eq!(t.sanitize_diacritics("ab", None), "XX");

        t.replace_rules(Conversion::ToGreek, &rules).unwrap();
        assert_eq!(t.to_greek("ab", None), "X");

        // 其他实例不受影响
        assert_eq!(Transliterator::embedded().to_greek("ab", None), "αβ");
    }

    #[tokio::test]
    async fn test_rule_dir_overrides_embedded_table() {
        let dir = temp_dir("override");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let rules = RuleSet::from_pairs([("a", "4")]).unwrap();
        RuleLoader::save_file(dir.join("greeklish_to_greek.json"), &rules).await.unwrap();

        let config = ConfigManager::custom().rule_dir(dir.clone()).build();
        let t = Transliterator::new(config).await.unwrap();
        let _ = tokio::fs::remove_dir_all(&dir).await;

        assert_eq!(t.to_greek("ab", None), "4b");
        assert_eq!(t.to_greeklish("αβ", None), "ab");
    }

    #[tokio::test]
    async fn test_rule_dir_with_malformed_table_fails() {
        let dir = temp_dir("malformed");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("diacritics.json"), r#"[{"pattern": "", "replacement": "x"}]"#)
            .await
            .unwrap();

        let config = ConfigManager::custom().rule_dir(dir.clone()).build();
        let result = Transliterator::new(config).await;
        let _ = tokio::fs::remove_dir_all(&dir).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_rule_dir_falls_back_to_embedded() {
        let config = ConfigManager::custom().rule_dir(temp_dir("does_not_exist")).build();
        let t = Transliterator::new(config).await.unwrap();
        assert_eq!(t.to_greek("a", None), "α");
    }

    #[test]
    fn test_transliterator_is_shareable_across_threads() {
        let t = Arc::new(Transliterator::embedded());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let t = Arc::clone(&t);
                std::thread::spawn(move || t.to_greeklish("θάλασσα", None).into_owned())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "thalassa");
        }
    }
}
