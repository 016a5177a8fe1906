//! 全局转换器单例管理
use std::borrow::Cow;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::OnceCell;

use super::transliterator::Transliterator;
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::{GreekResult, GreekUtilsError};

/// 全局转换器实例
static GLOBAL_TRANSLITERATOR: Lazy<Arc<OnceCell<Transliterator>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 未初始化时使用的内置转换器
static EMBEDDED_TRANSLITERATOR: Lazy<Transliterator> = Lazy::new(Transliterator::embedded);

/// 初始化全局转换器（默认配置）
pub async fn init_greek_utils() -> GreekResult<()> {
    init_greek_utils_with_config(ConfigManager::get_default()).await
}

/// 带自定义配置初始化全局转换器，重复初始化时保留第一次的结果
pub async fn init_greek_utils_with_config(config: GlobalConfig) -> GreekResult<()> {
    GLOBAL_TRANSLITERATOR
        .get_or_try_init(|| Transliterator::new(config))
        .await?;
    Ok(())
}

/// 获取全局转换器
pub fn global_transliterator() -> GreekResult<&'static Transliterator> {
    GLOBAL_TRANSLITERATOR.get().ok_or(GreekUtilsError::NotInitialized)
}

/// 已初始化则用全局转换器，否则用内置规则表
fn current() -> &'static Transliterator {
    GLOBAL_TRANSLITERATOR.get().unwrap_or(&EMBEDDED_TRANSLITERATOR)
}

/// greeklish / 拉丁字母 -> 希腊文
pub fn to_greek<'t>(text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
    current().to_greek(text, ignore)
}

/// 希腊文 -> greeklish
pub fn to_greeklish<'t>(text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
    current().to_greeklish(text, ignore)
}

/// 希腊文 -> 拉丁字母（按发音）
pub fn to_phonetic_latin<'t>(text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
    current().to_phonetic_latin(text, ignore)
}

/// 希腊文 -> 拉丁字母（逐字母）
pub fn to_transliterated_latin<'t>(text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
    current().to_transliterated_latin(text, ignore)
}

/// 去除变音符号
pub fn sanitize_diacritics<'t>(text: &'t str, ignore: Option<&str>) -> Cow<'t, str> {
    current().sanitize_diacritics(text, ignore)
}
