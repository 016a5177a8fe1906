//! 转换模块：五种转换的对外接口
pub mod conversion;
pub mod transliterator;
pub mod global;

// 导出核心接口
pub use self::conversion::Conversion;
pub use self::transliterator::Transliterator;
pub use self::global::{
    init_greek_utils,
    init_greek_utils_with_config,
    global_transliterator,
    to_greek,
    to_greeklish,
    to_phonetic_latin,
    to_transliterated_latin,
    sanitize_diacritics,
};
