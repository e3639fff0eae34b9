//! ```
//! use hanzi_pinyin::prelude::*;
//!
//! let table = PinyinTable::setup(None).unwrap();
//!
//! // Readings, with tone digits, the first one is the default reading
//!
//! println!("{:?}", table.lookup('中'));
//! // => Some(["zhong1", "zhong4"])
//!
//! // Transliteration, unknown characters are kept as they are
//!
//! assert_eq!(Some("zhongguo!".to_string()), table.full_pinyin("中国!"));
//! assert_eq!(Some("zg!".to_string()), table.first_letters("中国!"));
//!
//! // Chinese characters only
//!
//! assert_eq!(Some("中国".to_string()), table.chinese("a中b国"));
//!
//! // Process-wide table, loaded once
//!
//! let table = PinyinTable::global().unwrap();
//! assert_eq!(Some("hanzi".to_string()), table.full_pinyin("汉字"));
//! ```

#![crate_name = "hanzi_pinyin"]
#![crate_type = "lib"]
#![crate_type = "dylib"]
#![crate_type = "rlib"]

pub mod character_code;
pub mod config;
pub mod pinyin_table;
mod resources;
pub mod table_reader;

pub mod prelude {
  pub use crate::pinyin_table::{PinyinTable, PinyinTableErr};
}
