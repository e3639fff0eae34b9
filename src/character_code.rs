use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
  static ref HEX_CODE: Regex = Regex::new(r"^[0-9A-Fa-f]+$").unwrap();
}

/// Key of `c` in the pinyin table: its code point as uppercase hex, no padding.
pub fn to_code(c: char) -> String {
  format!("{:X}", c as u32)
}

pub fn is_code(key: &str) -> bool {
  HEX_CODE.is_match(key)
}

pub fn normalize_code(key: &str) -> String {
  key.to_ascii_uppercase()
}
