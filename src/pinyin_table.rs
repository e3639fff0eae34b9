use std::io::Read;
use std::path::Path;

use lazy_static::lazy_static;
use log::info;
use thiserror::Error;

use super::character_code::to_code;
use super::config::{Config, ConfigErr};
use super::resources::PINYIN_DAT;
use super::table_reader::{
  read_table, read_table_file, PinyinEntries, ReadPinyinTableErr, TableContent,
};

#[derive(Error, Debug)]
pub enum PinyinTableErr {
  #[error("{0}")]
  ReadPinyinTableErr(#[from] ReadPinyinTableErr),
  #[error("{0}")]
  ConfigErr(#[from] ConfigErr),
}

lazy_static! {
  static ref BUNDLED_TABLE: Result<PinyinTable, PinyinTableErr> = PinyinTable::from_bundled();
}

/// Chinese character to pinyin readings, with tone digits.
///
/// Readings of a character keep their order in the source data and the
/// first one is the default reading used for transliteration.
#[derive(Debug)]
pub struct PinyinTable {
  entries: PinyinEntries,
}

impl PinyinTable {
  fn new(content: TableContent) -> PinyinTable {
    PinyinTable {
      entries: content.entries,
    }
  }
  pub fn from_reader<R: Read>(reader: R) -> Result<PinyinTable, PinyinTableErr> {
    Ok(PinyinTable::new(read_table(reader)?))
  }
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<PinyinTable, PinyinTableErr> {
    Ok(PinyinTable::new(read_table_file(path)?))
  }
  pub fn from_bundled() -> Result<PinyinTable, PinyinTableErr> {
    PinyinTable::from_reader(PINYIN_DAT)
  }
  pub fn setup(config_path: Option<&str>) -> Result<PinyinTable, PinyinTableErr> {
    let config = Config::setup(config_path)?;
    match config.pinyin_table_path()? {
      Some(path) => {
        info!("using pinyin table {}", path.display());
        PinyinTable::from_path(path)
      }
      None => PinyinTable::from_bundled(),
    }
  }

  /// Process-wide table built from the bundled data on first call.
  ///
  /// The bundled data covers only a sample of common characters. Use
  /// [`PinyinTable::setup`] with a `pinyinTable` setting for a full table.
  pub fn global() -> Result<&'static PinyinTable, &'static PinyinTableErr> {
    let table: &'static Result<PinyinTable, PinyinTableErr> = &BUNDLED_TABLE;
    table.as_ref()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
  pub fn contains(&self, c: char) -> bool {
    self.entries.contains_key(&to_code(c))
  }

  /// Readings of `c`, `None` for an unknown character.
  pub fn lookup(&self, c: char) -> Option<&[String]> {
    self.entries.get(&to_code(c)).map(Vec::as_slice)
  }
  fn default_reading(&self, c: char) -> Option<&str> {
    self
      .lookup(c)
      .and_then(|readings| readings.first())
      .map(String::as_str)
  }

  /// Keeps only the characters found in the table.
  pub fn chinese<'a, T: Into<Option<&'a str>>>(&self, text: T) -> Option<String> {
    let text = text.into()?;
    Some(text.chars().filter(|c| self.contains(*c)).collect())
  }

  /// Untoned pinyin of each known character, other characters as they are.
  pub fn full_pinyin<'a, T: Into<Option<&'a str>>>(&self, text: T) -> Option<String> {
    let text = text.into()?;
    let mut s = String::with_capacity(text.len() * 2);
    for c in text.chars() {
      match self.default_reading(c) {
        Some(reading) => s.push_str(strip_tone(reading)),
        None => s.push(c),
      }
    }
    Some(s)
  }

  /// First letter of the pinyin of each known character, other characters as they are.
  pub fn first_letters<'a, T: Into<Option<&'a str>>>(&self, text: T) -> Option<String> {
    let text = text.into()?;
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
      match self.default_reading(c) {
        Some(reading) => s.extend(reading.chars().next()),
        None => s.push(c),
      }
    }
    Some(s)
  }
}

// the tone is always the last character of a reading
fn strip_tone(reading: &str) -> &str {
  let mut chars = reading.chars();
  chars.next_back();
  chars.as_str()
}
