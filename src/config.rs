use std::fs::File;
use std::io::{BufReader, Error as IOError, Read};
use std::path::{Path, PathBuf};

use serde_json::{error::Error as SerdeError, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigErr {
  #[error("{self:?}")]
  IOError(#[from] IOError),
  #[error("{self:?}")]
  SerdeError(#[from] SerdeError),
  #[error("`pinyinTable` must be a string in setting file")]
  InvalidPinyinTableErr,
}

#[derive(Debug)]
pub struct Config {
  pub settings: Value,
  pub resource_dir: PathBuf,
}

impl Config {
  /// Settings that select the bundled pinyin table.
  pub fn empty() -> Config {
    Config {
      settings: Value::Null,
      resource_dir: PathBuf::new(),
    }
  }
  pub fn setup(path: Option<&str>) -> Result<Config, ConfigErr> {
    let path = match path {
      Some(path) => Path::new(path),
      None => return Ok(Config::empty()),
    };
    let mut buf = String::new();
    BufReader::new(File::open(path)?).read_to_string(&mut buf)?;
    let settings = serde_json::from_str(&buf)?;
    let resource_dir = path
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_default();
    Ok(Config {
      settings,
      resource_dir,
    })
  }
  /// `None` when the bundled table should be used.
  pub fn pinyin_table_path(&self) -> Result<Option<PathBuf>, ConfigErr> {
    match self.settings.get("pinyinTable") {
      None | Some(Value::Null) => Ok(None),
      Some(Value::String(p)) => Ok(Some(self.resource_dir.join(p))),
      Some(_) => Err(ConfigErr::InvalidPinyinTableErr),
    }
  }
}
