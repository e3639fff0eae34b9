use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Error as IOError, Read};
use std::path::Path;

use encoding_rs::mem::decode_latin1;
use log::{debug, info};
use thiserror::Error;

use super::character_code::{is_code, normalize_code};

pub type PinyinEntries = HashMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum ReadPinyinTableErr {
  #[error("missing '=' at line {0}")]
  MissingDelimiterErr(usize),
  #[error("{1} is invalid character code at line {0}")]
  InvalidCodeErr(usize, String),
  #[error("{self:?}")]
  IOError(#[from] IOError),
}

/// Parsed content of a pinyin table stream.
#[derive(Debug, Default)]
pub struct TableContent {
  pub entries: PinyinEntries,
  pub skipped: usize,
}

fn split_line(line: &str, line_no: usize) -> Result<(String, Vec<String>), ReadPinyinTableErr> {
  let delimiter = line
    .find('=')
    .ok_or(ReadPinyinTableErr::MissingDelimiterErr(line_no))?;
  let (hex, pinyin) = (&line[..delimiter], &line[delimiter + 1..]);
  if !is_code(hex) {
    return Err(ReadPinyinTableErr::InvalidCodeErr(
      line_no,
      hex.to_string(),
    ));
  }
  let mut variants: Vec<String> = pinyin.split(',').map(String::from).collect();
  // "a,b," reads as ["a", "b"]
  while variants.last().map_or(false, |v| v.is_empty()) {
    variants.pop();
  }
  Ok((normalize_code(hex), variants))
}

/// Reads one line into `buf` without its terminator, which is `\n`, `\r\n` or `\r`.
/// Returns `false` at the end of the stream.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<bool, IOError> {
  let mut read_any = false;
  loop {
    let (terminator, used) = {
      let available = reader.fill_buf()?;
      if available.is_empty() {
        return Ok(read_any);
      }
      read_any = true;
      match available.iter().position(|b| *b == b'\n' || *b == b'\r') {
        Some(i) => {
          buf.extend_from_slice(&available[..i]);
          (Some(available[i]), i + 1)
        }
        None => {
          buf.extend_from_slice(available);
          (None, available.len())
        }
      }
    };
    reader.consume(used);
    match terminator {
      Some(b'\r') => {
        if reader.fill_buf()?.first() == Some(&b'\n') {
          reader.consume(1);
        }
        return Ok(true);
      }
      Some(_) => return Ok(true),
      None => (),
    }
  }
}

pub fn read_table_from_reader<R: BufRead>(
  reader: &mut R,
) -> Result<TableContent, ReadPinyinTableErr> {
  info!("reading the pinyin table...");
  let mut content = TableContent::default();
  let mut buf = vec![];
  let mut line_no = 0;
  loop {
    buf.clear();
    if !read_line(reader, &mut buf)? {
      break;
    }
    line_no += 1;
    let line = decode_latin1(&buf);
    let (hex, variants) = split_line(&line, line_no)?;
    if variants.is_empty() {
      debug!("no pinyin for {} at line {}", hex, line_no);
      content.skipped += 1;
      continue;
    }
    content.entries.insert(hex, variants);
  }
  info!(
    "{} characters, {} lines without pinyin",
    content.entries.len(),
    content.skipped
  );
  Ok(content)
}

pub fn read_table<R: Read>(reader: R) -> Result<TableContent, ReadPinyinTableErr> {
  read_table_from_reader(&mut BufReader::new(reader))
}

pub fn read_table_file<P: AsRef<Path>>(path: P) -> Result<TableContent, ReadPinyinTableErr> {
  let path = path.as_ref();
  debug!("opening {}", path.display());
  read_table(File::open(path)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs::{create_dir_all, remove_file, File};
  use std::io::{Cursor, Write};
  use std::path::PathBuf;

  fn read(text: &[u8]) -> Result<TableContent, ReadPinyinTableErr> {
    read_table_from_reader(&mut Cursor::new(text.to_vec()))
  }

  fn resources_test_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/test");
    create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn test_read_table() {
    let content = read(b"4E2D=zhong1,zhong4\n56FD=guo2\n").unwrap();
    assert_eq!(2, content.entries.len());
    assert_eq!(0, content.skipped);
    assert_eq!(
      Some(&vec!["zhong1".to_string(), "zhong4".to_string()]),
      content.entries.get("4E2D")
    );
    assert_eq!(Some(&vec!["guo2".to_string()]), content.entries.get("56FD"));
  }

  #[test]
  fn test_read_table_skips_empty_pinyin() {
    let content = read(b"0041=\n4E2D=zhong1\n3400=,,\n").unwrap();
    assert_eq!(1, content.entries.len());
    assert_eq!(2, content.skipped);
    assert!(content.entries.get("0041").is_none());
    assert!(content.entries.get("3400").is_none());
  }

  #[test]
  fn test_read_table_without_trailing_newline() {
    let content = read(b"4E2D=zhong1\r\n56FD=guo2").unwrap();
    assert_eq!(Some(&vec!["zhong1".to_string()]), content.entries.get("4E2D"));
    assert_eq!(Some(&vec!["guo2".to_string()]), content.entries.get("56FD"));
  }

  #[test]
  fn test_read_table_with_carriage_return_line_ends() {
    let content = read(b"4E2D=zhong1,zhong4\r56FD=guo2\r").unwrap();
    assert_eq!(2, content.entries.len());
    assert_eq!(
      Some(&vec!["zhong1".to_string(), "zhong4".to_string()]),
      content.entries.get("4E2D")
    );
    assert_eq!(Some(&vec!["guo2".to_string()]), content.entries.get("56FD"));

    let content = read(b"4E2D=zhong1\r\n56FD=guo2\r6C49=han4\n5B57=zi4").unwrap();
    assert_eq!(4, content.entries.len());
    assert_eq!(Some(&vec!["han4".to_string()]), content.entries.get("6C49"));
    assert_eq!(Some(&vec!["zi4".to_string()]), content.entries.get("5B57"));
  }

  #[test]
  fn test_read_table_with_blank_carriage_return_line() {
    match read(b"4E2D=zhong1\r\r56FD=guo2\r") {
      Ok(_) => panic!("blank line should throw missing delimiter error"),
      Err(err) => assert_eq!("missing '=' at line 2", format!("{}", err)),
    }
  }

  #[test]
  fn test_read_line_across_buffer_boundary() {
    let mut reader = BufReader::with_capacity(
      4,
      Cursor::new(b"4E2D=zhong1\r\n56FD=guo2".to_vec()),
    );
    let mut buf = vec![];
    assert!(read_line(&mut reader, &mut buf).unwrap());
    assert_eq!(b"4E2D=zhong1".to_vec(), buf);
    buf.clear();
    assert!(read_line(&mut reader, &mut buf).unwrap());
    assert_eq!(b"56FD=guo2".to_vec(), buf);
    buf.clear();
    assert!(!read_line(&mut reader, &mut buf).unwrap());
  }

  #[test]
  fn test_read_table_splits_at_first_delimiter() {
    let content = read(b"4E2D=zhong1,=x1,\n").unwrap();
    assert_eq!(
      Some(&vec!["zhong1".to_string(), "=x1".to_string()]),
      content.entries.get("4E2D")
    );
  }

  #[test]
  fn test_read_table_normalizes_code() {
    let content = read(b"4e2d=zhong1\n").unwrap();
    assert!(content.entries.contains_key("4E2D"));
  }

  #[test]
  fn test_read_table_decodes_latin1() {
    let content = read(b"4E2D=zh\xfcng1\n").unwrap();
    assert_eq!(
      Some(&vec!["zh\u{fc}ng1".to_string()]),
      content.entries.get("4E2D")
    );
  }

  #[test]
  fn test_read_table_with_missing_delimiter() {
    match read(b"4E2D=zhong1\n56FD guo2\n") {
      Ok(_) => panic!("should throw missing delimiter error"),
      Err(err) => assert_eq!("missing '=' at line 2", format!("{}", err)),
    }
    match read(b"4E2D=zhong1\n\n56FD=guo2\n") {
      Ok(_) => panic!("blank line should throw missing delimiter error"),
      Err(err) => assert_eq!("missing '=' at line 2", format!("{}", err)),
    }
  }

  #[test]
  fn test_read_table_with_invalid_code() {
    match read(b"=zhong1\n") {
      Ok(_) => panic!("should throw invalid code error"),
      Err(err) => assert_eq!(" is invalid character code at line 1", format!("{}", err)),
    }
    match read(b"4E2D=zhong1\nZZ=guo2\n") {
      Ok(_) => panic!("should throw invalid code error"),
      Err(err) => assert_eq!("ZZ is invalid character code at line 2", format!("{}", err)),
    }
  }

  #[test]
  fn test_read_table_file() {
    let filename = resources_test_dir().join("test_read_table_file.dat");
    let mut file = File::create(&filename).unwrap();
    file.write_all(b"4E2D=zhong1,zhong4\n").unwrap();
    file.flush().unwrap();

    let content = read_table_file(&filename).unwrap();
    assert_eq!(1, content.entries.len());

    remove_file(filename).unwrap();
  }

  #[test]
  fn test_read_table_file_not_found() {
    let filename = resources_test_dir().join("test_read_table_file_not_found.dat");
    match read_table_file(&filename) {
      Ok(_) => panic!("should throw io error"),
      Err(ReadPinyinTableErr::IOError(_)) => (),
      Err(err) => panic!("unexpected error {}", err),
    }
  }
}
