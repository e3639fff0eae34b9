/// Pinyin table shipped with the crate, ISO-8859-1 text.
pub const PINYIN_DAT: &[u8] = include_bytes!("../resources/pinyin.dat");
