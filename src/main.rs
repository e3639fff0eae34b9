use std::error::Error;
use std::fs::File;
use std::io::{stdin, BufRead, BufReader};
use std::path::Path;
use std::process::exit;

use clap::{crate_name, crate_version, App, Arg, ArgMatches, SubCommand};

use hanzi_pinyin::pinyin_table::PinyinTable;

// Subcommand names
const LOOKUP_SUB_CMD: &str = "lookup";
const CHINESE_SUB_CMD: &str = "chinese";
const FULL_SUB_CMD: &str = "full";
const FIRST_SUB_CMD: &str = "first";

// Argument names
const FPATH_SETTING_ARG: &str = "fpath_setting";
const IN_FILES_ARG: &str = "in_files";
const QUIET_ARG: &str = "quiet";
const VERBOSE_ARG: &str = "verbose";
const VERSION_ARG: &str = "version";

fn unwrap<T, E: Error>(t: Result<T, E>) -> T {
  match t {
    Ok(t) => t,
    Err(e) => {
      eprintln!("{}", e);
      exit(1);
    }
  }
}

fn setup_logger(args: &ArgMatches) {
  unwrap(
    stderrlog::new()
      .module("hanzi_pinyin")
      .quiet(args.is_present(QUIET_ARG))
      .verbosity(args.occurrences_of(VERBOSE_ARG) as usize)
      .init(),
  );
}

fn for_each_line<F: FnMut(&str)>(args: &ArgMatches, mut f: F) {
  let mut run = |reader: &mut dyn BufRead| {
    for line in reader.lines() {
      f(&unwrap(line));
    }
  };
  match args.values_of(IN_FILES_ARG) {
    Some(in_files) => {
      for in_file in in_files {
        run(&mut BufReader::new(unwrap(File::open(in_file))));
      }
    }
    None => run(&mut stdin().lock()),
  }
}

fn lookup(table: &PinyinTable, line: &str) {
  for c in line.chars() {
    match table.lookup(c) {
      Some(readings) => println!("{}\t{}", c, readings.join(",")),
      None => println!("{}\t*", c),
    }
  }
}

fn run(sub_cmd: &str, args: &ArgMatches) {
  if args.is_present(VERSION_ARG) {
    print_version();
    return;
  }
  setup_logger(args);
  let table = unwrap(PinyinTable::setup(args.value_of(FPATH_SETTING_ARG)));
  for_each_line(args, |line| match sub_cmd {
    LOOKUP_SUB_CMD => lookup(&table, line),
    CHINESE_SUB_CMD => println!("{}", table.chinese(line).unwrap_or_default()),
    FULL_SUB_CMD => println!("{}", table.full_pinyin(line).unwrap_or_default()),
    FIRST_SUB_CMD => println!("{}", table.first_letters(line).unwrap_or_default()),
    _ => unreachable!("unknown subcommand {}", sub_cmd),
  });
}

fn print_version() {
  println!("{} {}", crate_name!(), crate_version!())
}

fn in_files_validator(in_file: String) -> Result<(), String> {
  if Path::new(&in_file).is_file() {
    Ok(())
  } else {
    Err(format!(
      "{}: error: {} doesn't exist",
      crate_name!(),
      in_file
    ))
  }
}

fn sub_command<'a, 'b>(name: &str, about: &'b str) -> App<'a, 'b> {
  SubCommand::with_name(name)
    .about(about)
    .arg(
      Arg::with_name(FPATH_SETTING_ARG)
        .short("r")
        .takes_value(true)
        .help("the setting file in JSON format"),
    )
    .arg(
      Arg::with_name(VERBOSE_ARG)
        .short("v")
        .multiple(true)
        .help("log verbosity, repeat for more"),
    )
    .arg(
      Arg::with_name(QUIET_ARG)
        .short("q")
        .help("no logging"),
    )
    .arg(
      Arg::with_name(VERSION_ARG)
        .short("V")
        .help("print version"),
    )
    .arg(
      Arg::with_name(IN_FILES_ARG)
        .takes_value(true)
        .multiple(true)
        .help("text written in utf-8 (default: stdin)")
        .validator(in_files_validator),
    )
}

fn main() {
  let mut app = App::new("Chinese Pinyin Lookup")
    .subcommand(sub_command(
      LOOKUP_SUB_CMD,
      "Print the readings of each character",
    ))
    .subcommand(sub_command(
      CHINESE_SUB_CMD,
      "Keep only the Chinese characters",
    ))
    .subcommand(sub_command(FULL_SUB_CMD, "Transliterate to pinyin"))
    .subcommand(sub_command(
      FIRST_SUB_CMD,
      "Transliterate to pinyin first letters",
    ));
  let matches = app.clone().get_matches();

  match matches.subcommand() {
    (sub_cmd, Some(sub_matches)) => run(sub_cmd, sub_matches),
    _ => {
      app.print_help().expect("Unable to write help");
      println!();
    }
  }
}
