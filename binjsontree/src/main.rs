//! Command-line front end for libjsontree.
//!
//! Usage: jsontree [OPTIONS] [FILE]
//!
//! Loads a JSON document (from FILE, or stdin when FILE is absent or `-`),
//! parses it, and prints the tree or the first error found.
//!
//! Exit status: 0 ok, 1 usage, 2 load failure, 3 parse failure, 4 path not
//! found.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser as ClapParser;
use libjsontree::{Limits, Parser, Value};
use log::{debug, info};

const EXIT_LOAD: i32 = 2;
const EXIT_PARSE: i32 = 3;
const EXIT_PATH: i32 = 4;

#[derive(ClapParser, Debug)]
#[command(name = "jsontree", version, about = "Parse and inspect JSON documents")]
struct Args {
    /// Input file; stdin when absent or `-`
    file: Option<PathBuf>,

    /// Only check that the document parses
    #[arg(long)]
    check: bool,

    /// Print only the member at this slash-separated path, e.g. `a/b/c`
    #[arg(long)]
    path: Option<String>,

    /// Maximum nesting depth; 0 lifts every limit
    #[arg(long, default_value_t = Limits::DEFAULT_NESTING_DEPTH)]
    max_depth: usize,
}

impl Args {
    fn limits(&self) -> Limits {
        match self.max_depth {
            0 => Limits::unlimited(),
            depth => Limits {
                max_nesting_depth: depth,
                ..Limits::default()
            },
        }
    }
}

fn main() {
    env_logger::init();
    // clap exits with status 2 on bad usage; the loader owns that status.
    let args = Args::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        process::exit(code);
    });

    let input = match load(args.file.as_ref()) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Could not load input JSON file: {}", e);
            process::exit(EXIT_LOAD);
        }
    };
    debug!("loaded {} bytes", input.len());

    let mut parser = Parser::with_limits(args.limits());
    let root = match parser.parse_bytes(&input) {
        Ok(root) => root,
        Err(e) => {
            eprintln!(
                "Parsing failed at line: {}. Message: {}",
                e.line,
                e.message()
            );
            process::exit(EXIT_PARSE);
        }
    };

    if args.check {
        info!("document is valid");
        return;
    }

    let target = match args.path.as_deref() {
        Some(path) => match lookup(root, path) {
            Some(value) => value,
            None => {
                eprintln!("No value at path: {}", path);
                process::exit(EXIT_PATH);
            }
        },
        None => root,
    };
    println!("{:#?}", target);
}

fn load(file: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read(path),
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Walk a slash path without asserting on kinds, since the path comes from
/// the user rather than from code that knows the schema.
fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |current, segment| match current {
            Value::Object(members) => members.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}
