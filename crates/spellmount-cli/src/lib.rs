// spellmount-cli: shared utilities for the command-line tools.

use std::path::PathBuf;
use std::process;

use spellmount::wordlist::WordlistLoader;
use spellmount::{DictionarySource, InProcessSink, SessionError, SpellSession};

/// Dictionary data file extension.
const DIC_EXT: &str = "dic";

/// Affix file extension.
const AFF_EXT: &str = "aff";

/// One `-d` argument: a locale key plus the file pair backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictSpec {
    pub key: String,
    pub dic: PathBuf,
    pub aff: PathBuf,
}

/// Parse `-d KEY=PATH.dic` / `--dict KEY=PATH.dic` / bare `-d KEY` arguments.
///
/// Returns the specs and the remaining arguments. The affix file is expected
/// next to the dictionary data file with an `.aff` extension. A bare key is
/// resolved against the search directories (see [`resolve_key`]).
pub fn parse_dict_args(args: &[String]) -> (Vec<DictSpec>, Vec<String>) {
    let mut specs = Vec::new();
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        let value = if let Some(v) = arg.strip_prefix("--dict=") {
            Some(v.to_string())
        } else if arg == "--dict" || arg == "-d" {
            if i + 1 < args.len() {
                skip_next = true;
                Some(args[i + 1].clone())
            } else {
                eprintln!("error: {arg} requires a value");
                process::exit(1);
            }
        } else {
            remaining.push(arg.clone());
            None
        };
        if let Some(value) = value {
            match parse_spec(&value) {
                Ok(spec) => specs.push(spec),
                Err(msg) => fatal(&msg),
            }
        }
    }

    (specs, remaining)
}

/// Parse one spec value: `KEY=PATH.dic` or a bare `KEY`.
fn parse_spec(value: &str) -> Result<DictSpec, String> {
    if let Some((key, path)) = value.split_once('=') {
        if key.is_empty() {
            return Err(format!("empty dictionary key in '{value}'"));
        }
        let dic = PathBuf::from(path);
        let aff = dic.with_extension(AFF_EXT);
        Ok(DictSpec {
            key: key.to_string(),
            dic,
            aff,
        })
    } else {
        resolve_key(value)
    }
}

/// Resolve a bare key to `KEY.dic`/`KEY.aff` in the search directories.
///
/// Search order:
/// 1. `SPELLMOUNT_DICT_PATH` environment variable
/// 2. `~/.spellmount`
/// 3. Current working directory
pub fn resolve_key(key: &str) -> Result<DictSpec, String> {
    if key.is_empty() {
        return Err("empty dictionary key".to_string());
    }
    let mut dirs = Vec::new();
    if let Ok(env_dir) = std::env::var("SPELLMOUNT_DICT_PATH") {
        dirs.push(PathBuf::from(env_dir));
    }
    if let Some(home) = home_dir() {
        dirs.push(home.join(".spellmount"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    for dir in &dirs {
        let dic = dir.join(format!("{key}.{DIC_EXT}"));
        if dic.is_file() {
            return Ok(DictSpec {
                key: key.to_string(),
                aff: dic.with_extension(AFF_EXT),
                dic,
            });
        }
    }

    Err(format!(
        "could not find {key}.{DIC_EXT} in any of the search paths:\n{}",
        dirs.iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Parse a `--use KEY` / `-u KEY` / `--use=KEY` argument.
pub fn parse_use_key(args: &[String]) -> Option<String> {
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--use=") {
            return Some(value.to_string());
        }
        if arg == "--use" || arg == "-u" {
            return iter.peek().map(|v| v.to_string());
        }
    }
    None
}

/// Build a session over the word-list engine, load every spec, and select
/// `use_key` (or the first spec) as primary.
pub fn build_session(
    specs: &[DictSpec],
    use_key: Option<&str>,
    check_all: bool,
) -> Result<(SpellSession, InProcessSink), SessionError> {
    let sink = InProcessSink::new();
    let mut session = SpellSession::new(WordlistLoader::new(), sink.clone());
    session.initialize()?;

    for spec in specs {
        session.load_dictionary(&spec.key, DictionarySource::from_files(&spec.dic, &spec.aff))?;
    }

    let primary = use_key
        .map(str::to_string)
        .or_else(|| specs.first().map(|spec| spec.key.clone()));
    if let Some(primary) = primary {
        session.switch_dictionary(&primary, check_all)?;
    }

    Ok((session, sink))
}

/// Initialize the log backend; `verbose` raises the default level to debug.
pub fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dict_specs_are_extracted_from_the_arguments() {
        let (specs, rest) = parse_dict_args(&args(&[
            "-d",
            "en-us=/dict/en-us.dic",
            "--all",
            "--dict=en-gb=/dict/en-gb.dic",
        ]));

        assert_eq!(
            specs,
            vec![
                DictSpec {
                    key: "en-us".to_string(),
                    dic: PathBuf::from("/dict/en-us.dic"),
                    aff: PathBuf::from("/dict/en-us.aff"),
                },
                DictSpec {
                    key: "en-gb".to_string(),
                    dic: PathBuf::from("/dict/en-gb.dic"),
                    aff: PathBuf::from("/dict/en-gb.aff"),
                },
            ]
        );
        assert_eq!(rest, args(&["--all"]));
    }

    #[test]
    fn use_key_is_parsed_in_both_forms() {
        assert_eq!(
            parse_use_key(&args(&["-u", "en-gb"])).as_deref(),
            Some("en-gb")
        );
        assert_eq!(
            parse_use_key(&args(&["--use=en-us"])).as_deref(),
            Some("en-us")
        );
        assert_eq!(parse_use_key(&args(&["-s"])), None);
    }

    #[test]
    fn bare_keys_resolve_against_the_dict_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("en-us.dic"), "color\n").expect("dic");
        std::fs::write(dir.path().join("en-us.aff"), "").expect("aff");

        // SPELLMOUNT_DICT_PATH is process-global; keep this the only test
        // that sets it.
        unsafe { std::env::set_var("SPELLMOUNT_DICT_PATH", dir.path()) };
        let spec = resolve_key("en-us").expect("resolve");
        unsafe { std::env::remove_var("SPELLMOUNT_DICT_PATH") };

        assert_eq!(spec.key, "en-us");
        assert_eq!(spec.dic, dir.path().join("en-us.dic"));
        assert_eq!(spec.aff, dir.path().join("en-us.aff"));
    }

    #[test]
    fn unresolvable_bare_key_reports_the_search_paths() {
        let err = resolve_key("no-such-locale").expect_err("must fail");
        assert!(err.contains("no-such-locale.dic"));
    }
}
