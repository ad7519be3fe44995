// spellmount-spell: check words from stdin against loaded dictionaries.
//
// Words go through the spell-check provider installed into the host sink,
// exactly as an embedding text surface would invoke it per keystroke.
// Output format, one line per word:
//   C: word    (correct)
//   W: word    (misspelled)
//
// Usage:
//   spellmount-spell -d KEY=PATH.dic [-d KEY=PATH.dic ...] [OPTIONS]
//
// Options:
//   -d, --dict KEY=PATH.dic  Load a dictionary (affix file looked up alongside)
//   -d, --dict KEY           Resolve KEY.dic/KEY.aff in the search paths
//   -u, --use KEY            Select KEY as primary (default: first -d)
//   -a, --all                Accept words any loaded dictionary accepts
//   -s, --suggest            Also print suggestions for misspelled words
//   -v, --verbose            Verbose session logging
//   -h, --help               Print help

use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (specs, args) = spellmount_cli::parse_dict_args(&args);

    if spellmount_cli::wants_help(&args) {
        println!("spellmount-spell: Check spelling of words from stdin.");
        println!();
        println!("Usage: spellmount-spell -d KEY=PATH.dic [-d KEY=PATH.dic ...] [OPTIONS]");
        println!();
        println!("Reads words from stdin (one per line). Prints:");
        println!("  C: word    (correct)");
        println!("  W: word    (misspelled)");
        println!();
        println!("Options:");
        println!("  -d, --dict KEY=PATH.dic  Load a dictionary (affix file looked up alongside)");
        println!("  -d, --dict KEY           Resolve KEY.dic/KEY.aff in the search paths");
        println!("  -u, --use KEY            Select KEY as primary (default: first -d)");
        println!("  -a, --all                Accept words any loaded dictionary accepts");
        println!("  -s, --suggest            Also print suggestions for misspelled words");
        println!("  -v, --verbose            Verbose session logging");
        println!("  -h, --help               Print this help");
        return;
    }

    let check_all = args.iter().any(|a| a == "-a" || a == "--all");
    let show_suggestions = args.iter().any(|a| a == "-s" || a == "--suggest");
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let use_key = spellmount_cli::parse_use_key(&args);

    spellmount_cli::init_logging(verbose);

    if specs.is_empty() {
        spellmount_cli::fatal("no dictionaries given; pass at least one -d KEY=PATH.dic");
    }

    let (mut session, sink) = spellmount_cli::build_session(&specs, use_key.as_deref(), check_all)
        .unwrap_or_else(|e| spellmount_cli::fatal(&e.to_string()));
    session.set_verbose_logging(verbose);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        // a provider is installed once a dictionary is selected
        let correct = sink.check(word).unwrap_or(true);
        if correct {
            let _ = writeln!(out, "C: {word}");
        } else {
            let _ = writeln!(out, "W: {word}");
            if show_suggestions {
                for suggestion in session.suggestions(word) {
                    let _ = writeln!(out, "S: {suggestion}");
                }
            }
        }
    }
}
