// spellmount-suggest: ranked suggestions for words from stdin or arguments.
//
// Correctly spelled words are reported as such; misspelled words get the
// selected dictionary's suggestion list in engine order.
//
// Usage:
//   spellmount-suggest -d KEY=PATH.dic [OPTIONS] [WORD...]
//
// Options:
//   -d, --dict KEY=PATH.dic  Load a dictionary (affix file looked up alongside)
//   -d, --dict KEY           Resolve KEY.dic/KEY.aff in the search paths
//   -u, --use KEY            Select KEY as primary (default: first -d)
//   -v, --verbose            Verbose session logging
//   -h, --help               Print help

use std::io::{self, BufRead, Write};

use spellmount::{InProcessSink, SpellSession};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (specs, args) = spellmount_cli::parse_dict_args(&args);

    if spellmount_cli::wants_help(&args) {
        println!("spellmount-suggest: Generate spelling suggestions.");
        println!();
        println!("Usage: spellmount-suggest -d KEY=PATH.dic [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, suggests for each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict KEY=PATH.dic  Load a dictionary (affix file looked up alongside)");
        println!("  -d, --dict KEY           Resolve KEY.dic/KEY.aff in the search paths");
        println!("  -u, --use KEY            Select KEY as primary (default: first -d)");
        println!("  -v, --verbose            Verbose session logging");
        println!("  -h, --help               Print this help");
        return;
    }

    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let use_key = spellmount_cli::parse_use_key(&args);

    spellmount_cli::init_logging(verbose);

    if specs.is_empty() {
        spellmount_cli::fatal("no dictionaries given; pass at least one -d KEY=PATH.dic");
    }

    // skip the value consumed by -u/--use when collecting word arguments
    let mut words: Vec<String> = Vec::new();
    let mut skip_next = false;
    for arg in &args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "-u" || arg == "--use" {
            skip_next = true;
            continue;
        }
        if !arg.starts_with('-') {
            words.push(arg.clone());
        }
    }

    let (mut session, sink) = spellmount_cli::build_session(&specs, use_key.as_deref(), false)
        .unwrap_or_else(|e| spellmount_cli::fatal(&e.to_string()));
    session.set_verbose_logging(verbose);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let suggest_word = |word: &str,
                        session: &SpellSession,
                        sink: &InProcessSink,
                        out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        if sink.check(word).unwrap_or(true) {
            let _ = writeln!(out, "{word} (correct)");
            return;
        }
        let suggestions = session.suggestions(word);
        if suggestions.is_empty() {
            let _ = writeln!(out, "{word}: (no suggestions)");
        } else {
            let _ = writeln!(out, "{word}:");
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }
    };

    if words.is_empty() {
        let stdin = io::stdin();
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
            suggest_word(word, &session, &sink, &mut out);
        }
    } else {
        for word in &words {
            suggest_word(word, &session, &sink, &mut out);
        }
    }
}
