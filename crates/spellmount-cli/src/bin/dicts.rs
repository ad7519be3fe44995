// spellmount-dicts: list loaded dictionaries in uptime order.
//
// Loads the given dictionaries, selects a primary, and prints one line per
// registered locale key: key, accumulated selected-time in milliseconds, and
// a marker for the selected dictionary.
//
// Usage:
//   spellmount-dicts -d KEY=PATH.dic [-d KEY=PATH.dic ...] [OPTIONS]
//
// Options:
//   -d, --dict KEY=PATH.dic  Load a dictionary (affix file looked up alongside)
//   -d, --dict KEY           Resolve KEY.dic/KEY.aff in the search paths
//   -u, --use KEY            Select KEY as primary (default: first -d)
//   -v, --verbose            Verbose session logging
//   -h, --help               Print help

use std::io::{self, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (specs, args) = spellmount_cli::parse_dict_args(&args);

    if spellmount_cli::wants_help(&args) {
        println!("spellmount-dicts: List loaded dictionaries in uptime order.");
        println!();
        println!("Usage: spellmount-dicts -d KEY=PATH.dic [-d KEY=PATH.dic ...] [OPTIONS]");
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

    let (mut session, _sink) = spellmount_cli::build_session(&specs, use_key.as_deref(), false)
        .unwrap_or_else(|e| spellmount_cli::fatal(&e.to_string()));
    session.set_verbose_logging(verbose);

    let selected = session.selected_dictionary();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for key in session.available_dictionaries() {
        let uptime_millis = session
            .dictionary_uptime(&key)
            .map_or(0, |uptime| uptime.as_millis());
        let marker = if selected.as_deref() == Some(key.as_str()) {
            "  (selected)"
        } else {
            ""
        };
        let _ = writeln!(out, "{key}\t{uptime_millis}ms{marker}");
    }
}
