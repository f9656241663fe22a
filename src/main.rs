use clap::{arg, command, ArgAction, ArgMatches, Command};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let matches = command!()
        .arg(arg!(-v --verbose "Log progress, repeat for more detail").action(ArgAction::Count))
        .subcommand(
            Command::new("compress")
                .about("Compress a file into an SHF archive")
                .arg(arg!(input: <INPUT> "File to compress"))
                .arg(arg!(output: <OUTPUT> "Archive path")),
        )
        .subcommand(
            Command::new("decompress")
                .about("Restore a file from an SHF archive")
                .arg(arg!(input: <INPUT> "Archive path"))
                .arg(arg!(output: <OUTPUT> "Restored file path")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the frequency and code tables of an archive")
                .arg(arg!(archive: <ARCHIVE> "Archive path")),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("compress", matches)) => {
            let (input, output) = paths(matches);
            let summary = shf_archiver::compress(input, output)
                .map_err(|e| describe(e, || format!("compressing {input}")))?;
            println!(
                "{input} -> {output}: {} -> {} bytes, {} distinct symbols",
                summary.bytes_in, summary.bytes_out, summary.symbols
            );
        }
        Some(("decompress", matches)) => {
            let (input, output) = paths(matches);
            let summary = shf_archiver::decompress(input, output)
                .map_err(|e| describe(e, || format!("decompressing {input}")))?;
            println!(
                "{input} -> {output}: {} -> {} bytes",
                summary.bytes_in, summary.bytes_out
            );
        }
        Some(("inspect", matches)) => {
            let path = matches.get_one::<String>("archive").unwrap();
            inspect(path)?;
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

fn paths(matches: &ArgMatches) -> (&String, &String) {
    let input = matches.get_one::<String>("input").unwrap();
    let output = matches.get_one::<String>("output").unwrap();
    (input, output)
}

/// Invalid input and invalid data print as their own message. Environment
/// faults get the failing action attached.
fn describe<F>(error: shf_archiver::Error, action: F) -> anyhow::Error
where
    F: FnOnce() -> String,
{
    if error.is_user_facing() {
        anyhow::Error::new(error)
    } else {
        anyhow::Error::new(error).context(action())
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn inspect(path: &str) -> anyhow::Result<()> {
    let (table, codes) = shf_archiver::inspect(path)
        .map_err(|e| describe(e, || format!("reading header of {path}")))?;

    println!(
        "{path}: {} distinct symbols, {} source bytes, {} header bytes",
        table.len(),
        table.total(),
        shf_archiver::archive::Header::encoded_len(table.len())
    );
    println!("\tsymbol\t\tcount\tcode");
    for (symbol, code) in codes.iter() {
        let count = table.get(symbol).unwrap_or_default();
        println!("\t{symbol:#04X}\t\t{count}\t{code}");
    }

    Ok(())
}
