use colored::Colorize;
use cvl_chain::{Chain, Record};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Demo(args) => cmd_demo(args, &cli.format),
        Command::Digest(args) => cmd_digest(args, &cli.format),
        Command::Search(args) => cmd_search(args, &cli.format),
    }
}

fn cmd_demo(args: DemoArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mut chain = Chain::new();
    for payload in &args.payloads {
        chain.append(payload.as_str())?;
    }

    println!("{}", "Chain before correction".bold());
    print_chain(&chain, format)?;
    print_validity(&chain);

    match args.max_iterations {
        Some(max) => chain.find_and_correct_bounded(&args.prefix, args.position, max)?,
        None => chain.find_and_correct(&args.prefix, args.position)?,
    }

    println!();
    println!(
        "{} (prefix {}, position {})",
        "Chain after correction".bold(),
        args.prefix.yellow(),
        args.position,
    );
    print_chain(&chain, format)?;
    print_validity(&chain);
    Ok(())
}

fn cmd_digest(args: DigestArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let record = Record::with_nonce(
        args.position,
        args.payload.as_str(),
        args.prev_hash.as_str(),
        args.nonce,
    )?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => println!("{}", record.hash()),
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mut record = Record::new(args.position, args.payload.as_str(), args.prev_hash.as_str())?;
    match args.max_iterations {
        Some(max) => {
            record.search_nonce_bounded(&args.prefix, max)?;
        }
        None => record.search_nonce(&args.prefix),
    }
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Text => println!(
            "{} nonce {} gives hash {}",
            "✓".green().bold(),
            record.nonce().to_string().yellow(),
            record.hash().cyan(),
        ),
    }
    Ok(())
}

fn print_chain(chain: &Chain, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(chain.records())?),
        OutputFormat::Text => {
            for record in chain.records() {
                print_record(record);
            }
        }
    }
    Ok(())
}

fn print_record(record: &Record) {
    println!(
        "{}  payload: {}  nonce: {}",
        format!("#{}", record.position()).yellow().bold(),
        record.payload(),
        record.nonce(),
    );
    println!("    prev: {}", record.prev_hash().dimmed());
    println!("    hash: {}", record.hash().cyan());
}

fn print_validity(chain: &Chain) {
    if chain.is_valid() {
        println!("{} chain is valid", "✓".green().bold());
    } else {
        println!("{} chain is NOT valid", "✗".red().bold());
    }
}
