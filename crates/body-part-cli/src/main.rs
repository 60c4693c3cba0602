//! Body part index command line tool.

use std::path::PathBuf;

use body_part_cli::{render_json, render_lookup, render_search};
use body_part_index::{BodyPartIndex, IndexConfig};
use body_part_types::well_known::WHOLE_BODY_ID;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the default document path.
const DATA_FILE_ENV: &str = "BODY_PART_INDEX_FILE";

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "body-part-index")]
#[command(about = "Look up and search anatomic locations in a body part catalog")]
struct Args {
    /// Id or code (without system) of the body part to show
    #[arg(short = 'i', short_alias = 'c', long = "id-or-code", default_value = WHOLE_BODY_ID)]
    id_or_code: String,

    /// Body part JSON document (defaults to $BODY_PART_INDEX_FILE)
    #[arg(short = 'f', long = "from-file")]
    from_file: Option<PathBuf>,

    /// Print every body part matching this text instead of a single lookup
    #[arg(short, long)]
    search: Option<String>,

    /// Print the record as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Match search text regardless of case
    #[arg(long)]
    case_insensitive: bool,

    /// Accept catalogs whose left/right/unsided references disagree
    #[arg(long)]
    lenient: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();

    tracing::debug!("Starting body-part-index: {:?}", args);

    let path = match args.from_file.clone() {
        Some(path) => path,
        None => std::env::var(DATA_FILE_ENV)
            .map(PathBuf::from)
            .map_err(|_| format!("no document given: pass --from-file or set {DATA_FILE_ENV}"))?,
    };

    let config = IndexConfig {
        validate_sidedness: !args.lenient,
        case_insensitive_search: args.case_insensitive,
        ..IndexConfig::default()
    };

    tracing::info!("Using body part data from {}", path.display());
    let index = BodyPartIndex::from_path(&path, config)?;

    if let Some(query) = &args.search {
        print!("{}", render_search(index.search(query)));
        return Ok(());
    }

    let part = index
        .get(&args.id_or_code)
        .ok_or_else(|| format!("No body part with id or code {}", args.id_or_code))?;

    if args.json {
        println!("{}", render_json(&part)?);
    } else {
        print!("{}", render_lookup(&part));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["body-part-index", "-f", "body_parts.json"]).unwrap();
        assert_eq!(args.id_or_code, WHOLE_BODY_ID);
        assert_eq!(args.from_file, Some(PathBuf::from("body_parts.json")));
        assert!(args.search.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_code_alias() {
        let args = Args::try_parse_from(["body-part-index", "-c", "818983003"]).unwrap();
        assert_eq!(args.id_or_code, "818983003");

        let args = Args::try_parse_from(["body-part-index", "--id-or-code", "RID56", "-v"]).unwrap();
        assert_eq!(args.id_or_code, "RID56");
        assert!(args.verbose);
    }
}
