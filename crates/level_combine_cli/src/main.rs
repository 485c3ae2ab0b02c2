#![forbid(unsafe_code)]
//! Command-line driver: combine stored levels into a new one, list a
//! collection, or reset completion progress.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use level_combine::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "level-combine", version, about)]
struct Cli {
    /// Directory holding the `published/` and `user/` level collections.
    #[arg(long = "levels-dir", value_name = "DIR", default_value = "levels", global = true)]
    levels_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Splice rotated, thinned pieces of every stored level into a new user level.
    Combine(CombineArgs),
    /// List the levels of a collection.
    List {
        #[arg(long, value_enum, default_value_t = CollectionArg::Published)]
        collection: CollectionArg,
        /// Include soft-deleted levels.
        #[arg(long)]
        include_deleted: bool,
    },
    /// Zero completion percentage and coin flags of every level in a collection.
    Reset {
        #[arg(long, value_enum)]
        collection: Option<CollectionArg>,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct CombineArgs {
    /// Seed for a reproducible run. Omit to seed from the OS.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Maximum number of rotated variants to try placing.
    #[arg(
        long = "max-variants",
        value_name = "COUNT",
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_variants: u64,
    /// Placement offsets are drawn per axis from [-RANGE, RANGE].
    #[arg(
        long = "offset-range",
        value_name = "RANGE",
        default_value_t = 10,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    offset_range: i64,
    /// Leave out corpus files that fail to decode instead of aborting.
    #[arg(long = "skip-unreadable")]
    skip_unreadable: bool,
    /// Print the combined level instead of writing it.
    #[arg(long = "dry-run")]
    dry_run: bool,
}

impl Default for CombineArgs {
    fn default() -> Self {
        Self {
            seed: None,
            max_variants: 15,
            offset_range: 10,
            skip_unreadable: false,
            dry_run: false,
        }
    }
}

impl CombineArgs {
    fn config(&self) -> CombineConfig {
        CombineConfig::new()
            .with_max_variants(self.max_variants as usize)
            .with_offset_range(self.offset_range)
            .with_skip_unreadable(self.skip_unreadable)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CollectionArg {
    Published,
    User,
}

impl From<CollectionArg> for Collection {
    fn from(value: CollectionArg) -> Self {
        match value {
            CollectionArg::Published => Collection::Published,
            CollectionArg::User => Collection::User,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let store = LevelStore::new(&cli.levels_dir);

    match cli.command.unwrap_or(Command::Combine(CombineArgs::default())) {
        Command::Combine(args) => run_combine(store, &args),
        Command::List {
            collection,
            include_deleted,
        } => run_list(&store, collection.into(), include_deleted),
        Command::Reset { collection } => {
            let targets: Vec<Collection> = match collection {
                Some(c) => vec![c.into()],
                None => Collection::ALL.to_vec(),
            };
            for c in targets {
                let count = store
                    .reset_completion(c)
                    .with_context(|| format!("resetting completion in '{c}'"))?;
                info!("Reset completion of {} level(s) in '{}'.", count, c);
            }
            Ok(())
        }
    }
}

fn run_combine(store: LevelStore, args: &CombineArgs) -> Result<()> {
    let combiner = Combiner::try_new(store, args.config())?;
    let mut rng = args.rng();

    if args.dry_run {
        let result = combiner
            .combine(&mut rng, &mut ())
            .context("combining levels")?;
        println!("{}", encode(&result.level.to_output_file()));
        return Ok(());
    }

    let saved = combiner.run(&mut rng).context("combining levels")?;
    info!(
        "Wrote '{}': {} of {} sampled variant(s) placed, {} object(s).",
        saved.file_name,
        saved.result.placed,
        saved.result.sampled,
        saved.result.level.len()
    );
    println!("{}", saved.path.display());
    Ok(())
}

fn run_list(store: &LevelStore, collection: Collection, include_deleted: bool) -> Result<()> {
    let levels = store
        .list(collection, include_deleted)
        .with_context(|| format!("listing '{collection}'"))?;
    for stored in levels {
        let deleted = if stored.file.deleted { " (deleted)" } else { "" };
        println!(
            "{}\t{}\t{} object(s){}",
            stored.file_name,
            stored.file.name,
            stored.file.objects.len(),
            deleted
        );
    }
    Ok(())
}
