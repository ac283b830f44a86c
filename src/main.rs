use anyhow::Context;
use clap::Parser;
use docmap::config::{
    DEFAULT_MAP_FILE, DEFAULT_NAMESPACE, DEFAULT_OUTPUT_DIR, DEFAULT_PROTECTED, DEFAULT_SOURCE_ROOT,
};
use docmap::extract::{DEFAULT_ABSTRACT_LIMIT, DEFAULT_SKIP_CHARS};
use docmap::{BuildConfig, ExtractRules};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to scan for markdown files
    #[arg(default_value = DEFAULT_SOURCE_ROOT)]
    source: PathBuf,

    /// Directory receiving the JSON payloads and the map
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Prefix of every payload file name
    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// File in the output directory to keep during cleanup (repeatable)
    #[arg(short, long = "protect", default_values = DEFAULT_PROTECTED)]
    protected: Vec<String>,

    /// Name of the map file
    #[arg(long, default_value = DEFAULT_MAP_FILE)]
    map: String,

    /// Abstracts longer than this many characters are cut
    #[arg(long, default_value_t = DEFAULT_ABSTRACT_LIMIT)]
    abstract_limit: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = BuildConfig {
        source_root: args.source,
        output_dir: args.output,
        protected_names: args.protected,
        root_namespace: args.namespace,
        map_file: args.map,
        rules: ExtractRules {
            abstract_limit: args.abstract_limit,
            skip_chars: DEFAULT_SKIP_CHARS.to_vec(),
        },
    };

    docmap::run(&config).context("build failed")?;
    Ok(())
}
