//! Command-line arguments of the `hyperquery` binary.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use hyperquery_common::{ConfigError, DatasetKey, GenerationConfig};

/// Hyperquery - Generate subhypergraph queries by random walks
#[derive(Parser, Debug)]
#[command(name = "hyperquery")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Hyperquery subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample walks from a dataset and write them as query files
    Generate(GenerateArgs),
    /// Print statistics of existing query files
    Inspect(InspectArgs),
}

/// Dataset selection shared by subcommands
#[derive(ClapArgs, Debug)]
pub struct DatasetArgs {
    /// Name of the dataset directory
    #[arg(short = 'd', long)]
    pub dataset: String,
    /// Directory holding the dataset directories
    #[arg(short = 'r', long, default_value = "../dataset/hypergraphs")]
    pub root: PathBuf,
}

impl DatasetArgs {
    /// Key of the selected dataset.
    pub fn key(&self) -> DatasetKey {
        DatasetKey::new(&self.root, self.dataset.as_str())
    }
}

/// Arguments of `hyperquery generate`
#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// Dataset to sample from
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// JSON generation config; flags below override its fields
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Walk lengths, comma-separated [default: 3,4,5,6,7,8]
    #[arg(short = 'l', long, value_delimiter = ',')]
    pub lengths: Option<Vec<usize>>,
    /// Walks per length [default: 200]
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,
    /// Base seed; random when omitted
    #[arg(short = 's', long)]
    pub seed: Option<u64>,
    /// Fresh walks tried per query before giving up [default: 10]
    #[arg(long)]
    pub max_attempts: Option<usize>,
    /// Enable parallel execution [default: true]
    #[arg(short = 'p', long)]
    pub parallel: Option<bool>,
}

impl GenerateArgs {
    /// Convert command-line arguments into a generation config
    pub fn to_config(&self) -> Result<GenerationConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_json_file(path)?,
            None => GenerationConfig::default(),
        };
        if let Some(lengths) = &self.lengths {
            config = config.with_lengths(lengths.clone());
        }
        if let Some(samples) = self.samples {
            config = config.with_samples_per_length(samples);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(attempts) = self.max_attempts {
            config = config.with_max_attempts(attempts);
        }
        if let Some(parallel) = self.parallel {
            config = config.with_parallel(parallel);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `hyperquery inspect`
#[derive(ClapArgs, Debug)]
pub struct InspectArgs {
    /// Name of the dataset whose queries directory is inspected
    #[arg(short = 'd', long, required_unless_present = "dir")]
    pub dataset: Option<String>,
    /// Directory holding the dataset directories
    #[arg(short = 'r', long, default_value = "../dataset/hypergraphs")]
    pub root: PathBuf,
    /// Inspect this directory instead of a dataset's queries directory
    #[arg(long, conflicts_with = "dataset")]
    pub dir: Option<PathBuf>,
}

impl InspectArgs {
    /// Directory whose query files are inspected.
    pub fn query_dir(&self) -> PathBuf {
        match (&self.dir, &self.dataset) {
            (Some(dir), _) => dir.clone(),
            (None, Some(name)) => DatasetKey::new(&self.root, name.as_str()).query_dir(),
            (None, None) => self.root.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(argv: &[&str]) -> GenerateArgs {
        let args = Args::try_parse_from(argv).unwrap();
        match args.command {
            Command::Generate(g) => g,
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_defaults() {
        let args = generate(&["hyperquery", "generate", "-d", "house-committees"]);
        let config = args.to_config().unwrap();
        assert_eq!(config, GenerationConfig::default());
        assert_eq!(
            args.dataset.key().hyperedge_file(),
            PathBuf::from("../dataset/hypergraphs/house-committees/hyperedges-house-committees.txt")
        );
    }

    #[test]
    fn test_generate_overrides() {
        let args = generate(&[
            "hyperquery", "generate", "-d", "x", "-l", "2,4", "-n", "5", "-s", "9", "-p", "false",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!(config.lengths, vec![2, 4]);
        assert_eq!(config.samples_per_length, 5);
        assert_eq!(config.seed, Some(9));
        assert!(!config.parallel);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.json");
        std::fs::write(&path, r#"{"lengths": [3], "samples_per_length": 50}"#).unwrap();
        let path_arg = path.to_str().unwrap();
        let args = generate(&["hyperquery", "generate", "-d", "x", "-c", path_arg, "-n", "2"]);
        let config = args.to_config().unwrap();
        assert_eq!(config.lengths, vec![3]);
        assert_eq!(config.samples_per_length, 2);
    }

    #[test]
    fn test_zero_length_rejected() {
        let args = generate(&["hyperquery", "generate", "-d", "x", "-l", "0"]);
        assert!(matches!(args.to_config(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_repeated_length_rejected() {
        let args = generate(&["hyperquery", "generate", "-d", "x", "-l", "3,1,3"]);
        assert!(matches!(args.to_config(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inspect_needs_target() {
        assert!(Args::try_parse_from(["hyperquery", "inspect"]).is_err());
        let args = Args::try_parse_from(["hyperquery", "inspect", "--dir", "q"]).unwrap();
        let Command::Inspect(inspect) = args.command else {
            panic!("expected inspect");
        };
        assert_eq!(inspect.query_dir(), PathBuf::from("q"));
    }
}
