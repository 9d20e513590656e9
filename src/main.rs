use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use farmcalc::{
    config::DefaultInputs,
    logging,
    report::{JsonReport, TextReport},
    Calculator, ConfigLoader, DataLoader, RankingInputs, Target,
};

const DEFAULT_CONFIG: &str = "farmcalc.yaml";

#[derive(Debug, Parser)]
#[command(author, version, about = "QQ farm crop yield calculator")]
struct Cli {
    /// Path to the calculator YAML config (defaults apply when farmcalc.yaml is absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the seed, plant and image tables
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Player level
    #[arg(long, allow_negative_numbers = true)]
    level: Option<i32>,

    /// Number of plots
    #[arg(long, allow_negative_numbers = true)]
    plots: Option<i32>,

    /// Apply normal fertilizer when seeding
    #[arg(long, overrides_with = "no_fertilizer")]
    fertilizer: bool,

    /// Seed without fertilizer
    #[arg(long, overrides_with = "fertilizer")]
    no_fertilizer: bool,

    /// What to maximise
    #[arg(long, value_enum)]
    target: Option<Target>,

    /// Leaderboard length
    #[arg(long)]
    top: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config_file(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
    }

    /// Base for a relative data directory: the working directory when it came
    /// from `--data-dir`, otherwise the directory of the config file.
    fn data_base(&self, loader: &ConfigLoader) -> PathBuf {
        match self.data_dir {
            Some(_) => loader.base_dir().to_path_buf(),
            None => loader.config_dir(self.config_file()),
        }
    }

    fn inputs(&self, defaults: &DefaultInputs) -> RankingInputs {
        let use_fertilizer = if self.fertilizer {
            true
        } else if self.no_fertilizer {
            false
        } else {
            defaults.fertilizer
        };
        RankingInputs {
            level: self.level.unwrap_or(defaults.level),
            plots: self.plots.unwrap_or(defaults.plots),
            use_fertilizer,
            target: self.target.unwrap_or(defaults.target),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ConfigLoader::new(".");
    let mut config = match &cli.config {
        Some(path) => loader.load(path)?,
        None => loader.load_or_default(cli.config_file())?,
    };
    logging::init(&config.logging);

    if let Some(dir) = &cli.data_dir {
        config.data.dir = dir.clone();
    }
    if let Some(top) = cli.top {
        config.report.top = top;
    }
    let inputs = cli.inputs(&config.defaults);

    let tables = DataLoader::new(cli.data_base(&loader), config.data.clone())
        .load()?
        .install();
    let mut calculator = Calculator::new(tables);
    let ranking = calculator.calculate(inputs);

    if cli.json {
        let report = JsonReport::build(ranking, &tables.images, &config.report);
        println!("{}", report.to_json()?);
    } else {
        print!("{}", TextReport::new(ranking, &tables.images, &config.report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_defaults() {
        let cli = Cli::parse_from([
            "farmcalc", "--level", "30", "--no-fertilizer", "--target", "gold",
        ]);
        let inputs = cli.inputs(&DefaultInputs::default());
        assert_eq!(inputs.level, 30);
        assert_eq!(inputs.plots, 24);
        assert!(!inputs.use_fertilizer);
        assert_eq!(inputs.target, Target::Currency);
    }

    #[test]
    fn last_fertilizer_flag_wins() {
        let cli = Cli::parse_from(["farmcalc", "--no-fertilizer", "--fertilizer"]);
        assert!(cli.inputs(&DefaultInputs::default()).use_fertilizer);
        let defaults = DefaultInputs {
            fertilizer: false,
            ..DefaultInputs::default()
        };
        let cli = Cli::parse_from(["farmcalc"]);
        assert!(!cli.inputs(&defaults).use_fertilizer);
    }

    #[test]
    fn data_dir_follows_the_config_file() {
        let loader = ConfigLoader::new(".");
        let cli = Cli::parse_from(["farmcalc"]);
        assert_eq!(cli.data_base(&loader), PathBuf::from("."));
        let cli = Cli::parse_from(["farmcalc", "--config", "/srv/farm/farmcalc.yaml"]);
        assert_eq!(cli.data_base(&loader), PathBuf::from("/srv/farm"));
        let cli = Cli::parse_from([
            "farmcalc", "--config", "/srv/farm/farmcalc.yaml", "--data-dir", "tables",
        ]);
        assert_eq!(cli.data_base(&loader), PathBuf::from("."));
    }

    #[test]
    fn negative_plots_parse() {
        let cli = Cli::parse_from(["farmcalc", "--plots", "-4", "--target", "experience"]);
        assert_eq!(cli.plots, Some(-4));
        assert_eq!(cli.target, Some(Target::Experience));
    }
}
