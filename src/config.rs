use clap::{Args, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{
    align::{AlgorithmKind, BandOptions, DEFAULT_INCREMENT_RATIO, DEFAULT_INITIAL_RADIUS},
    error::{AlignError, Result},
    model::DEFAULT_TRAIN_ITERATIONS,
    modify::RareWordReplacer,
    pipeline::{CategorySet, MacroKind, MacroOptions, DEFAULT_SELECT_FRACTION},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Categories {
    /// Whatever the macro uses by default.
    Auto,
    Best,
    Moore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    Sentence,
    /// Blocks separated by blank lines.
    Paragraph,
    Line,
    /// Align whole files as single segments.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Tab separated source, target and score.
    Pairs,
    /// Two columns side by side.
    Side,
    Debug,
}

macro_rules! config_structs {
    {
        $(
            $( #[config_opt($attr:meta)] )*
            pub $name:ident: $typ:ty,
        )*
    } => {
        #[derive(Clone, Debug, PartialEq)]
        pub struct Config {
            $( pub $name: $typ, )*
        }

        #[derive(Args, Debug, Deserialize, Default)]
        #[serde(rename_all = "kebab-case")]
        pub struct ConfigOpt {
            $( $( #[$attr] )* pub $name: Option<$typ>, )*
        }

        impl Config {
            pub fn update(self, opt: ConfigOpt) -> Config {
                Config {
                    $( $name: opt.$name.unwrap_or(self.$name), )*
                }
            }
        }
    }
}

config_structs! {
    #[config_opt(arg(short, long = "macro", value_name = "MACRO"))]
    #[config_opt(serde(rename = "macro"))]
    pub macro_kind: MacroKind,

    #[config_opt(arg(short, long))]
    pub algorithm: AlgorithmKind,

    #[config_opt(arg(long))]
    pub categories: Categories,

    #[config_opt(arg(long, value_name = "NUM"))]
    pub initial_radius: usize,

    #[config_opt(arg(long, value_name = "RATIO"))]
    pub increment_ratio: f64,

    #[config_opt(arg(long, value_name = "NUM"))]
    pub min_margin: usize,

    #[config_opt(arg(long, value_name = "NUM", help = "Largest band radius tried, 0 for no limit"))]
    pub max_radius: usize,

    #[config_opt(arg(long, value_name = "NUM"))]
    pub iterations: usize,

    #[config_opt(arg(long, value_name = "NUM"))]
    pub rare_word_threshold: usize,

    #[config_opt(arg(long, value_name = "FRACTION"))]
    pub select_fraction: f64,

    #[config_opt(arg(short, long))]
    pub split: SplitMode,

    #[config_opt(arg(short, long))]
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            macro_kind: MacroKind::Moore,
            algorithm: AlgorithmKind::Viterbi,
            categories: Categories::Auto,
            initial_radius: DEFAULT_INITIAL_RADIUS,
            increment_ratio: DEFAULT_INCREMENT_RATIO,
            min_margin: DEFAULT_INITIAL_RADIUS / 4,
            max_radius: 0,
            iterations: DEFAULT_TRAIN_ITERATIONS,
            rare_word_threshold: RareWordReplacer::DEFAULT_THRESHOLD,
            select_fraction: DEFAULT_SELECT_FRACTION,
            split: SplitMode::Sentence,
            output: OutputFormat::Pairs,
        }
    }
}

impl Config {
    pub fn macro_options(&self) -> MacroOptions {
        MacroOptions {
            algorithm: self.algorithm,
            categories: match self.categories {
                Categories::Auto => None,
                Categories::Best => Some(CategorySet::Best),
                Categories::Moore => Some(CategorySet::Moore),
            },
            band: BandOptions {
                initial_radius: self.initial_radius,
                increment_ratio: self.increment_ratio,
                min_margin: self.min_margin,
                max_radius: (self.max_radius > 0).then_some(self.max_radius),
            },
            iterations: self.iterations,
            rare_word_threshold: self.rare_word_threshold,
            select_fraction: self.select_fraction,
        }
    }
}

/// `$XDG_CONFIG_HOME/segalign/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("segalign").join("config.toml"))
}

pub fn read_config_file(path: &Path) -> Result<ConfigOpt> {
    let text = std::fs::read_to_string(path).map_err(|e| AlignError::io("reading config file", e))?;
    parse_config(&text).map_err(|source| AlignError::Config {
        path: path.display().to_string(),
        source,
    })
}

fn parse_config(text: &str) -> Result<ConfigOpt, toml::de::Error> {
    toml::from_str(text)
}

/// Defaults, then the user config file if it exists, then `path` if given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();
    if let Some(default_path) = default_config_path() {
        if default_path.is_file() {
            log::debug!("reading {}", default_path.display());
            config = config.update(read_config_file(&default_path)?);
        }
    }
    if let Some(path) = path {
        log::debug!("reading {}", path.display());
        config = config.update(read_config_file(path)?);
    }
    Ok(config)
}
