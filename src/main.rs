use clap::{Parser, ValueEnum};
use geo_exif_locator::features::report::unavailable_message;
use geo_exif_locator::utils::expand_inputs;
use geo_exif_locator::{GeocoderKind, LocatorConfig, MetadataLocator, format_report};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, ValueEnum)]
enum GeocoderArg {
    Offline,
    Nominatim,
    None,
}

impl From<GeocoderArg> for GeocoderKind {
    fn from(arg: GeocoderArg) -> Self {
        match arg {
            GeocoderArg::Offline => Self::Offline,
            GeocoderArg::Nominatim => Self::Nominatim,
            GeocoderArg::None => Self::None,
        }
    }
}

#[derive(Parser)]
#[command(name = "geo-exif-locator")]
#[command(about = "Show where a photo was taken and what device took it")]
#[command(version)]
struct Cli {
    /// Image files or directories to scan
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Also scan hidden files and directories
    #[arg(long)]
    include_hidden: bool,

    /// Print JSON records instead of text reports
    #[arg(long)]
    json: bool,

    /// Skip unknown tags and maker notes when reading JPEG/PNG tag tables
    #[arg(long)]
    no_details: bool,

    /// Reverse geocoder used to resolve addresses
    #[arg(long, value_enum)]
    geocoder: Option<GeocoderArg>,

    /// Address lookup timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// JSON config file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn locator_config(&self) -> color_eyre::Result<LocatorConfig> {
        let mut config = match &self.config {
            Some(path) => LocatorConfig::from_json_file(path)?,
            None => LocatorConfig::default(),
        };
        if let Some(geocoder) = self.geocoder {
            config.geocoder = geocoder.into();
        }
        if let Some(secs) = self.timeout_secs {
            config.geocode_timeout_secs = secs;
        }
        if self.no_details {
            config.details = false;
        }
        Ok(config)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let locator = MetadataLocator::builder().config(cli.locator_config()?).build()?;
    let files = expand_inputs(&cli.inputs, cli.include_hidden)?;
    log::debug!("processing {} files", files.len());

    let mut records = Vec::new();
    for file in &files {
        let filename = display_name(file);
        let metadata = match std::fs::read(file) {
            Ok(bytes) => locator.locate(&bytes, &filename).await,
            Err(e) => {
                log::warn!("cannot read {}: {e}", file.display());
                None
            }
        };

        if cli.json {
            records.push(json!({ "file": file, "metadata": metadata }));
            continue;
        }
        println!("{}", file.display());
        match metadata {
            Some(metadata) => println!("{}\n", format_report(&metadata)),
            None => println!("{}\n", unavailable_message()),
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    Ok(())
}
