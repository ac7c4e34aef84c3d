use geo_exif_locator::utils::list_image_files;
use geo_exif_locator::{GeocoderKind, LocatorConfig, MetadataLocator};
use std::path::Path;

/// Prints the location of every geotagged photo in a folder, resolved through Nominatim.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = LocatorConfig {
        geocoder: GeocoderKind::Nominatim,
        ..LocatorConfig::default()
    };
    let locator = MetadataLocator::builder().config(config).build()?;

    let start_dir = Path::new("assets");
    let files = list_image_files(start_dir, false)?;
    println!("Found {} images.", files.len());

    for path in files {
        let filename = path.file_name().map(|n| n.to_string_lossy().into_owned());
        let Some(filename) = filename else { continue };
        let bytes = std::fs::read(&path)?;
        match locator.locate(&bytes, &filename).await {
            Some(metadata) if metadata.has_gps() => println!(
                "{}\t{}",
                path.display(),
                metadata.address.as_deref().unwrap_or("(no address)")
            ),
            Some(_) => println!("{}\tno GPS", path.display()),
            None => println!("{}\tunreadable", path.display()),
        }
        // Nominatim's usage policy allows one request per second.
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }

    Ok(())
}
