use geo_exif_locator::MetadataLocator;
use std::path::Path;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let path = Path::new("assets/IMG_7377.jpg");
    let locator = MetadataLocator::builder().build()?;
    let bytes = std::fs::read(path)?;

    println!("{}", locator.report(&bytes, "IMG_7377.jpg").await);
    if let Some(metadata) = locator.locate(&bytes, "IMG_7377.jpg").await {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    }

    Ok(())
}
