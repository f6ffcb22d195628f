use std::error::Error;
use std::path::Path;

use image::{ImageBuffer, Rgb};

use atoll_world::overview::MapOverviewImage;

/// Writes an overview as an RGB PNG. Empty overviews are skipped with a warning.
pub fn write_overview(path: &Path, overview: &MapOverviewImage) -> Result<(), Box<dyn Error>> {
    if overview.width == 0 || overview.height == 0 {
        log::warn!("not writing {}: map has no cells", path.display());
        return Ok(());
    }
    let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(
        overview.width as u32,
        overview.height as u32,
        overview.data.clone(),
    )
    .ok_or("overview buffer does not match its dimensions")?;
    img.save(path)?;
    log::info!("wrote {}x{} png to {}", overview.width, overview.height, path.display());
    Ok(())
}
