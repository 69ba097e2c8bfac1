use image::{Rgb, RgbImage};

fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all("data")?;

    // Green ramps top to bottom so every inverted-green value appears.
    let mut img = RgbImage::new(256, 256);
    for y in 0..256 {
        for x in 0..256 {
            img.put_pixel(x, y, Rgb([x as u8, y as u8, 128]));
        }
    }

    img.save("data/test.png")?;
    println!("Created data/test.png");

    Ok(())
}
