use std::path::Path;
use tint_effect::{ChannelTintConfig, Effect, Narrowing, PROBE, decode, encode, sample_at};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img_path = Path::new("data/test.png");

    for (coefficient, narrowing, name) in [
        (0.5, Narrowing::Saturating, "metallic_tint_0.5.png"),
        (2.0, Narrowing::Saturating, "metallic_tint_2.0_saturating.png"),
        (2.0, Narrowing::Wrapping, "metallic_tint_2.0_wrapping.png"),
    ] {
        let mut image = decode(img_path)?;

        ChannelTintConfig::new()
            .with_coefficient(coefficient)
            .with_narrowing(narrowing)
            .apply(&mut image)?;

        encode(output_dir.join(name), &image)?;

        if let Some(sample) = sample_at(&image, PROBE.0, PROBE.1) {
            log::info!("{name}: sample at {PROBE:?} = {sample}");
        }
        println!("✓ {name} (coefficient {coefficient}, {narrowing:?})");
    }

    Ok(())
}
