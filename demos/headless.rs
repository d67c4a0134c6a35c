use galaxy_sim::*;

const FRAMES: u64 = 300;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frame = FrameConfig {
        width: 400,
        height: 300,
        ..FrameConfig::default()
    };
    let galaxy = GalaxyConfig {
        min_stars: 150,
        max_stars: 250,
        ..GalaxyConfig::default()
    };
    let generator = GalaxyGenerator::seeded(galaxy, 0x5eed)?;
    let mut driver = FrameDriver::with_generator(SimConfig::default(), generator, frame)?;

    let clicks = [(0, DVec2::new(120.0, 150.0)), (40, DVec2::new(280.0, 150.0))];

    for n in 0..FRAMES {
        let mut input = FrameInput::default();
        if let Some(&(_, pointer)) = clicks.iter().find(|(at, _)| *at == n) {
            input.pointer = pointer;
            input.button_down = true;
        }
        input.left = (150..180).contains(&n);

        let stats = driver.frame(&input)?;
        if stats.spawned > 0 {
            log::info!("frame {}: spawned {} stars", stats.frame, stats.spawned);
        }
        if n % 50 == 0 {
            log::info!(
                "frame {}: {} bodies, {} merged, step {:.2?}, frame {:.2?}",
                stats.frame,
                stats.step.body_count,
                stats.step.merged,
                stats.step.total_time,
                stats.elapsed
            );
        }
    }

    let lit = driver
        .canvas()
        .pixels()
        .iter()
        .filter(|p| p.to_u32() != 0)
        .count();
    println!(
        "{} cycles, {} bodies left, {} lit pixels, view at ({}, {})",
        driver.simulation().cycles(),
        driver.simulation().len(),
        lit,
        driver.view().x,
        driver.view().y
    );
    Ok(())
}
