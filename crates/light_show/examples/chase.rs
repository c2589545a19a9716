use std::thread::sleep;
use std::time::Duration;

use light_show as ls;
use light_show::controller::{ControllerConfig, StripType};
use light_show::{LedPixels, Render};

/// Colors marching across two strips as though they were one.
fn main() -> ls::Result<()> {
    env_logger::init();

    let config = ControllerConfig::from_arrays(
        &[18, 13],
        &[20, 10],
        &[StripType::Grb, StripType::Rgbw],
        10,
    )?;
    let controller = ls::MemoryController::new(config)?;
    let all = controller.all()?;

    // Light every third pixel, then rotate the pattern along.
    let every_third = all.slice(0, all.len(), 3)?;
    every_third.paint(ls::palette::christmas());

    for _ in 0..all.len() {
        controller.render(true)?;
        let line = all
            .iter()
            .map(|p| if p.get() == ls::colors::BLACK { '.' } else { '*' })
            .collect::<String>();
        println!("{line}");

        let last = all.get(-1)?;
        all.right(1, last);
        sleep(Duration::from_millis(100));
    }

    controller.off()?;
    Ok(())
}
