use std::thread::sleep;
use std::time::Duration;

use light_show as ls;
use light_show::controller::{ControllerConfig, StripType};
use light_show::{LedPixels, Render};

fn main() -> ls::Result<()> {
    env_logger::init();

    let controller = ls::MemoryController::new(ControllerConfig::single(18, 30, StripType::Grb))?;
    let strip = controller.strip(0)?;

    for start in 0..strip.len() {
        strip.paint(ls::palette::Rainbow::new(strip.len(), start, 0.5));
        controller.render(true)?;
        println!("{:?}", strip.get(0)?);
        sleep(Duration::from_millis(50));
    }

    Ok(())
}
