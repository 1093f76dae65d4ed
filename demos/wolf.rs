//! Wolf Mascot Example
//!
//! Opens a window with the low-poly wolf head. Move the cursor over the
//! window and the head turns to follow it.
//!
//! An optional JSON file with settings overrides can be passed as the first
//! argument:
//!
//! ```text
//! cargo run --example wolf -- settings.json
//! ```

use howl::app::winit::App;
use howl::MascotSettings;

fn main() -> anyhow::Result<()> {
    howl::init_logging();

    let settings = match std::env::args().nth(1) {
        Some(path) => MascotSettings::from_json(&std::fs::read_to_string(path)?)?,
        None => MascotSettings::default(),
    };

    App::new(settings).run()?;
    Ok(())
}
