use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stalag_core::core::Interrupted;
use stalag_core::device::screen::{FRAME_HEIGHT, FRAME_WIDTH};
use stalag_core::machine::Spectrum;
use stalag_core::menu::{InputDevice, MenuContext, MenuOutcome};
use tracing::{error, info, warn};

mod audio;
mod config;
mod error;
mod input;
mod keystore;
mod platform;
mod video;

use config::{FileConfig, Overrides, Settings};
use error::{FrontendError, sdl};
use platform::SdlPlatform;

#[derive(Parser, Debug)]
#[command(version, about = "Spectrum game menu: pick an input device and redefine keys")]
struct Cli {
    /// Window scale factor (1-8)
    #[arg(long)]
    scale: Option<u32>,

    /// Tempo steps per note of the menu music; lower is faster
    #[arg(long)]
    tempo: Option<u8>,

    /// Speaker volume in percent
    #[arg(long)]
    volume: Option<u8>,

    /// Settings file (default: <config dir>/stalag/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Most verbose log level shown: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            scale: self.scale,
            tempo: self.tempo,
            volume: self.volume,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), FrontendError> {
    let file = match cli.config.clone().or_else(config::default_config_path) {
        Some(path) => FileConfig::load(&path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file, &cli.overrides())?;

    let mut menu = MenuContext::with_tempo(settings.tempo);
    if let Some(path) = &settings.keys_path {
        match keystore::load(path) {
            Ok(Some(keydefs)) => menu.set_keydefs(keydefs),
            Ok(None) => {}
            Err(e) => warn!(path = %path.display(), "ignoring saved key layout: {e}"),
        }
    }

    let sdl_context = sdl2::init().map_err(sdl)?;
    let platform = SdlPlatform::new(
        &sdl_context,
        FRAME_WIDTH as u32,
        FRAME_HEIGHT as u32,
        settings.scale,
    )?;
    let mut spectrum = Spectrum::new(platform, settings.volume);

    let result = menu.menu_screen(&mut spectrum);
    spectrum.platform_mut().shutdown();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(Interrupted) => {
            info!("menu closed before the game started");
            return Ok(());
        }
    };

    report(&outcome);

    if outcome.device == InputDevice::Keyboard
        && let Some(path) = &settings.keys_path
    {
        keystore::save(path, &outcome.keydefs).map_err(|source| FrontendError::KeyStore {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}

fn report(outcome: &MenuOutcome) {
    println!("input device: {}", outcome.device.name());
    if outcome.device == InputDevice::Keyboard {
        for (action, binding) in outcome.keydefs.iter() {
            println!("{:>6}: {}", action.name(), binding.label().unwrap_or("-"));
        }
    }
}
