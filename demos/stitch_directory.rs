//! Stitch a directory of PNG tiles using a JSON block registry.
//!
//! Usage: stitch_directory <texture_dir> <registry.json> [config.toml] [out.png]

use hearth_stitcher::renderer::texture_atlas_operations::save_debug;
use hearth_stitcher::stitch::{create_stitcher, events, stitch_blocking};
use hearth_stitcher::world::core::registry_operations::{get_registrations, load_registry_json};
use hearth_stitcher::{
    DirectoryImageSource, ErrorContext, MemoryTextureSink, StitchEvent, StitchResult,
    StitcherConfig,
};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("[stitch_directory] {}", e);
        std::process::exit(1);
    }
}

fn run() -> StitchResult<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <texture_dir> <registry.json> [config.toml] [out.png]", args[0]);
        std::process::exit(2);
    }

    let registry_json = std::fs::read_to_string(&args[2])
        .with_context(|| format!("reading registry {}", args[2]))?;
    let registry = load_registry_json(&registry_json)?;
    log::info!(
        "[stitch_directory] Loaded {} blocks from {}",
        get_registrations(&registry).len(),
        args[2]
    );

    let config = match args.get(3) {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path))?;
            StitcherConfig::from_toml_str(&source)?
        }
        None => StitcherConfig::default(),
    };

    let mut stitcher = create_stitcher(config)?;
    let receiver = events(&mut stitcher);
    let source = DirectoryImageSource::new(&args[1]);
    let mut sink = MemoryTextureSink::new();

    let report = stitch_blocking(&mut stitcher, &registry, &source, &mut sink)?;
    for event in receiver.try_iter() {
        if let StitchEvent::Added { name, node } = event {
            log::debug!("[stitch_directory] {} at ({}, {})", name, node.x, node.y);
        }
    }

    println!(
        "stitched {} textures into {} mip levels ({:.1}% used)",
        report.count_loaded, report.mip_levels, report.utilization
    );

    let out = args.get(4).map(String::as_str).unwrap_or("atlas.png");
    save_debug(&stitcher.atlas, out)
}
