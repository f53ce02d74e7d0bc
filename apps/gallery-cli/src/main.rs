use clap::{Args, Parser, Subcommand};
use gallery_assets::TextureManifest;
use gallery_common::config::{WINDOW_HEIGHT, WINDOW_WIDTH, aspect_ratio};
use gallery_input::{InputSampler, Key, RawInput};
use gallery_kernel::Walkthrough;
use gallery_render::{DebugTextRenderer, FrameView, Renderer, RoomMesh, Surface};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gallery-cli", about = "Headless tooling for the gallery walkthrough")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Dump the room mesh surface by surface
    Room,
    /// Drive the camera headlessly with scripted input
    Walk(WalkArgs),
    /// Report gallery textures missing from an asset directory
    CheckAssets {
        /// Directory holding the gallery textures
        #[arg(long, default_value = "./assets")]
        assets: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
struct WalkArgs {
    /// Number of frames to simulate
    #[arg(short, long, default_value = "60")]
    frames: u32,
    /// Seconds per frame
    #[arg(long, default_value = "0.016")]
    dt: f64,
    /// Movement keys held for the whole walk, e.g. "wd"
    #[arg(short, long, default_value = "")]
    keys: String,
    /// Cursor travel per frame in screen pixels (right positive)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    look_dx: f64,
    /// Cursor travel per frame in screen pixels (down positive)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    look_dy: f64,
    /// Scroll applied on the first frame (positive narrows the view)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    scroll: f64,
    /// Print the final camera as JSON
    #[arg(long)]
    json: bool,
}

/// Run the desktop frame pipeline with synthetic input.
fn run_walk(args: &WalkArgs) -> Walkthrough {
    let mut raw = RawInput::with_origin(WINDOW_WIDTH as f64 / 2.0, WINDOW_HEIGHT as f64 / 2.0);
    for c in args.keys.chars() {
        match Key::from_char(c) {
            Some(key) => raw.press(key),
            None => tracing::warn!("ignoring unknown key {c:?}"),
        }
    }

    let mut sampler = InputSampler::new();
    let mut walk = Walkthrough::default();
    for frame in 0..args.frames {
        raw.move_cursor_by(args.look_dx, args.look_dy);
        if frame == 0 {
            raw.add_scroll(args.scroll);
        }
        let sample = sampler.sample(&mut raw, frame as f64 * args.dt);
        if sample.exit_requested {
            break;
        }
        walk.step(&sample);
    }
    walk
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gallery-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", gallery_common::crate_info());
            println!("input: {}", gallery_input::crate_info());
            println!("render: {}", gallery_render::crate_info());
            println!("assets: {}", gallery_assets::crate_info());
        }
        Commands::Room => {
            let mesh = RoomMesh::gallery();
            println!(
                "Room: {} vertices, {} indices",
                mesh.vertices.len(),
                mesh.indices.len()
            );
            for surface in Surface::ALL {
                let range = mesh.surface_range(surface);
                let vertices = mesh.vertices_of(surface);
                let first = mesh.indices[range.start as usize];
                let normal = vertices[0].normal;
                println!(
                    "  {:<10} vertices {:>2}..{:<2} indices {:>2}..{:<2} normal ({:.0}, {:.0}, {:.0})",
                    surface.name(),
                    first,
                    first as usize + vertices.len(),
                    range.start,
                    range.end,
                    normal[0],
                    normal[1],
                    normal[2]
                );
            }
        }
        Commands::Walk(args) => {
            let walk = run_walk(&args);
            if args.json {
                println!("{}", serde_json::to_string_pretty(walk.camera())?);
            } else {
                let frame = FrameView::from_camera(walk.camera(), aspect_ratio());
                print!("{}", DebugTextRenderer::new().render(&frame));
            }
        }
        Commands::CheckAssets { assets } => {
            let manifest = TextureManifest::gallery(&assets);
            let missing = manifest.missing();
            println!(
                "{}: {}/{} textures present",
                assets.display(),
                manifest.len() - missing.len(),
                manifest.len()
            );
            for path in &missing {
                println!("  missing {}", path.display());
            }
            if !missing.is_empty() {
                anyhow::bail!("{} textures missing", missing.len());
            }
        }
    }

    Ok(())
}
