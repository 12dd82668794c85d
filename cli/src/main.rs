use clap::Parser;
use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use dae_oxide::prelude::{Options, Preset, SceneModel};

#[derive(Parser)]
#[command(name = "dae-cli")]
#[command(about = "Dumps the flattened vertex arrays of a COLLADA (.dae) file")]
struct Cli {
    /// Input .dae file path
    input: String,

    /// Use vertex indices (reserved; arrays are always written without them)
    #[arg(long, overrides_with = "no_index")]
    index: bool,

    /// Do not use vertex indices
    #[arg(long = "no-index")]
    no_index: bool,

    /// Flip the X axis
    #[arg(short = 'x')]
    flip_x: bool,

    /// Flip the Y axis
    #[arg(short = 'y')]
    flip_y: bool,

    /// Flip the Z axis
    #[arg(short = 'z')]
    flip_z: bool,

    /// Flip the V texture coordinate (default)
    #[arg(long, overrides_with = "no_vflip")]
    vflip: bool,

    /// Keep the V texture coordinate as authored
    #[arg(long = "no-vflip")]
    no_vflip: bool,

    /// Synthesize vertex colors from material diffuse when none are authored
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Do not synthesize vertex colors
    #[arg(long = "no-color")]
    no_color: bool,

    /// Write vertex colors as packed 0xAARRGGBB values
    #[arg(long)]
    hexcolor: bool,

    /// Widen vertex colors to RGBA
    #[arg(long)]
    alpha: bool,

    /// Write JSON instead of the raw text dump
    #[arg(long)]
    json: bool,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Target DXRuby: no indices, flipped V, colors from materials, packed colors
    #[arg(long)]
    dxruby: bool,

    /// Dump the decoded source and polygon list tables
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn to_options(&self) -> Options {
        let sign = |flip: bool| if flip { -1.0 } else { 1.0 };
        Options {
            use_index: !self.no_index,
            force_vertex_color_from_material: self.color && !self.no_color,
            v_flip: !self.no_vflip,
            z_flip: false,
            axis_sign_multiplier: [sign(self.flip_x), sign(self.flip_y), sign(self.flip_z)],
            hex_color_output: self.hexcolor,
            append_alpha_channel: self.alpha,
            preset: if self.dxruby { Preset::DxRuby } else { Preset::None },
            debug_dump: self.debug,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let is_dae = Path::new(&cli.input)
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dae"));
    if !is_dae {
        anyhow::bail!("Input file must be a .dae file: {}", cli.input);
    }

    let options = cli.to_options();
    tracing::debug!("options {:?}", options);
    let scene = dae_oxide::io::dae::load_dae(&cli.input, &options)
        .with_context(|| format!("Failed to load {}", cli.input))?;

    if scene.get_config().is_debug_dump() {
        dump_tables(&scene)
    } else if cli.json {
        println!("{}", scene.to_json(cli.pretty)?);
        Ok(())
    } else {
        print!("{}", scene.to_raw());
        Ok(())
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dump_tables(scene: &SceneModel) -> Result<()> {
    println!("# source");
    println!("# {}", "-".repeat(40));
    println!("{}", scene.dump_sources_json(true)?);
    println!();
    println!("# polylist");
    println!("# {}", "-".repeat(40));
    println!("{}", scene.dump_polylists_json(true)?);
    println!();
    println!("# faces {}, vertices {}", scene.face_count(), scene.vertex_count());
    for range in scene.material_ranges() {
        println!("# {}: first {}, count {}, faces {}", range.material, range.first, range.count, range.face_count);
    }
    Ok(())
}
