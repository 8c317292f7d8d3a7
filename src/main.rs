use clap::{Parser, Subcommand};
use restyle::imaging::{AspectRatio, RustBackend, normalize_upload};
use restyle::session::Session;
use restyle::types::{EncodedImage, ImageMime};
use restyle::{config, generate, output, presets};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "restyle")]
#[command(about = "Generate AI image variants from your own photos")]
#[command(long_about = "\
Generate AI image variants from your own photos

Uploads are normalized locally (resized so the longer edge fits the
configured bound, then center-cropped to the chosen aspect ratio) before
being sent to the generation service together with a composed prompt.

Typical run:

  restyle generate \\
      --image portrait.jpg \\
      --prompt \"move the subject to a rainy street\" \\
      --style cinematic \\
      --aspect-ratio 4:5 \\
      --count 3

Run 'restyle presets' to list styles, options, ratios, and counts.
Run 'restyle gen-config' to print a documented restyle.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./restyle.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Main image (png, jpeg, or webp)
    #[arg(long)]
    image: PathBuf,

    /// Optional reference image
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Free-text request
    #[arg(long, default_value = "")]
    prompt: String,

    /// Style preset to append (repeatable; see 'restyle presets')
    #[arg(long = "style")]
    styles: Vec<String>,

    /// Generation option id to enable (repeatable, at most two active)
    #[arg(long = "option")]
    options: Vec<String>,

    /// Target aspect ratio as W:H
    #[arg(long, default_value = "9:16")]
    aspect_ratio: String,

    /// Number of variants to request (1-4)
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Creativity level, 0-100
    #[arg(long, default_value_t = 50)]
    creativity: u8,

    /// Generation seed (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Directory for the generated variants
    #[arg(long, default_value = "variants")]
    out_dir: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize images, call the generation service, save the variants
    Generate(GenerateArgs),
    /// List style presets, generation options, aspect ratios, and counts
    Presets,
    /// Print a stock restyle.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(cli.config.as_deref(), args).await,
        Command::Presets => {
            print_presets();
            Ok(())
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
    }
}

async fn run_generate(
    config_path: Option<&Path>,
    args: GenerateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let service_config = config::load(config_path)?;
    let api_key = service_config.require_api_key()?;
    let backend = RustBackend::new();

    let mut session = Session::new();
    session.set_main_image(load_upload(&backend, &args.image, service_config.max_dimension)?);
    if let Some(reference) = &args.reference {
        session.set_reference_image(load_upload(&backend, reference, service_config.max_dimension)?);
    }

    session.set_prompt(args.prompt);
    for name in &args.styles {
        let preset = presets::style_preset(name)
            .ok_or_else(|| format!("unknown style {name:?}; run 'restyle presets'"))?;
        session.append_style(preset);
    }

    // The stock session starts with multi-pose on; explicit --option flags
    // replace the defaults rather than stack on top of them
    if !args.options.is_empty() {
        for option in presets::GENERATION_OPTIONS {
            session.set_option(option.id, false);
        }
        for id in &args.options {
            if presets::generation_option(id).is_none() {
                return Err(format!("unknown option {id:?}; run 'restyle presets'").into());
            }
            if !session.set_option(id, true) {
                eprintln!("ignoring --option {id}: at most two options may be active");
            }
        }
    }

    session.set_aspect_ratio(args.aspect_ratio.parse::<AspectRatio>()?);
    session.set_count(args.count);
    session.set_creativity(args.creativity);
    if let Some(seed) = args.seed {
        session.set_seed(seed);
    }

    let request = session.prepare_request(&backend)?;
    println!(
        "==> Requesting {} variant(s) at {} (seed {})",
        request.count,
        session.aspect_ratio(),
        session.seed()
    );

    let client = generate::GeminiClient::new(&service_config, api_key);
    let variants = generate::generate_batch(&client, &request).await?;
    session.set_results(variants);

    let paths = output::save_variants(&args.out_dir, session.results())?;
    output::print_generation_summary(session.results(), &paths);
    println!("==> Done: {}", args.out_dir.display());
    Ok(())
}

/// Read an image file and normalize it into pipeline shape.
fn load_upload(
    backend: &RustBackend,
    path: &Path,
    max_dimension: u32,
) -> Result<EncodedImage, Box<dyn std::error::Error>> {
    let mime = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ImageMime::from_extension)
        .ok_or_else(|| {
            format!(
                "unsupported image type: {} (expected png, jpeg, or webp)",
                path.display()
            )
        })?;

    let bytes = std::fs::read(path)?;
    let normalized = normalize_upload(backend, &bytes, mime, max_dimension)?;
    log::info!(
        "loaded {} as {}x{}",
        path.display(),
        normalized.width,
        normalized.height
    );
    Ok(normalized)
}

fn print_presets() {
    println!("Styles");
    for preset in presets::STYLE_PRESETS {
        println!("{:>14}  {}", preset.name, preset.prompt);
    }

    println!("\nOptions (at most two active)");
    for option in presets::GENERATION_OPTIONS {
        println!("{:>14}  {}", option.id, option.description);
    }

    println!("\nAspect ratios");
    println!("    {}", presets::ASPECT_RATIOS.join(", "));

    println!("\nVariant counts");
    let counts: Vec<String> = presets::VARIANT_COUNTS.iter().map(u32::to_string).collect();
    println!("    {}", counts.join(", "));
}
