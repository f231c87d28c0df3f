//! Scale conversion command.

use awww_core::{Scale, ValueRange, clamp_normalized};
use clap::Args;

#[derive(Args)]
pub struct ScaleArgs {
    /// Scale name (linear, log, db)
    #[arg(short, long, default_value = "linear")]
    scale: String,

    /// Lower bound of the domain
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    min: f32,

    /// Upper bound of the domain
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    max: f32,

    /// Treat inputs as normalized positions and print domain values
    #[arg(short, long)]
    normalized: bool,

    /// Values to convert
    #[arg(required = true, allow_hyphen_values = true)]
    values: Vec<f32>,
}

pub fn run(args: ScaleArgs) -> anyhow::Result<()> {
    let scale = Scale::from_name(&args.scale)
        .ok_or_else(|| anyhow::anyhow!("Unknown scale: {} (expected linear, log or db)", args.scale))?;
    let range = ValueRange::new(args.min, args.max).with_scale(scale);

    tracing::debug!(%scale, min = args.min, max = args.max, "converting values");

    for value in args.values {
        // Inputs are clamped the way widgets clamp external values
        let converted = if args.normalized {
            range.denormalize(clamp_normalized(value))
        } else {
            range.normalize(range.clamp(value))
        };
        println!("{value} -> {converted:.6}");
    }

    Ok(())
}
