//! Widget kind listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use awww_config::WidgetKind;
use awww_core::OptionDescriptor;
use awww_widgets::{Knob, ResizeHandle};
use clap::Args;

#[derive(Args)]
pub struct WidgetsArgs {
    /// Show the options of a specific widget kind
    #[arg(value_name = "KIND")]
    kind: Option<String>,
}

fn descriptors(kind: WidgetKind) -> &'static [OptionDescriptor] {
    match kind {
        WidgetKind::Knob => Knob::descriptors(),
        WidgetKind::Resize => ResizeHandle::descriptors(),
    }
}

fn summary(kind: WidgetKind) -> &'static str {
    match kind {
        WidgetKind::Knob => "Rotary knob over a linear, log or dB range",
        WidgetKind::Resize => "Corner handle that resizes the plugin view",
    }
}

pub fn run(args: WidgetsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.kind {
        let kind = WidgetKind::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown widget kind: {}", name))?;

        println!("{}", kind);
        println!("{}", "=".repeat(kind.name().len()));
        println!();
        println!("{}", summary(kind));
        println!();
        println!("Options:");
        println!();
        println!(
            "  {:16}  {:10}  {:7}  {:8}  {}",
            "Key", "Alias", "Kind", "Default", "Description"
        );
        println!(
            "  {:16}  {:10}  {:7}  {:8}  {}",
            "---", "-----", "----", "-------", "-----------"
        );

        for desc in descriptors(kind) {
            let default = desc
                .default
                .as_ref()
                .map_or_else(String::new, ToString::to_string);
            println!(
                "  {:16}  {:10}  {:7}  {:8}  {}",
                desc.key,
                desc.aliases.join(","),
                desc.kind.label(),
                default,
                desc.description
            );
        }
        if kind == WidgetKind::Knob {
            println!();
            println!("  The 'value' attribute sets the value; malformed input falls back to min.");
        }
    } else {
        println!("Widget Kinds");
        println!("============");
        println!();

        for kind in WidgetKind::ALL {
            println!("  {:8} - {}", kind.name(), summary(kind));
        }

        println!();
        println!("Use 'awww widgets <kind>' for option details.");
    }

    Ok(())
}
