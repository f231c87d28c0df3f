//! Trace replay command.
//!
//! Builds one widget from a layout file, feeds it a recorded input trace
//! through a gesture unifier, and prints every notification the widget emits
//! along with every write that reaches the host.

use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use awww_config::{BuiltWidget, Layout};
use awww_core::PointerCapture;
use awww_widgets::{
    ControlTarget, Controlled, Layout as ViewGeometry, Mountable, ParamIndex, PluginHost, Size,
    ValueHolder, WidgetEvent, bind_parameter, bind_size,
};
use clap::Args;

use crate::trace::{TraceRecord, read_trace};

#[derive(Args)]
pub struct ReplayArgs {
    /// Layout file (TOML)
    #[arg(short, long)]
    layout: PathBuf,

    /// Trace file (JSON lines)
    #[arg(short, long)]
    trace: PathBuf,

    /// Widget id to replay against (default: first widget in the layout)
    #[arg(long)]
    id: Option<String>,

    /// Rendered widget width in pixels
    #[arg(long, default_value = "100")]
    width: f32,

    /// Rendered widget height in pixels
    #[arg(long, default_value = "100")]
    height: f32,

    /// Plugin view width in pixels (default: widget width)
    #[arg(long)]
    view_width: Option<f32>,

    /// Plugin view height in pixels (default: widget height)
    #[arg(long)]
    view_height: Option<f32>,
}

/// Replay time shared by the printing listeners.
type Clock = Rc<Cell<Duration>>;

fn emit_line(clock: &Cell<Duration>, text: impl fmt::Display) {
    println!("{:>6} ms  {}", clock.get().as_millis(), text);
}

fn describe<T>(event: &WidgetEvent<T>, show: impl Fn(&T) -> String) -> String {
    match event.value() {
        Some(value) => format!("{} {}", event.name(), show(value)),
        None => event.name().to_string(),
    }
}

fn show_size(size: &Size) -> String {
    format!("{}x{}", size.width, size.height)
}

/// Host that prints what it receives and remembers the last resize request.
struct ReplayHost {
    clock: Clock,
    requested: Cell<Option<Size>>,
}

impl ReplayHost {
    fn new(clock: Clock) -> Self {
        Self {
            clock,
            requested: Cell::new(None),
        }
    }
}

impl PluginHost for ReplayHost {
    fn begin_edit(&self, index: ParamIndex) {
        emit_line(&self.clock, format_args!("host begin_edit {index}"));
    }

    fn set_parameter(&self, index: ParamIndex, value: f32) {
        emit_line(&self.clock, format_args!("host set_parameter {index} {value}"));
    }

    fn end_edit(&self, index: ParamIndex) {
        emit_line(&self.clock, format_args!("host end_edit {index}"));
    }

    fn set_size(&self, width: f32, height: f32) {
        emit_line(&self.clock, format_args!("host set_size {width}x{height}"));
        self.requested.set(Some(Size::new(width, height)));
    }
}

/// Capture that only logs; a trace already contains the window-wide events.
struct LogCapture;

impl PointerCapture for LogCapture {
    fn acquire(&mut self) {
        tracing::debug!("pointer capture acquired");
    }

    fn release(&mut self) {
        tracing::debug!("pointer capture released");
    }
}

pub fn run(args: ReplayArgs) -> anyhow::Result<()> {
    let layout = Layout::load(&args.layout)
        .with_context(|| format!("Failed to load layout {}", args.layout.display()))?;
    let records = read_trace(&args.trace)?;
    let mut widgets = layout.build()?;

    let position = match &args.id {
        Some(id) => widgets
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| anyhow::anyhow!("No widget with id '{}' in the layout", id))?,
        None if widgets.is_empty() => anyhow::bail!("The layout has no widgets"),
        None => 0,
    };
    let built = widgets.swap_remove(position);

    let geometry = ViewGeometry::new(Size::new(args.width, args.height)).with_container(Size::new(
        args.view_width.unwrap_or(args.width),
        args.view_height.unwrap_or(args.height),
    ));
    let clock = Clock::default();
    let host = Rc::new(ReplayHost::new(Rc::clone(&clock)));

    println!(
        "Replaying {} event(s) against '{}' ({})",
        records.len(),
        built.id(),
        built.kind()
    );
    println!();

    match built {
        BuiltWidget::Knob {
            parameter,
            format,
            mut knob,
            ..
        } => {
            let sink = Rc::clone(&clock);
            knob.subscribe(move |event| emit_line(&sink, describe(event, |v| format.format(*v))));
            match parameter {
                Some(index) => {
                    bind_parameter(&mut knob, Rc::clone(&host), index);
                }
                None => tracing::info!("knob has no parameter binding, no host writes will appear"),
            }
            knob.mount(&geometry);

            let knob = replay(Controlled::new(knob, LogCapture), &records, geometry, &clock, &host);
            println!();
            println!("Final value: {}", format.format(knob.value()));
        }
        BuiltWidget::Resize { mut handle, .. } => {
            let sink = Rc::clone(&clock);
            handle.subscribe(move |event| emit_line(&sink, describe(event, show_size)));
            bind_size(&mut handle, Rc::clone(&host));
            handle.mount(&geometry);

            let handle = replay(Controlled::new(handle, LogCapture), &records, geometry, &clock, &host);
            println!();
            println!("Final size: {}", show_size(&handle.value()));
        }
    }

    Ok(())
}

/// Feeds `records` in order, ending idle wheel gestures whenever the trace
/// passes their deadline.
fn replay<W: ControlTarget>(
    mut controlled: Controlled<W, LogCapture>,
    records: &[TraceRecord],
    mut geometry: ViewGeometry,
    clock: &Cell<Duration>,
    host: &ReplayHost,
) -> W {
    let mut now = Duration::ZERO;

    for record in records {
        let at = record.at();
        if at < now {
            tracing::warn!(at_ms = record.at_ms, "trace timestamp goes backwards, keeping previous time");
        } else {
            now = at;
        }

        if let Some(deadline) = controlled.next_deadline()
            && deadline <= now
        {
            clock.set(deadline);
            controlled.poll(deadline, &geometry);
        }

        clock.set(now);
        let prevented = controlled.handle(record.event, now, &geometry);
        tracing::debug!(at_ms = record.at_ms, prevented, "event replayed");

        // The host honours resize requests immediately
        if let Some(size) = host.requested.take() {
            geometry.container = size;
        }
    }

    if let Some(deadline) = controlled.next_deadline() {
        clock.set(deadline);
        controlled.poll(deadline, &geometry);
    }
    if controlled.is_active() {
        tracing::warn!("trace ended mid-gesture, cancelling");
    }
    controlled.into_inner(&geometry)
}
