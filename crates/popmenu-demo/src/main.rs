#![forbid(unsafe_code)]

//! popmenu demo
//!
//! Runs one scripted menu session on a synthetic clock and prints the
//! trigger's event transcript. Logs go to stderr; set `RUST_LOG` (for
//! example `RUST_LOG=debug`) or pass `--debug` to see the structured events.
//!
//! ```sh
//! cargo run -p popmenu-demo -- --vertical bottom --row 3
//! cargo run -p popmenu-demo -- --vertical top --scroll-ticks 40 --row 8 --dump
//! ```

mod catalog;
mod script;

use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, ValueEnum};
use popmenu::{
    Alignment, ConfigError, Duration, HorizontalAlignment, Instant, MenuConfig, MenuTheme,
    MenuTrigger, PresentationBus, Rect, Theme, Title, VerticalAlignment,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::catalog::AlignmentRequest;
use crate::script::{Plan, Session};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Horizontal {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Vertical {
    Top,
    Bottom,
}

#[derive(Debug, Parser)]
#[command(name = "popmenu-demo", about = "Scripted popup menu session", version)]
struct Args {
    #[arg(long, value_enum, default_value = "center")]
    horizontal: Horizontal,

    #[arg(long, value_enum, default_value = "top")]
    vertical: Vertical,

    /// Row to release on.
    #[arg(long, default_value_t = 0)]
    row: usize,

    /// Autoscroll frames to hold in the far edge band before choosing a row.
    #[arg(long = "scroll-ticks", default_value_t = 0)]
    scroll_ticks: u32,

    /// Milliseconds from press to release.
    #[arg(long = "hold-ms", default_value_t = 500)]
    hold_ms: u64,

    /// Menu configuration (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    dark: bool,

    /// Print the display list right before release.
    #[arg(long)]
    dump: bool,

    #[arg(long)]
    debug: bool,
}

impl Args {
    fn alignment(&self) -> Alignment {
        let h = match self.horizontal {
            Horizontal::Left => HorizontalAlignment::Left,
            Horizontal::Center => HorizontalAlignment::Center,
            Horizontal::Right => HorizontalAlignment::Right,
        };
        let v = match self.vertical {
            Vertical::Top => VerticalAlignment::Top,
            Vertical::Bottom => VerticalAlignment::Bottom,
        };
        Alignment::new(h, v)
    }

    fn menu_config(&self) -> Result<MenuConfig, ConfigError> {
        match &self.config {
            Some(path) => MenuConfig::from_toml_file(path)?.validated(),
            None => Ok(MenuConfig::default()),
        }
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn,popmenu_demo=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = args.menu_config()?;
    let theme: Rc<dyn MenuTheme> = if args.dark {
        Rc::new(Theme::dark())
    } else {
        Rc::new(Theme::light())
    };

    let bus = PresentationBus::new();
    let request = AlignmentRequest::default();
    let source_request = Rc::clone(&request);
    let mut trigger = MenuTrigger::new(Title::text("Hello"), theme, &bus, config)
        .with_frame(Rect::new(160.0, 400.0, 80.0, 40.0))
        .with_alignment(args.alignment())
        .with_items(move || catalog::items(&source_request));

    tracing::info!(message = "demo.start", alignment = ?trigger.alignment(), row = args.row);

    let plan = Plan {
        row: args.row,
        scroll_ticks: args.scroll_ticks,
        hold: Duration::from_millis(args.hold_ms),
    };
    let dump = args.dump;
    let transcript = Session::new(&mut trigger, Instant::now())
        .on_release(move |t| {
            if dump {
                print_display_list(t);
            }
        })
        .run(plan);

    for entry in &transcript {
        println!("{:>6} ms  {:?}", entry.at.as_millis(), entry.event);
    }

    if let Some(alignment) = request.take() {
        trigger.set_alignment(alignment);
        println!("alignment -> {:?} / {:?}", alignment.horizontal, alignment.vertical);
    }
    Ok(())
}

fn print_display_list(trigger: &MenuTrigger) {
    let list = trigger.display_list();
    println!("display list ({} commands):", list.len());
    for command in &list {
        println!("  {command:?}");
    }
}
