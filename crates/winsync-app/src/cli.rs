use clap::Parser;

/// winsync: join a shared window set and keep it in sync.
#[derive(Parser, Debug)]
#[command(name = "winsync", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter directive override (e.g. `winsync=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Medium directory override (file medium only).
    #[arg(short = 'd', long)]
    pub directory: Option<String>,

    /// Use an in-process memory medium instead of the configured one.
    #[arg(long)]
    pub memory: bool,

    /// Number of participants to run in this process.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub participants: usize,

    /// Metadata attached to every participant, as JSON.
    #[arg(long)]
    pub meta: Option<String>,

    /// Initial window x position.
    #[arg(long, default_value_t = 0.0)]
    pub x: f64,

    /// Initial window y position.
    #[arg(long, default_value_t = 0.0)]
    pub y: f64,

    /// Window width.
    #[arg(long, default_value_t = 400.0)]
    pub width: f64,

    /// Window height.
    #[arg(long, default_value_t = 300.0)]
    pub height: f64,

    /// Pixels to move along x on every tick, simulating a dragged window.
    #[arg(long, default_value_t = 0.0)]
    pub drift: f64,

    /// Stop (and depart) after this many ticks instead of waiting for Ctrl-C.
    #[arg(long)]
    pub ticks: Option<u64>,
}

pub fn parse() -> Args {
    Args::parse()
}
