#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Lane Defence experience.

use anyhow::Result;
use clap::Parser;
use lane_defence_engine::EngineConfig;
use lane_defence_rendering::{Color, Presentation};
use lane_defence_rendering_macroquad::MacroquadBackend;
use tracing_subscriber::filter::EnvFilter;

const WINDOW_TITLE: &str = "Lane Defence";

/// Command-line arguments accepted by the Lane Defence binary.
#[derive(Debug, Parser)]
#[command(name = "lane-defence")]
#[command(about = "Defend five lanes against waves of attackers")]
struct Args {
    /// Seed for attacker and resource-drop generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Render as fast as possible instead of synchronising with the display.
    #[arg(long)]
    no_vsync: bool,

    /// Log frame-rate metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Log filter directive, e.g. `lane_defence_engine=debug`; overrides `RUST_LOG`.
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.seed.unwrap_or_else(rand::random))
    }
}

fn log_filter(directive: Option<&str>) -> EnvFilter {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    };
    filter.unwrap_or_else(|| EnvFilter::new("info"))
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.log_filter.as_deref()))
        .init();

    let config = args.engine_config();
    tracing::info!(seed = config.seed(), "starting Lane Defence");

    let presentation = Presentation::new(WINDOW_TITLE, Color::from_rgb_u8(0x1e, 0x16, 0x0e));
    MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .run(presentation, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seed_is_forwarded() {
        let args = Args::try_parse_from(["lane-defence", "--seed", "42"]).expect("valid args");
        assert_eq!(args.engine_config().seed(), 42);
        assert!(!args.no_vsync);
        assert!(args.log_filter.is_none());
    }

    #[test]
    fn flags_are_parsed() {
        let args = Args::try_parse_from([
            "lane-defence",
            "--no-vsync",
            "--show-fps",
            "--log-filter",
            "lane_defence_world=debug",
        ])
        .expect("valid args");
        assert!(args.no_vsync);
        assert!(args.show_fps);
        assert_eq!(args.log_filter.as_deref(), Some("lane_defence_world=debug"));
        assert!(args.seed.is_none());
    }

    #[test]
    fn explicit_directive_is_used() {
        let filter = log_filter(Some("lane_defence_world=debug"));
        assert!(filter.to_string().contains("lane_defence_world=debug"));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Args::try_parse_from(["lane-defence", "--endless"]).is_err());
    }
}
