use std::path::PathBuf;

use clap::Parser;
use jiff::Timestamp;

use crate::config::{DEFAULT_PANEL_SIZE, DEFAULT_SCALE, MAX_PANEL_SIZE, MIN_PANEL_SIZE};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Analog clock panel")]
pub struct ClockOptions {
    /// settings file (default: $XDG_CONFIG_HOME/analog-clock/clock.rc)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// panel width in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_PANEL_SIZE,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_PANEL_SIZE)..=i64::from(MAX_PANEL_SIZE)),
    )]
    pub size: u32,
    /// window scale factor
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..=8))]
    pub scale: u32,
    /// time zone, overrides the settings file for this run
    #[arg(long)]
    pub timezone: Option<String>,
    /// freeze the clock at this instant, e.g. 2023-06-15T03:30:00Z
    #[arg(long)]
    pub at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClockOptions::parse_from(["analog-clock"]);
        assert_eq!(options.size, DEFAULT_PANEL_SIZE);
        assert_eq!(options.scale, DEFAULT_SCALE);
        assert!(options.config.is_none());
        assert!(options.at.is_none());
    }

    #[test]
    fn test_all_flags() {
        let options = ClockOptions::parse_from([
            "analog-clock",
            "--config",
            "/tmp/clock.rc",
            "--size",
            "200",
            "--scale",
            "3",
            "--timezone",
            "Asia/Tokyo",
            "--at",
            "2023-06-15T03:30:00Z",
        ]);
        assert_eq!(options.config, Some(PathBuf::from("/tmp/clock.rc")));
        assert_eq!(options.size, 200);
        assert_eq!(options.scale, 3);
        assert_eq!(options.timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(options.at, Some("2023-06-15T03:30:00Z".parse().unwrap()));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        assert!(ClockOptions::try_parse_from(["analog-clock", "--at", "yesterday"]).is_err());
    }

    #[test]
    fn test_size_range() {
        assert!(ClockOptions::try_parse_from(["analog-clock", "--size", "4294967295"]).is_err(), "Huge sizes are rejected");
        assert!(ClockOptions::try_parse_from(["analog-clock", "--size", "8"]).is_err(), "Sizes below the minimum are rejected");
        let max = MAX_PANEL_SIZE.to_string();
        let options = ClockOptions::parse_from(["analog-clock", "--size", max.as_str()]);
        assert_eq!(options.size, MAX_PANEL_SIZE);
    }

    #[test]
    fn test_scale_range() {
        assert!(ClockOptions::try_parse_from(["analog-clock", "--scale", "0"]).is_err());
    }
}
