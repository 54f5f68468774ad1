//! Campaign Builder — command-line access to funnel metrics and draft review.

use anyhow::Context;
use campaign_core::config::AppConfig;
use campaign_management::CampaignDraft;
use campaign_reporting::{FunnelAnalyzer, FunnelDefinition, FunnelStep};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-builder")]
#[command(about = "Campaign draft review and funnel conversion metrics")]
#[command(version)]
struct Cli {
    /// Decimal places for funnel percentages (overrides config)
    #[arg(long, env = "CAMPAIGN_BUILDER__FUNNEL__PRECISION")]
    precision: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute conversion and drop-off rates for an ordered funnel
    Funnel {
        /// Funnel name shown in the report
        #[arg(long, default_value = "funnel")]
        name: String,

        /// Step as EVENT=COUNT, in funnel order (repeatable)
        #[arg(long = "step", value_parser = parse_step, required = true)]
        steps: Vec<FunnelStep>,
    },
    /// Review a campaign draft JSON document
    Review {
        /// Path to the draft document
        path: PathBuf,
    },
}

fn parse_step(raw: &str) -> Result<FunnelStep, String> {
    let (event, count) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected EVENT=COUNT, got '{raw}'"))?;
    let count = count
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid count in '{raw}': {e}"))?;
    Ok(FunnelStep::new(event.trim(), count))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_builder=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(precision) = cli.precision {
        config.funnel.precision = precision;
    }

    match cli.command {
        Command::Funnel { name, steps } => {
            let analyzer = FunnelAnalyzer::new(&config.funnel);
            let funnel = FunnelDefinition::new(name, steps);
            let funnel_id = funnel.id;
            analyzer.define_funnel(funnel);
            let report = analyzer
                .analyze(&funnel_id)
                .context("funnel disappeared before analysis")?;
            info!(steps = report.steps.len(), "Funnel computed");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Review { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let draft: CampaignDraft = serde_json::from_str(&raw)
                .with_context(|| format!("parsing draft {}", path.display()))?;
            let review = draft.review();
            println!("{}", serde_json::to_string_pretty(&review)?);
            if !review.can_launch {
                warn!(issues = ?review.issues, "Draft cannot be launched");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step() {
        let step = parse_step("Opened=400").unwrap();
        assert_eq!(step.event, "Opened");
        assert_eq!(step.count, 400);

        let step = parse_step(" Added to cart = 12 ").unwrap();
        assert_eq!(step.event, "Added to cart");
        assert_eq!(step.count, 12);
    }

    #[test]
    fn test_parse_step_event_containing_equals() {
        let step = parse_step("utm_source=email=250").unwrap();
        assert_eq!(step.event, "utm_source=email");
        assert_eq!(step.count, 250);
    }

    #[test]
    fn test_parse_step_rejects_malformed_input() {
        assert!(parse_step("Clicked").unwrap_err().contains("EVENT=COUNT"));
        assert!(parse_step("Clicked=many").unwrap_err().contains("invalid count"));
        assert!(parse_step("Clicked=-3").is_err());
    }

    #[test]
    fn test_cli_collects_steps_in_order() {
        let cli = Cli::try_parse_from([
            "campaign-builder",
            "--precision",
            "2",
            "funnel",
            "--step",
            "Sent=1000",
            "--step",
            "Opened=400",
        ])
        .unwrap();
        assert_eq!(cli.precision, Some(2));
        match cli.command {
            Command::Funnel { name, steps } => {
                assert_eq!(name, "funnel");
                let events: Vec<&str> = steps.iter().map(|s| s.event.as_str()).collect();
                assert_eq!(events, vec!["Sent", "Opened"]);
            }
            Command::Review { .. } => panic!("expected funnel command"),
        }
    }
}
