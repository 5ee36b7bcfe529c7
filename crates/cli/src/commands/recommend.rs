//! Discount suggestions across every product for one (day, weather).
//!
//! Output mirrors the original offers screen: suggested products with the
//! prediction and the day's historical average, or an all-clear message.

use anyhow::Context;

use crumbcast_forecast::RecommendPolicy;
use crumbcast_store::ArtifactStore;

use crate::RecommendArgs;

pub fn run(args: RecommendArgs) -> anyhow::Result<()> {
    let context = ArtifactStore::new(&args.models)
        .load()
        .context("loading artifacts")?;

    let policy = RecommendPolicy {
        threshold_ratio: args.threshold,
        min_samples: args.min_samples,
    };
    let recommendations = context.recommend_all(&args.day, &args.weather, &policy)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    let suggested: Vec<_> = recommendations.iter().filter(|r| r.discount).collect();
    if suggested.is_empty() {
        println!(
            "No significant drop in projected sales for {} ({}). No discounts needed.",
            args.day, args.weather
        );
        return Ok(());
    }

    println!("Discount suggestions for {} ({}):", args.day, args.weather);
    for rec in suggested {
        println!(
            "  {}: predicted {} units vs historical average {} for {}",
            rec.product.display_name(),
            rec.predicted,
            rec.historical_average,
            args.day
        );
    }
    Ok(())
}
