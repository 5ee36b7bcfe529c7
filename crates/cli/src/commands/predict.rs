//! Single-product demand prediction.

use anyhow::Context;

use crumbcast_core::Product;
use crumbcast_store::ArtifactStore;

use crate::PredictArgs;

pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    let product: Product = args.product.parse()?;
    let context = ArtifactStore::new(&args.models)
        .load()
        .context("loading artifacts")?;

    let quantity = context.predict(product, &args.day, &args.weather)?;
    println!(
        "Predicted demand for {} on {} ({}): {} units",
        product.display_name(),
        args.day,
        args.weather,
        quantity
    );
    Ok(())
}
