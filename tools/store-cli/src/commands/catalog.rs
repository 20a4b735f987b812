//! Catalog listing command.

use anyhow::Result;
use store_core::ProductId;

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    if let Some(id) = args.id {
        let product = catalog.find(&ProductId::new(id))?;
        if ctx.output.is_json() {
            ctx.output.json(product);
            return Ok(());
        }
        ctx.output.header(&product.name);
        ctx.output.kv("id", product.id.as_str());
        ctx.output.kv("price", &product.price.display());
        ctx.output.kv("company", product.company.as_deref().unwrap_or("-"));
        ctx.output.kv("colors", &product.colors.join(", "));
        ctx.output.kv("image", &product.image);
        if let Some(info) = &product.info {
            ctx.output.kv("info", info);
        }
        return Ok(());
    }

    ctx.output.header(&format!(
        "Catalog ({} products, {})",
        catalog.len(),
        catalog.currency()
    ));
    ctx.output.products(catalog.all());
    Ok(())
}
