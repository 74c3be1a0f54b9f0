//! Catalog browsing.

use anyhow::Result;
use shopfront_commerce::catalog::{CatalogStore, Product};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.id {
        Some(id) => show_product(&id, ctx),
        None => list_products(args.category.as_deref(), ctx),
    }
}

fn list_products(category: Option<&str>, ctx: &Context) -> Result<()> {
    let products: Vec<Product> = ctx
        .catalog()?
        .list_products()
        .into_iter()
        .filter(|p| match category {
            Some(wanted) => p
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
            None => true,
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Products");
    if products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "PRICE", "STOCK"], &[4, 36, 10, 0]);
    for product in &products {
        let name = truncate(&product.name, 36);
        let price = product.price.to_string();
        let stock = stock_badge(product.stock);
        ctx.output
            .table_row(&[product.id.as_str(), &name, &price, &stock], &[4, 36, 10, 0]);
    }
    Ok(())
}

fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let product = ctx.product(id)?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.to_string());
    ctx.output.kv("Stock", &stock_badge(product.stock));
    if let Some(category) = &product.category {
        ctx.output.kv("Category", category);
    }
    if let Some(description) = &product.description {
        ctx.output.kv("Description", description);
    }
    Ok(())
}
