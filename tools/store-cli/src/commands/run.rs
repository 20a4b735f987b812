//! Script execution command.

use std::io::Read;

use anyhow::{bail, Context as _, Result};
use store_core::cart::{CartController, CartSnapshot};

use super::RunArgs;
use crate::context::Context;
use crate::output::Output;
use crate::script::{parse_script, ScriptLine};

/// Run the run command.
pub fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let source = read_script(&args.script, ctx)?;
    let lines = parse_script(&source)?;

    let mut cart = ctx.controller()?;
    ctx.output.debug(&format!(
        "{} products, {} operations",
        cart.products().len(),
        lines.len()
    ));

    let printer = ctx.output.clone();
    cart.subscribe(move |snapshot: &CartSnapshot| printer.snapshot(snapshot));

    let failures = apply_lines(&lines, &mut cart, args.keep_going, &ctx.output)?;
    if failures > 0 {
        bail!("{} of {} operations failed", failures, lines.len());
    }
    ctx.output.success(&format!("{} operations applied", lines.len()));
    Ok(())
}

/// Apply parsed lines in order and return how many failed.
///
/// Without `keep_going` the first failure aborts with its line number.
fn apply_lines(
    lines: &[ScriptLine],
    cart: &mut CartController,
    keep_going: bool,
    output: &Output,
) -> Result<usize> {
    let mut failures = 0;
    for line in lines {
        output.header(&format!("{}: {:?}", line.number, line.op));

        match line.op.apply(cart) {
            Ok(snapshot) if line.op.is_read_only() => output.snapshot(&snapshot),
            // Mutations are printed by the subscribed observer.
            Ok(_) => {}
            Err(e) if keep_going => {
                failures += 1;
                output.warn(&format!("line {}: {}", line.number, e));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("line {}: {:?}", line.number, line.op));
            }
        }
    }
    Ok(failures)
}

fn read_script(path: &str, ctx: &Context) -> Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read script from stdin")?;
        return Ok(source);
    }

    let path = ctx.resolve_path(path);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read script: {}", path.display()))
}
