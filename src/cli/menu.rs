//! The interactive report menu.
//!
//! One selection is processed at a time. A failed report is logged and
//! shown, then the menu comes back; only startup connectivity failures are
//! fatal, and those never reach this loop.

use dialoguer::{Input, Select};
use tracing::error;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::report::{carts, connections, queries};
use crate::store::Stores;

use super::output;

pub async fn run(stores: &Stores, config: &Config) -> Result<()> {
    let mut items: Vec<String> = queries::REPORTS
        .iter()
        .map(|spec| spec.title.to_string())
        .collect();
    items.push("Most connected products (graph)".into());
    items.push("Active carts, valuated (document + relational)".into());
    items.push("Exit".into());

    let graph_index = queries::REPORTS.len();
    let carts_index = graph_index + 1;
    let exit_index = carts_index + 1;

    loop {
        let selection = Select::new()
            .with_prompt("\nChoose a report")
            .items(&items)
            .default(0)
            .interact()?;

        if selection == exit_index {
            output::note("Bye.");
            return Ok(());
        }

        let outcome = if selection == graph_index {
            connections::run(&stores.graph, config.report.top_products_limit)
                .await
                .map_err(Error::from)
        } else if selection == carts_index {
            carts::run(&stores.carts, &stores.catalog)
                .await
                .map_err(Error::from)
        } else {
            run_query_report(stores, &queries::REPORTS[selection]).await
        };

        match outcome {
            Ok(text) => {
                output::section(&items[selection]);
                println!("{text}");
            }
            Err(err) => {
                error!(error = %err, report = %items[selection], "report failed");
                output::error(&err.to_string());
            }
        }
    }
}

async fn run_query_report(stores: &Stores, spec: &queries::ReportSpec) -> Result<String> {
    let mut values = Vec::with_capacity(spec.prompts.len());
    for prompt in spec.prompts {
        let raw: String = Input::new().with_prompt(prompt.label).interact_text()?;
        values.push(queries::parse_value(prompt, &raw)?);
    }

    Ok(queries::execute(&stores.pg, spec, &values).await?)
}
