//! Connectivity diagnostics: ping each store and report per-store status.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{mongo, neo4j, postgres};

use super::output;

pub async fn run(config: &Config) -> Result<()> {
    output::section("Store connectivity");

    let mut failed = false;

    match ping_postgres(config).await {
        Ok(()) => output::ok("postgres reachable"),
        Err(err) => {
            failed = true;
            output::error(&err.to_string());
        }
    }

    match ping_mongo(config).await {
        Ok(()) => output::ok("mongodb reachable"),
        Err(err) => {
            failed = true;
            output::error(&err.to_string());
        }
    }

    match ping_neo4j(config).await {
        Ok(()) => output::ok("neo4j reachable"),
        Err(err) => {
            failed = true;
            output::error(&err.to_string());
        }
    }

    if failed {
        return Err(Error::CheckFailed);
    }

    output::note(&output::highlight("\nAll stores reachable."));
    Ok(())
}

async fn ping_postgres(config: &Config) -> Result<()> {
    let pool = postgres::connect(&config.stores.postgres_url).await?;
    postgres::ping(&pool).await?;
    pool.close().await;
    Ok(())
}

async fn ping_mongo(config: &Config) -> Result<()> {
    let client = mongo::connect(&config.stores.mongo_uri).await?;
    mongo::ping(&client).await?;
    client.shutdown().await;
    Ok(())
}

async fn ping_neo4j(config: &Config) -> Result<()> {
    let graph = neo4j::Neo4jGraph::connect(
        &config.stores.neo4j_uri,
        &config.stores.neo4j_user,
        &config.stores.neo4j_password,
        &config.graph.database,
    )
    .await?;
    graph.ping().await?;
    Ok(())
}
