use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use marketlens::config::Config;
use marketlens::error::{ConfigError, Error};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("marketlens-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

fn set_store_env() {
    std::env::set_var("DATABASE_URL", "postgres://localhost/commerce");
    std::env::set_var("MONGO_URI", "mongodb://localhost:27017");
    std::env::set_var("NEO4J_URI", "neo4j://localhost:7687");
    std::env::set_var("NEO4J_USER", "neo4j");
    std::env::set_var("NEO4J_PASSWORD", "secret");
}

// Environment mutation is process-global, so everything that touches the
// store variables lives in this single test.
#[test]
fn config_loading_and_validation() {
    set_store_env();

    // Missing file: defaults apply, env still required.
    let config = Config::load("/definitely/not/here/config.toml").expect("defaults");
    assert_eq!(config.mongo.database, "commerce");
    assert_eq!(config.mongo.cart_collection, "carts");
    assert_eq!(config.graph.database, "neo4j");
    assert_eq!(config.report.top_products_limit, 10);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.stores.postgres_url, "postgres://localhost/commerce");

    // File overrides.
    let path = write_temp_config(
        r#"
[mongo]
database = "shop"
cart_collection = "baskets"

[report]
top_products_limit = 3

[logging]
level = "debug"
format = "json"
"#,
    );
    let config = Config::load(&path).expect("valid config");
    let _ = fs::remove_file(&path);
    assert_eq!(config.mongo.database, "shop");
    assert_eq!(config.mongo.cart_collection, "baskets");
    assert_eq!(config.report.top_products_limit, 3);
    assert_eq!(config.logging.format, "json");

    // Invalid report limit is rejected.
    let path = write_temp_config("[report]\ntop_products_limit = 0\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);
    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "report.top_products_limit",
            ..
        })) => {}
        other => panic!("expected invalid limit rejection, got {other:?}"),
    }

    // Unknown logging format is rejected.
    let path = write_temp_config("[logging]\nformat = \"xml\"\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);
    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "logging.format",
            ..
        })) => {}
        other => panic!("expected invalid format rejection, got {other:?}"),
    }

    // Unparseable TOML is rejected before the environment is consulted.
    let path = write_temp_config("not toml at all [");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));

    // A missing connection variable is fatal.
    std::env::remove_var("MONGO_URI");
    let result = Config::load("/definitely/not/here/config.toml");
    match result {
        Err(Error::Config(ConfigError::MissingEnv { name: "MONGO_URI" })) => {}
        other => panic!("expected missing env rejection, got {other:?}"),
    }
    std::env::set_var("MONGO_URI", "mongodb://localhost:27017");
}
