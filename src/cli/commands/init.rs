use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::{Entity, Store};

pub async fn handle(store: &Store, force: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    store.migrate(force).await?;

    let tables: Vec<&str> = Entity::ALL.iter().map(|e| e.table()).collect();
    let text = if force {
        format!("Recreated tables: {}", tables.join(", "))
    } else {
        format!("Tables ready: {}", tables.join(", "))
    };
    output_format.print(&text, &json!({ "tables": tables, "force": force }))
}
