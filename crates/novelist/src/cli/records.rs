//! Generic record commands: `query` and `update`.

use super::output::print_json;
use super::session::Session;
use novelist_error::NovelistResult;
use novelist_storage::Category;
use serde_json::Value;

/// Parse a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Print a record or the value at `path` inside it.
pub async fn query_record(
    session: &Session,
    category: Category,
    id: &str,
    path: Option<&str>,
) -> NovelistResult<()> {
    let value = session
        .storage()
        .query(category, id, path.unwrap_or_default())
        .await?;
    match value {
        Value::String(text) => println!("{}", text),
        other => print_json(&other)?,
    }
    Ok(())
}

/// Set the value at `path` and print the updated record.
pub async fn update_record(
    session: &Session,
    category: Category,
    id: &str,
    path: &str,
    raw: &str,
) -> NovelistResult<()> {
    let record = session
        .storage()
        .update(category, id, path, parse_value(raw))
        .await?;
    tracing::info!(category = %category, id, path, "Record updated");
    print_json(&record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use novelist_config::NovelistConfig;
    use serde_json::json;

    fn session(dir: &tempfile::TempDir) -> Session {
        let mut config = NovelistConfig::default();
        config.storage.data_dir = dir.path().to_path_buf();
        Session::with_config(config).unwrap()
    }

    #[test]
    fn values_fall_back_to_strings() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("[\"a\"]"), json!(["a"]));
        assert_eq!(parse_value("Tides of Aurelia"), json!("Tides of Aurelia"));
    }

    #[tokio::test]
    async fn update_then_query_round_trips_through_storage() {
        let dir = tempfile::TempDir::new().unwrap();
        let session = session(&dir);
        session
            .storage()
            .save(Category::Plots, "p1", &json!({"id": "p1", "chapters": [{"title": "Ebb"}]}))
            .await
            .unwrap();

        update_record(&session, Category::Plots, "p1", "chapters.0.title", "Flood")
            .await
            .unwrap();
        let title = session
            .storage()
            .query(Category::Plots, "p1", "chapters.0.title")
            .await
            .unwrap();
        assert_eq!(title, json!("Flood"));

        assert!(
            query_record(&session, Category::Plots, "missing", None)
                .await
                .is_err()
        );
    }
}
