use anyhow::Context;
use sqlx::postgres::PgPool;
use sqlx::Executor;
use std::fs;
use std::path::Path;

/// Apply every `.sql` file under `migrations/` in filename order.
pub async fn run_migrations(pool: &PgPool, migrations_dir: &str) -> anyhow::Result<()> {
    if !Path::new(migrations_dir).exists() {
        anyhow::bail!("Migrations directory not found: {migrations_dir}");
    }

    let mut entries: Vec<_> = fs::read_dir(migrations_dir)?
        .filter_map(Result::ok)
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "sql")
                .unwrap_or(false)
        })
        .collect();

    // Sort by filename to ensure order
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let filename = path.file_name().unwrap_or_default().to_string_lossy();

        tracing::info!(migration = %filename, "running migration");

        let sql = fs::read_to_string(&path)
            .with_context(|| format!("failed to read migration {filename}"))?;
        // Executor::execute on a &str uses the simple query protocol, so a
        // file may hold multiple statements.
        pool.execute(sql.as_str())
            .await
            .with_context(|| format!("migration {filename} failed"))?;
    }

    tracing::info!("all migrations applied");
    Ok(())
}
