//! `init` command: create the database and its schema.

use console::style;

use crate::config::Settings;

pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_parent_dir()?;
    let db = settings.create_db_context();
    db.init_schema().await?;

    println!(
        "{} database ready at {}",
        style("✓").green(),
        settings.database_path.display()
    );
    Ok(())
}
