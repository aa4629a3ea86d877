//! `status` command: database location and record counts.

use console::style;

use crate::config::Settings;

pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_parent_dir()?;
    let db = settings.create_db_context();
    db.init_schema().await?;
    let repo = db.movies();

    println!("Database: {}", settings.database_path.display());
    println!("  Movies: {}", style(repo.movie_count().await?).cyan());
    println!("  Actors: {}", style(repo.actor_count().await?).cyan());
    Ok(())
}
