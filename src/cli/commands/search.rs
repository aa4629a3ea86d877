//! `search` command: look up movies and actors by name.

use console::style;

use crate::config::Settings;

pub async fn run(settings: &Settings, query: &str) -> anyhow::Result<()> {
    settings.ensure_parent_dir()?;
    let db = settings.create_db_context();
    db.init_schema().await?;

    let (movies, actors) = db.movies().search(query).await?;
    if movies.is_empty() && actors.is_empty() {
        println!("No matches for {:?}", query);
        return Ok(());
    }

    if !movies.is_empty() {
        println!("{}", style("Movies").bold());
        for movie in &movies {
            println!("  {}  {}", style(&movie.slug).dim(), movie.name);
        }
    }
    if !actors.is_empty() {
        println!("{}", style("Actors").bold());
        for actor in &actors {
            println!("  {}  {}", style(&actor.slug).dim(), actor.name);
        }
    }
    Ok(())
}
