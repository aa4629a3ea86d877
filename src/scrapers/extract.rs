//! Pure HTML extraction for the ranked-list and movie pages.
//!
//! These functions do no I/O; callers hand in raw markup. Selectors are
//! hard-coded to the source site's layout - when a required element is
//! missing the page is reported as malformed so the caller can skip it
//! (movie page) or abort the run (list page).

use scraper::{ElementRef, Html, Selector};

use super::error::ExtractError;
use super::{ScrapedActor, ScrapedMovie};

/// Exact label text of the heading that marks the cast section.
const CAST_HEADING: &str = "Hrají: ";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Extract the relative movie URLs from the ranked-list page.
///
/// Returns hrefs of every movie-title anchor in document order. Fails
/// if any matched anchor lacks an `href` attribute, which signals the
/// site's markup contract changed.
pub fn extract_movie_links(markup: &str) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(markup);
    let anchors = selector("a.film-title-name");

    let mut links = Vec::new();
    for element in document.select(&anchors) {
        match element.value().attr("href") {
            Some(href) => links.push(href.to_string()),
            None => {
                return Err(ExtractError::MalformedListPage(
                    "movie-title anchor without href attribute",
                ))
            }
        }
    }
    Ok(links)
}

/// Extract the title and starring actors from a movie page.
///
/// The cast block is located through the heading labeled `"Hrají: "`;
/// every actor anchor inside the adjacent container is collected except
/// the "show more" affordance. Duplicate cast entries are preserved.
pub fn extract_movie_page(markup: &str) -> Result<ScrapedMovie, ExtractError> {
    let document = Html::parse_document(markup);

    let name = document
        .select(&selector("div.film-header-name h1"))
        .next()
        .ok_or(ExtractError::MalformedMoviePage("missing title header"))?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let heading = document
        .select(&selector("h4"))
        .find(|h| h.text().collect::<String>() == CAST_HEADING)
        .ok_or(ExtractError::MalformedMoviePage("missing cast heading"))?;

    let cast_block = heading
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or(ExtractError::MalformedMoviePage("cast heading has no parent element"))?;
    let container = cast_block
        .select(&selector("span"))
        .next()
        .ok_or(ExtractError::MalformedMoviePage("missing cast container"))?;

    let mut actors = Vec::new();
    for anchor in container.select(&selector("a")) {
        if anchor.value().classes().any(|class| class == "more") {
            continue;
        }
        let href = anchor.value().attr("href").ok_or(
            ExtractError::MalformedMoviePage("actor anchor without href attribute"),
        )?;
        actors.push(ScrapedActor {
            name: anchor.text().collect::<String>(),
            csfd_id: actor_id_from_href(href),
        });
    }

    Ok(ScrapedMovie { name, actors })
}

/// Derive an actor's external identifier from their profile href.
///
/// Takes the last path segment and the portion before its first hyphen,
/// so `/tvurce/123456-some-actor/` yields `123456`.
pub fn actor_id_from_href(href: &str) -> String {
    let last_segment = href.trim_matches('/').rsplit('/').next().unwrap_or("");
    last_segment.split('-').next().unwrap_or("").to_string()
}
