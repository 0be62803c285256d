// Fri Oct 16 2026 - Alex

use crate::film::{Availability, CandidateItem};
use crate::source::error::{SourceError, SourceResult};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};

const LISTING_CONTAINERS: [&str; 3] = ["li.poster-container", "ul.poster-list li", "li.listitem"];
const FALLBACK_TEXT_LIMIT: usize = 100;

fn selector(css: &str) -> SourceResult<Selector> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("bad selector {:?}: {}", css, e)))
}

/// Turns a slug or class fragment into a display name, e.g. `the-brutalist` -> `The Brutalist`.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;

    for c in raw.chars().map(|c| if c == '-' { ' ' } else { c }) {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

pub fn film_url(base_url: &str, slug: &str) -> String {
    format!("{}/film/{}/", base_url.trim_end_matches('/'), slug)
}

pub(crate) fn slug_from_href(href: &str) -> Option<&str> {
    let (_, rest) = href.split_once("/film/")?;
    let slug = rest.split('/').next().unwrap_or_default();
    (!slug.is_empty()).then_some(slug)
}

fn image_alt(element: &ElementRef, img: &Selector) -> Option<String> {
    element
        .select(img)
        .filter_map(|i| i.value().attr("alt"))
        .map(str::trim)
        .find(|alt| !alt.is_empty())
        .map(str::to_string)
}

/// Extracts ranked films from the first `limit` containers of the popular listing.
///
/// Containers without a usable slug (ad slots, placeholders) still count
/// toward the limit.
pub fn parse_popular(html: &str, base_url: &str, limit: usize) -> SourceResult<Vec<CandidateItem>> {
    let document = Html::parse_document(html);
    let poster = selector("[data-film-slug], [data-item-slug]")?;
    let anchor = selector("a[href]")?;
    let img = selector("img")?;

    let mut containers = Vec::new();
    for css in LISTING_CONTAINERS {
        containers = document.select(&selector(css)?).collect::<Vec<_>>();
        if !containers.is_empty() {
            break;
        }
    }

    let mut items = Vec::new();
    for container in containers.into_iter().take(limit) {
        let found = if let Some(div) = container.select(&poster).next() {
            let attrs = div.value();
            attrs
                .attr("data-film-slug")
                .or_else(|| attrs.attr("data-item-slug"))
                .map(|slug| (slug.to_string(), image_alt(&div, &img)))
        } else {
            container
                .select(&anchor)
                .filter_map(|a| a.value().attr("href"))
                .find_map(slug_from_href)
                .map(|slug| (slug.to_string(), image_alt(&container, &img)))
        };

        let Some((slug, alt)) = found else {
            continue;
        };
        let slug = slug.trim().trim_matches('/');
        if slug.is_empty() {
            continue;
        }

        let title = alt.unwrap_or_else(|| title_case(slug));
        items.push(CandidateItem::new(&film_url(base_url, slug), &title, items.len() + 1));
    }

    Ok(items)
}

fn service_name(paragraph: &ElementRef) -> Option<String> {
    paragraph
        .value()
        .classes()
        .find(|cls| cls.starts_with('-') && *cls != "-showmore")
        .map(|cls| title_case(&cls[1..]))
}

fn listed_services(section: ElementRef, service: &Selector) -> Availability {
    let names = section
        .select(service)
        .filter_map(|p| service_name(&p))
        .unique()
        .collect::<Vec<_>>();

    if names.is_empty() {
        Availability::Unavailable
    } else {
        Availability::Listed(names.join(", "))
    }
}

/// Reads the "where to watch" block of a film detail page, or the bare
/// availability fragment that the page loads it from.
pub fn parse_availability(html: &str) -> SourceResult<Availability> {
    let document = Html::parse_document(html);
    let watch = selector("div#watch")?;
    let services = selector("section.services")?;
    let service = selector("p.service")?;

    let Some(watch_block) = document.select(&watch).next() else {
        return Ok(match document.select(&services).next() {
            Some(section) => listed_services(section, &service),
            None => Availability::Unavailable,
        });
    };

    if let Some(section) = watch_block.select(&services).next() {
        return Ok(listed_services(section, &service));
    }

    let lines = watch_block
        .text()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    if lines.iter().any(|line| line.to_lowercase().contains("trailer")) {
        return Ok(Availability::Unavailable);
    }

    let fallback = lines.into_iter().find(|line| {
        let lower = line.to_lowercase();
        lower != "where to watch" && lower != "trailer"
    });

    Ok(match fallback {
        Some(line) => Availability::Listed(line.chars().take(FALLBACK_TEXT_LIMIT).collect()),
        None => Availability::Unavailable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://letterboxd.com";

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("the-brutalist"), "The Brutalist");
        assert_eq!(title_case("2001-a-space-odyssey"), "2001 A Space Odyssey");
        assert_eq!(title_case("amazon-prime-video"), "Amazon Prime Video");
        assert_eq!(title_case("MUBI"), "Mubi");
    }

    #[test]
    fn test_slug_from_href() {
        assert_eq!(slug_from_href("/film/anora/"), Some("anora"));
        assert_eq!(slug_from_href("https://letterboxd.com/film/conclave/"), Some("conclave"));
        assert_eq!(slug_from_href("/film/"), None);
        assert_eq!(slug_from_href("/list/foo/"), None);
    }

    #[test]
    fn test_parse_popular_poster_containers() {
        let html = r#"
            <ul class="poster-list">
              <li class="poster-container">
                <div class="film-poster" data-film-slug="anora"><img alt="Anora" src="a.jpg"></div>
              </li>
              <li class="poster-container">
                <div class="film-poster" data-film-slug="the-brutalist"><img src="b.jpg"></div>
              </li>
              <li class="poster-container"><span>ad slot</span></li>
              <li class="poster-container">
                <a href="/film/conclave/"><img alt="Conclave"></a>
              </li>
            </ul>"#;

        let items = parse_popular(html, BASE, 12).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], CandidateItem::new("https://letterboxd.com/film/anora/", "Anora", 1));
        assert_eq!(items[1].display_name, "The Brutalist");
        assert_eq!(items[1].ordinal, 2);
        assert_eq!(items[2].identity, "https://letterboxd.com/film/conclave/");
        assert_eq!(items[2].display_name, "Conclave");
        assert_eq!(items[2].ordinal, 3);
    }

    #[test]
    fn test_parse_popular_respects_limit() {
        let html: String = (0..20)
            .map(|i| format!(r#"<li class="listitem"><div data-film-slug="film-{}"></div></li>"#, i))
            .collect();
        let html = format!("<ul>{}</ul>", html);

        let items = parse_popular(&html, BASE, 12).unwrap();
        assert_eq!(items.len(), 12);
        assert_eq!(items.last().unwrap().ordinal, 12);
        assert_eq!(items.last().unwrap().display_name, "Film 11");
    }

    #[test]
    fn test_parse_popular_stops_at_container_limit() {
        let mut html = String::from("<ul>");
        for i in 0..14 {
            if i == 4 {
                html.push_str(r#"<li class="listitem"><span>sponsored</span></li>"#);
            } else {
                html.push_str(&format!(
                    r#"<li class="listitem"><div data-film-slug="film-{}"></div></li>"#,
                    i
                ));
            }
        }
        html.push_str("</ul>");

        let items = parse_popular(&html, BASE, 12).unwrap();
        assert_eq!(items.len(), 11);
        assert_eq!(items.last().unwrap().ordinal, 11);
        assert_eq!(items.last().unwrap().display_name, "Film 11");
        assert!(items.iter().all(|item| !item.identity.contains("film-12")));
    }

    #[test]
    fn test_parse_popular_unrecognized_markup_is_empty() {
        let items = parse_popular("<html><body><p>maintenance</p></body></html>", BASE, 12).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_services_deduplicated_in_order() {
        let html = r#"
            <div id="watch">
              <section class="services">
                <p class="service -netflix"><a>Netflix</a></p>
                <p class="service -amazon-prime-video">Prime</p>
                <p class="service -netflix">Netflix again</p>
                <p class="service -showmore">More</p>
              </section>
            </div>"#;

        assert_eq!(
            parse_availability(html).unwrap(),
            Availability::Listed("Netflix, Amazon Prime Video".to_string())
        );
    }

    #[test]
    fn test_parse_empty_services_section() {
        let html = r#"<div id="watch"><section class="services"></section></div>"#;
        assert_eq!(parse_availability(html).unwrap(), Availability::Unavailable);
    }

    #[test]
    fn test_parse_free_text_fallback_is_truncated() {
        let long = "x".repeat(150);
        let html = format!(
            "<div id=\"watch\"><h3>Where to watch</h3><p>{}</p></div>",
            long
        );

        match parse_availability(&html).unwrap() {
            Availability::Listed(text) => assert_eq!(text.chars().count(), 100),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_trailer_only_block() {
        let html = r#"<div id="watch"><h3>Where to watch</h3><a>Trailer</a></div>"#;
        assert_eq!(parse_availability(html).unwrap(), Availability::Unavailable);
    }

    #[test]
    fn test_parse_bare_services_fragment() {
        let html = r#"
            <section class="services">
              <p class="service -mubi"><a>Mubi</a></p>
              <p class="service -hulu"><a>Hulu</a></p>
            </section>"#;

        assert_eq!(
            parse_availability(html).unwrap(),
            Availability::Listed("Mubi, Hulu".to_string())
        );
    }

    #[test]
    fn test_parse_missing_watch_block() {
        assert_eq!(
            parse_availability("<html><body></body></html>").unwrap(),
            Availability::Unavailable
        );
    }
}
