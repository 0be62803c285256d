// Fri Oct 16 2026 - Alex

use crate::config::{Config, PopularityWindow, DISCOVERY_CAP};
use crate::film::{Availability, CandidateItem};
use crate::source::error::{SourceError, SourceResult};
use crate::source::parse::{parse_availability, parse_popular, slug_from_href};
use crate::source::{AvailabilitySession, AvailabilitySource, DiscoverySource};
use reqwest::blocking::Client;
use std::sync::atomic::{AtomicU64, Ordering};

pub const LETTERBOXD_BASE_URL: &str = "https://letterboxd.com";

/// Discovery and availability lookups against Letterboxd over plain HTTP.
///
/// The full pages fill their poster grid and "where to watch" panel from
/// separate HTML fragments after load. Both are requested directly first and
/// the full page is only read when a fragment yields nothing.
pub struct LetterboxdSource {
    client: Client,
    base_url: String,
    window: PopularityWindow,
    limit: usize,
    next_session: AtomicU64,
}

impl LetterboxdSource {
    /// Building the HTTP client is the only setup step; failing here aborts the run.
    pub fn new(config: &Config) -> SourceResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SourceError::Init(e.to_string()))?;

        Ok(Self {
            client,
            base_url: LETTERBOXD_BASE_URL.to_string(),
            window: config.popularity_window,
            limit: config.discovery_limit.min(DISCOVERY_CAP),
            next_session: AtomicU64::new(1),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn listing_url(&self) -> String {
        format!("{}/{}", self.base_url, self.window.listing_path())
    }

    /// `films/popular/this/week/` is rendered from `films/ajax/popular/this/week/`.
    pub fn listing_fragment_url(&self) -> String {
        let path = self.window.listing_path().replacen("films/", "films/ajax/", 1);
        format!("{}/{}", self.base_url, path)
    }

    fn try_discover(&self) -> SourceResult<Vec<CandidateItem>> {
        let fragment_url = self.listing_fragment_url();
        log::info!("Fetching popular films from {}", fragment_url);

        match get_page(&self.client, &fragment_url)
            .and_then(|html| parse_popular(&html, &self.base_url, self.limit))
        {
            Ok(items) if !items.is_empty() => return Ok(items),
            Ok(_) => log::debug!("Listing fragment had no films, reading the full page"),
            Err(e) => log::debug!("Listing fragment failed ({}), reading the full page", e),
        }

        let html = get_page(&self.client, &self.listing_url())?;
        parse_popular(&html, &self.base_url, self.limit)
    }
}

fn availability_fragment_url(base_url: &str, identity: &str) -> Option<String> {
    let slug = slug_from_href(identity)?;
    Some(format!("{}/csi/film/{}/availability/", base_url, slug))
}

fn get_page(client: &Client, url: &str) -> SourceResult<String> {
    let response = client.get(url).send().map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })
}

impl DiscoverySource for LetterboxdSource {
    fn discover(&self) -> Vec<CandidateItem> {
        match self.try_discover() {
            Ok(items) => {
                if items.is_empty() {
                    log::warn!("Popular listing had no recognizable films; the page structure may have changed");
                }
                items
            }
            Err(e) => {
                log::warn!("Discovery failed: {}", e);
                Vec::new()
            }
        }
    }
}

impl AvailabilitySource for LetterboxdSource {
    fn open_session(&self) -> SourceResult<Box<dyn AvailabilitySession>> {
        let id = self.next_session.fetch_add(1, Ordering::Relaxed);
        log::trace!("Opening session {}", id);

        Ok(Box::new(LetterboxdSession {
            id,
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }))
    }
}

struct LetterboxdSession {
    id: u64,
    client: Client,
    base_url: String,
}

impl AvailabilitySession for LetterboxdSession {
    fn lookup(&mut self, item: &CandidateItem) -> SourceResult<Availability> {
        if let Some(url) = availability_fragment_url(&self.base_url, &item.identity) {
            match get_page(&self.client, &url).and_then(|html| parse_availability(&html)) {
                Ok(found @ Availability::Listed(_)) => return Ok(found),
                Ok(_) => log::trace!("No services in fragment for {}", item.identity),
                Err(e) => log::debug!("Availability fragment for {} failed: {}", item.identity, e),
            }
        }

        let html = get_page(&self.client, &item.identity)?;
        parse_availability(&html)
    }
}

impl Drop for LetterboxdSession {
    fn drop(&mut self) {
        log::trace!("Released session {}", self.id);
    }
}
