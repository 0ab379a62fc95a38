//! Rick and Morty API client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{Character, CharacterPage};

const API_BASE: &str = "https://rickandmortyapi.com/api";

/// Character listing response
#[derive(Debug, Deserialize)]
struct PageResponse {
    info: PageInfoResponse,
    results: Vec<CharacterResponse>,
}

#[derive(Debug, Deserialize)]
struct PageInfoResponse {
    count: u32,
    pages: u32,
    next: Option<String>,
    prev: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CharacterResponse {
    id: u64,
    name: String,
    status: String,
    species: String,
    gender: String,
    origin: NamedResource,
    location: NamedResource,
    image: String,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

/// Fetch error type
#[derive(Debug)]
pub enum FetchError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(e) => write!(f, "request failed: {}", e),
            FetchError::Status(code) => write!(f, "HTTP error! Status: {}", code),
        }
    }
}

impl std::error::Error for FetchError {}

fn character_from_response(response: CharacterResponse) -> Character {
    Character {
        id: response.id,
        name: response.name,
        status: response.status,
        species: response.species,
        gender: response.gender,
        origin: response.origin.name,
        location: response.location.name,
        image: response.image,
    }
}

/// Fetch one page (1-indexed) of the character listing.
/// Exactly one attempt; no retries.
pub async fn fetch_page(page: u32) -> Result<CharacterPage, FetchError> {
    let url = format!("{API_BASE}/character?page={page}");

    let response = http_client()
        .get(&url)
        .send()
        .await
        .map_err(FetchError::Request)?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let data: PageResponse = response.json().await.map_err(FetchError::Request)?;

    Ok(CharacterPage {
        count: data.info.count,
        pages: data.info.pages,
        has_next: data.info.next.is_some(),
        has_prev: data.info.prev.is_some(),
        characters: data
            .results
            .into_iter()
            .map(character_from_response)
            .collect(),
    })
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
