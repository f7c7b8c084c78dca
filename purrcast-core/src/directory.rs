//! Adoption-directory client.
//!
//! Queries a Petfinder-style directory for adoptable cats near a location.
//! Authentication is delegated to a [`TokenSource`]; results are returned
//! exactly as the provider ordered them, with no local caching.

pub mod token;

use std::sync::Arc;

use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{DirectoryError, truncate_body};
use crate::model::AdoptableCat;

pub use token::{TokenCache, TokenSource};

pub(crate) const DIRECTORY_BASE_URL: &str = "https://api.petfinder.com/v2";

/// How many animals one search returns.
const SEARCH_LIMIT: u32 = 6;

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl DirectoryClient {
    pub fn new(tokens: Arc<dyn TokenSource>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(crate::REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for the adoption directory")?;

        Ok(Self {
            http,
            base_url: DIRECTORY_BASE_URL.to_string(),
            tokens,
        })
    }

    /// Point the client at a different directory host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search for adoptable cats near a location, closest first.
    ///
    /// Every call re-queries the provider; the result list is passed
    /// through verbatim. A location the provider cannot geocode comes back
    /// as an empty list, not an error.
    pub async fn fetch_adoptable_cats(
        &self,
        location: &str,
    ) -> Result<Vec<AdoptableCat>, DirectoryError> {
        let token = self.tokens.token().await?;

        let url = format!("{}/animals", self.base_url);
        let limit = SEARCH_LIMIT.to_string();

        let res = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("type", "cat"),
                ("location", location),
                ("sort", "distance"),
                ("limit", limit.as_str()),
                ("status", "adoptable"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(DirectoryError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: PfAnimalsResponse = serde_json::from_str(&body)?;

        Ok(parsed.animals.into_iter().map(AdoptableCat::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct PfAnimalsResponse {
    animals: Vec<PfAnimal>,
}

#[derive(Debug, Deserialize)]
struct PfAnimal {
    id: u64,
    name: String,
    age: String,
    gender: String,
    url: String,
    breeds: PfBreeds,
    #[serde(default)]
    photos: Vec<PfPhoto>,
    contact: PfContact,
}

#[derive(Debug, Deserialize)]
struct PfBreeds {
    primary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PfPhoto {
    medium: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PfContact {
    address: PfAddress,
}

#[derive(Debug, Deserialize)]
struct PfAddress {
    city: Option<String>,
    state: Option<String>,
}

impl From<PfAnimal> for AdoptableCat {
    fn from(animal: PfAnimal) -> Self {
        AdoptableCat {
            id: animal.id,
            name: animal.name,
            age: animal.age,
            gender: animal.gender,
            breed: animal.breeds.primary,
            photo_urls: animal
                .photos
                .into_iter()
                .filter_map(|photo| photo.medium)
                .collect(),
            city: animal.contact.address.city.unwrap_or_default(),
            state: animal.contact.address.state.unwrap_or_default(),
            profile_url: animal.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use async_trait::async_trait;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Fixed-token [`TokenSource`] so search tests don't exercise the
    /// token endpoint.
    #[derive(Debug)]
    struct StaticTokens(&'static str);

    #[async_trait]
    impl TokenSource for StaticTokens {
        async fn token(&self) -> Result<String, AuthError> {
            Ok(self.0.to_string())
        }
    }

    /// A token source that always fails.
    #[derive(Debug)]
    struct BrokenTokens;

    #[async_trait]
    impl TokenSource for BrokenTokens {
        async fn token(&self) -> Result<String, AuthError> {
            Err(AuthError::Status {
                status: reqwest::StatusCode::UNAUTHORIZED,
                body: "invalid_client".to_string(),
            })
        }
    }

    fn client_against(server: &MockServer, tokens: Arc<dyn TokenSource>) -> DirectoryClient {
        DirectoryClient::new(tokens)
            .expect("client should build")
            .with_base_url(server.uri())
    }

    fn animal_json(id: u64, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "age": "Young",
            "gender": "Female",
            "url": format!("https://example.org/cats/{id}"),
            "breeds": { "primary": "Domestic Short Hair", "secondary": null },
            "photos": [
                { "small": "https://img.example.org/s.jpg", "medium": "https://img.example.org/m.jpg" }
            ],
            "contact": { "address": { "city": "Portland", "state": "OR" } }
        })
    }

    #[tokio::test]
    async fn search_sends_fixed_filter_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/animals"))
            .and(header("Authorization", "Bearer tok-abc"))
            .and(query_param("type", "cat"))
            .and(query_param("location", "Portland, OR"))
            .and(query_param("sort", "distance"))
            .and(query_param("limit", "6"))
            .and(query_param("status", "adoptable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "animals": [animal_json(1, "Mochi"), animal_json(2, "Biscuit")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_against(&server, Arc::new(StaticTokens("tok-abc")));
        let cats = client.fetch_adoptable_cats("Portland, OR").await.unwrap();

        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].name, "Mochi");
        assert_eq!(cats[0].breed.as_deref(), Some("Domestic Short Hair"));
        assert_eq!(cats[0].photo_urls, vec!["https://img.example.org/m.jpg"]);
        assert_eq!(cats[0].city, "Portland");
        assert_eq!(cats[0].state, "OR");
    }

    #[tokio::test]
    async fn empty_result_is_not_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/animals"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "animals": [] })),
            )
            .mount(&server)
            .await;

        let client = client_against(&server, Arc::new(StaticTokens("tok")));
        let cats = client.fetch_adoptable_cats("Nowhereville").await.unwrap();

        assert!(cats.is_empty());
    }

    #[tokio::test]
    async fn animal_without_photos_is_valid() {
        let server = MockServer::start().await;

        let mut animal = animal_json(7, "Shadow");
        animal["photos"] = serde_json::json!([]);
        animal["breeds"]["primary"] = serde_json::Value::Null;
        animal["contact"]["address"]["city"] = serde_json::Value::Null;

        Mock::given(method("GET"))
            .and(path("/animals"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "animals": [animal] })),
            )
            .mount(&server)
            .await;

        let client = client_against(&server, Arc::new(StaticTokens("tok")));
        let cats = client.fetch_adoptable_cats("Portland").await.unwrap();

        assert_eq!(cats.len(), 1);
        assert!(cats[0].photo_urls.is_empty());
        assert_eq!(cats[0].breed, None);
        assert_eq!(cats[0].city, "");
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/animals"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
            .mount(&server)
            .await;

        let client = client_against(&server, Arc::new(StaticTokens("tok")));
        let err = client.fetch_adoptable_cats("Portland").await.unwrap_err();

        assert!(matches!(err, DirectoryError::Status { .. }));
        assert!(err.to_string().contains("upstream broke"));
    }

    #[tokio::test]
    async fn auth_failure_wraps_into_directory_error() {
        let server = MockServer::start().await;

        let client = client_against(&server, Arc::new(BrokenTokens));
        let err = client.fetch_adoptable_cats("Portland").await.unwrap_err();

        assert!(matches!(err, DirectoryError::Auth(_)));
    }

    #[tokio::test]
    async fn end_to_end_with_token_cache() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "access_token": "tok-live",
                "expires_in": 3600,
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/animals"))
            .and(header("Authorization", "Bearer tok-live"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "animals": [animal_json(3, "Pierogi")]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let cache = TokenCache::new("id", "secret")
            .expect("client should build")
            .with_base_url(server.uri());
        let client = client_against(&server, Arc::new(cache));

        // Two searches, one token exchange: the second reuses the cache.
        assert_eq!(client.fetch_adoptable_cats("Portland").await.unwrap().len(), 1);
        assert_eq!(client.fetch_adoptable_cats("Portland").await.unwrap().len(), 1);
    }
}
