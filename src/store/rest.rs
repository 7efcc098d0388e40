//! REST backend
//!
//! Talks to the hosted store's PostgREST surface (`/rest/v1/<table>`) with a
//! blocking HTTP client. Each call runs on a dispatcher worker thread.

use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::Url;

use super::client::{FactQuery, FactStore, StoreError};
use crate::facts::{Fact, FactId, NewFact, VoteColumn};

/// Ask the store to echo the written rows back
const RETURN_REPRESENTATION: &str = "return=representation";

/// Store backend over HTTP
#[derive(Clone)]
pub struct RestStore {
    /// `<store_url>/rest/v1/<table>`
    endpoint: Url,
    api_key: String,
    client: Client,
}

impl RestStore {
    pub fn new(
        store_url: &str,
        api_key: impl Into<String>,
        table: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let endpoint = table_endpoint(store_url, table)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        log::info!("Using REST store at {}", endpoint);
        Ok(Self {
            endpoint,
            api_key: api_key.into(),
            client,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
    }
}

impl FactStore for RestStore {
    fn select(&self, query: &FactQuery) -> Result<Vec<Fact>, StoreError> {
        let url = select_url(&self.endpoint, query);
        let started = Instant::now();
        let resp = self.authorize(self.client.get(url)).send()?;
        let rows = read_rows(resp)?;
        log::debug!("Fetched {} facts in {:?}", rows.len(), started.elapsed());
        Ok(rows)
    }

    fn insert(&self, fact: &NewFact) -> Result<Fact, StoreError> {
        let url = insert_url(&self.endpoint);
        let resp = self
            .authorize(self.client.post(url))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&[fact])
            .send()?;
        first_row(read_rows(resp)?)
    }

    fn update_votes(&self, id: FactId, column: VoteColumn, count: u32) -> Result<Fact, StoreError> {
        let url = update_url(&self.endpoint, id);
        let resp = self
            .authorize(self.client.patch(url))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&vote_body(column, count))
            .send()?;
        first_row(read_rows(resp)?)
    }
}

/// Resolve the REST endpoint of `table` under `store_url`
pub fn table_endpoint(store_url: &str, table: &str) -> Result<Url, StoreError> {
    let mut url = Url::parse(store_url)
        .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", store_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(StoreError::InvalidUrl(format!(
            "{}: scheme must be http or https",
            store_url
        )));
    }
    if table.is_empty() || table.contains('/') {
        return Err(StoreError::InvalidUrl(format!("bad table name `{}`", table)));
    }

    url.path_segments_mut()
        .map_err(|_| StoreError::InvalidUrl(format!("{}: cannot be a base", store_url)))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);
    url.set_query(None);
    Ok(url)
}

/// URL for a list query: `select=*`, optional `category=eq.<name>`, ordering and limit
pub fn select_url(endpoint: &Url, query: &FactQuery) -> Url {
    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("select", "*");
        if let Some(category) = query.category {
            pairs.append_pair("category", &format!("eq.{}", category.name()));
        }
        let direction = if query.descending { "desc" } else { "asc" };
        pairs.append_pair("order", &format!("{}.{}", query.order_by.column(), direction));
        pairs.append_pair("limit", &query.limit.to_string());
    }
    url
}

pub fn insert_url(endpoint: &Url) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair("select", "*");
    url
}

/// URL scoping a write to the row with `id`
pub fn update_url(endpoint: &Url, id: FactId) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("id", &format!("eq.{}", id))
        .append_pair("select", "*");
    url
}

/// `{"<column>": count}`
pub fn vote_body(column: VoteColumn, count: u32) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(column.column().to_string(), count.into());
    serde_json::Value::Object(body)
}

fn read_rows(resp: Response) -> Result<Vec<Fact>, StoreError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }
    resp.json::<Vec<Fact>>()
        .map_err(|e| StoreError::Decode(e.to_string()))
}

fn first_row(rows: Vec<Fact>) -> Result<Fact, StoreError> {
    rows.into_iter().next().ok_or(StoreError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Category, CategoryFilter};
    use crate::store::FETCH_LIMIT;

    fn endpoint() -> Url {
        table_endpoint("https://abc.supabase.co", "facts").unwrap()
    }

    #[test]
    fn test_table_endpoint() {
        assert_eq!(endpoint().as_str(), "https://abc.supabase.co/rest/v1/facts");

        let nested = table_endpoint("http://localhost:54321/", "facts").unwrap();
        assert_eq!(nested.as_str(), "http://localhost:54321/rest/v1/facts");
    }

    #[test]
    fn test_table_endpoint_rejects_bad_input() {
        assert!(matches!(
            table_endpoint("not a url", "facts"),
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            table_endpoint("ftp://abc.supabase.co", "facts"),
            Err(StoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            table_endpoint("https://abc.supabase.co", ""),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_select_url_all() {
        let query = FactQuery::for_filter(CategoryFilter::All, FETCH_LIMIT);
        let url = select_url(&endpoint(), &query);
        assert_eq!(url.query(), Some("select=*&order=votesInteresting.desc&limit=1000"));
    }

    #[test]
    fn test_select_url_category() {
        let query = FactQuery::for_filter(CategoryFilter::Only(Category::Science), FETCH_LIMIT);
        let url = select_url(&endpoint(), &query);
        assert_eq!(
            url.query(),
            Some("select=*&category=eq.science&order=votesInteresting.desc&limit=1000")
        );
    }

    #[test]
    fn test_update_url_scopes_by_id() {
        let url = update_url(&endpoint(), FactId(7));
        assert_eq!(url.query(), Some("id=eq.7&select=*"));
    }

    #[test]
    fn test_vote_body() {
        assert_eq!(
            vote_body(VoteColumn::False, 4),
            serde_json::json!({ "votesFalse": 4 })
        );
    }

    #[test]
    fn test_first_row_empty() {
        assert!(matches!(first_row(Vec::new()), Err(StoreError::EmptyResponse)));
    }
}
