//! Newsletter relay: Substack JSON API first, RSS feed as fallback.

use std::sync::OnceLock;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::{AppState, DEFAULT_CACHE_CONTROL};

const EXCERPT_CHARS: usize = 200;
const DEFAULT_POST_TYPE: &str = "newsletter";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub title: String,
    pub date: String,
    pub link: String,
    pub excerpt: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiPost {
    title: Option<String>,
    post_date: Option<String>,
    canonical_url: Option<String>,
    slug: Option<String>,
    subtitle: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    pub url: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn base_url(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

pub fn api_url(base: &str, limit: u32) -> String {
    format!("{}/api/v1/posts?limit={limit}", base_url(base))
}

pub fn feed_url(base: &str) -> String {
    format!("{}/feed", base_url(base))
}

/// Maps the Substack posts array. Anything that is not an array of post
/// objects yields `None` so the caller can fall back to RSS.
pub fn posts_from_api(base: &str, body: &str) -> Option<Vec<Post>> {
    let raw: Vec<ApiPost> = serde_json::from_str(body).ok()?;
    let base = base_url(base);
    Some(
        raw.into_iter()
            .map(|p| {
                let slug = p.slug.unwrap_or_default();
                Post {
                    title: p.title.unwrap_or_default(),
                    date: p.post_date.unwrap_or_default(),
                    link: non_empty(p.canonical_url)
                        .unwrap_or_else(|| format!("{base}/p/{slug}")),
                    excerpt: non_empty(p.subtitle)
                        .or_else(|| non_empty(p.description))
                        .unwrap_or_default(),
                    kind: non_empty(p.kind).unwrap_or_else(|| DEFAULT_POST_TYPE.to_string()),
                }
            })
            .collect(),
    )
}

/// Extracts the first `limit` `<item>` blocks from an RSS document.
pub fn posts_from_rss(xml: &str, limit: usize) -> Vec<Post> {
    rss_items(xml)
        .take(limit)
        .map(|item| Post {
            title: tag_text(item, "title"),
            date: tag_text(item, "pubDate"),
            link: tag_text(item, "link"),
            excerpt: strip_html(&tag_text(item, "description"))
                .chars()
                .take(EXCERPT_CHARS)
                .collect(),
            kind: DEFAULT_POST_TYPE.to_string(),
        })
        .collect()
}

fn item_pattern() -> Option<&'static Regex> {
    static ITEM: OnceLock<Option<Regex>> = OnceLock::new();
    ITEM.get_or_init(|| Regex::new(r"<item>([\s\S]*?)</item>").ok()).as_ref()
}

fn markup_pattern() -> Option<&'static Regex> {
    static MARKUP: OnceLock<Option<Regex>> = OnceLock::new();
    MARKUP.get_or_init(|| Regex::new(r"<[^>]+>").ok()).as_ref()
}

fn rss_items(xml: &str) -> impl Iterator<Item = &str> + '_ {
    item_pattern()
        .into_iter()
        .flat_map(move |re| re.captures_iter(xml))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Text of the first `<tag ...>` element, CDATA wrapper removed and trimmed.
/// Missing tags give an empty string.
pub fn tag_text(item: &str, tag: &str) -> String {
    let tag = regex::escape(tag);
    let pattern = format!(r"(?s)<{tag}[^>]*>(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?</{tag}>");
    Regex::new(&pattern)
        .ok()
        .and_then(|re| {
            re.captures(item)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .unwrap_or_default()
}

/// Removes `<...>` markup. A `<` with no closing `>` (or `<>`) is kept.
pub fn strip_html(input: &str) -> String {
    match markup_pattern() {
        Some(re) => re.replace_all(input, "").into_owned(),
        None => input.to_string(),
    }
}

fn validate_url(url: Option<&str>) -> Result<&str, ApiError> {
    let url = url.map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing url parameter"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Only http(s) URLs are allowed",
        ));
    }
    Ok(url)
}

async fn fetch_text(state: &AppState, url: &str) -> Result<Option<String>, reqwest::Error> {
    let resp = state
        .http
        .get(url)
        .header(reqwest::header::USER_AGENT, state.relay.user_agent.as_str())
        .send()
        .await?;
    if !resp.status().is_success() {
        warn!("upstream {url} returned HTTP {}", resp.status().as_u16());
        return Ok(None);
    }
    resp.text().await.map(Some)
}

async fn fetch_posts(state: &AppState, base: &str) -> Result<Vec<Post>, ApiError> {
    let limit = state.relay.post_limit;

    let api = api_url(base, limit);
    match fetch_text(state, &api).await {
        Ok(Some(body)) => match posts_from_api(base, &body) {
            Some(posts) if !posts.is_empty() => return Ok(posts),
            Some(_) => info!("substack api returned no posts for {base}"),
            None => warn!("substack api returned an unexpected payload for {base}"),
        },
        Ok(None) => {}
        Err(err) => warn!("substack api fetch failed: {err}"),
    }

    let feed = feed_url(base);
    let xml = fetch_text(state, &feed)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(xml
        .map(|xml| posts_from_rss(&xml, limit as usize))
        .unwrap_or_default())
}

fn cache_headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_str(value)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CACHE_CONTROL)),
    );
    headers
}

async fn relay(state: &AppState, url: Option<&str>) -> Result<Vec<Post>, ApiError> {
    let base = validate_url(url)?;
    let posts = fetch_posts(state, base).await?;
    if posts.is_empty() {
        return Err(api_error(
            StatusCode::BAD_GATEWAY,
            "Could not fetch from Substack",
        ));
    }
    Ok(posts)
}

pub async fn substack_posts(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Response {
    let headers = cache_headers(&state.relay.cache_control);
    match relay(&state, query.url.as_deref()).await {
        Ok(posts) => (StatusCode::OK, headers, Json(json!({ "posts": posts }))).into_response(),
        Err((status, body)) => (status, headers, body).into_response(),
    }
}
