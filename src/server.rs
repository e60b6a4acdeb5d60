use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use hyper::header::{HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::db::card_store::CardStore;
use crate::wiki_scraper::WikiCardScraper;
use crate::BoxError;

/// Everything a request handler needs. Built once in main and shared;
/// the store sits behind a mutex because rusqlite connections are not
/// thread-safe to share.
pub struct AppState {
    store: Mutex<CardStore>,
    scraper: WikiCardScraper,
}

impl AppState {
    pub fn new(store: CardStore, scraper: WikiCardScraper) -> Self {
        AppState {
            store: Mutex::new(store),
            scraper,
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, CardStore>, BoxError> {
        self.store
            .lock()
            .map_err(|_| "card store lock poisoned".into())
    }
}

#[derive(Debug, Deserialize)]
struct IncrementRequest {
    increment: i64,
}

pub async fn run(addr: SocketAddr, state: Arc<AppState>) -> Result<(), hyper::Error> {
    let make_svc = make_service_fn(move |_conn| {
        let state = state.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| handle_request(req, state.clone())))
        }
    });

    info!("Listening on http://{}", addr);
    Server::bind(&addr).serve(make_svc).await
}

pub async fn handle_request(
    req: Request<Body>,
    state: Arc<AppState>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match route(req, &state).await {
        Ok(response) => response,
        Err(e) => {
            error!("{} {} failed: {}", method, path, e);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    };

    Ok(with_cors(response))
}

async fn route(req: Request<Body>, state: &AppState) -> Result<Response<Body>, BoxError> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (&method, path.as_str()) {
        (&Method::OPTIONS, _) => Ok(empty_response(StatusCode::NO_CONTENT)),
        (&Method::GET, "/card/list") => list_cards(state),
        (&Method::GET, "/card/list/json") => export_cards(state),
        (&Method::PUT, "/card/list/json") => import_cards(req, state).await,
        (&Method::POST, p) if p.starts_with("/card/") => match item_name(p, "/card/") {
            Some(name) => create_card(name, state).await,
            None => Ok(text_response(StatusCode::NOT_FOUND, "Not Found")),
        },
        (&Method::PATCH, p) if p.starts_with("/card/") => match item_name(p, "/card/") {
            Some(name) => {
                let name = name.to_string();
                increment_card(req, &name, state).await
            }
            None => Ok(text_response(StatusCode::NOT_FOUND, "Not Found")),
        },
        (&Method::PUT, "/deck") => upsert_deck(req, state, None).await,
        (&Method::PUT, p) if p.starts_with("/deck/") => match item_name(p, "/deck/") {
            Some(id) => {
                let id = id.to_string();
                upsert_deck(req, state, Some(id)).await
            }
            None => Ok(text_response(StatusCode::NOT_FOUND, "Not Found")),
        },
        (&Method::GET, "/deck/list") => list_decks(state),
        _ => Ok(text_response(StatusCode::NOT_FOUND, "Not Found")),
    }
}

/// One non-empty path segment after the prefix, the way an Express
/// `:name` parameter matches.
fn item_name<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    match path.strip_prefix(prefix) {
        Some(rest) if !rest.is_empty() && !rest.contains('/') => Some(rest),
        _ => None,
    }
}

/// POST /card/:name — fetch the wiki page, extract the record, persist.
async fn create_card(raw_name: &str, state: &AppState) -> Result<Response<Body>, BoxError> {
    let name = match decode_segment(raw_name) {
        Ok(name) => name,
        Err(response) => return Ok(response),
    };

    let card = state.scraper.fetch_card(&name).await?;
    state.store()?.upsert_card(&card)?;
    Ok(empty_response(StatusCode::CREATED))
}

/// PATCH /card/:name — apply the signed increment to the stored count.
async fn increment_card(
    req: Request<Body>,
    raw_name: &str,
    state: &AppState,
) -> Result<Response<Body>, BoxError> {
    let name = match decode_segment(raw_name) {
        Ok(name) => name,
        Err(response) => return Ok(response),
    };

    let body = hyper::body::to_bytes(req.into_body()).await?;
    let request: IncrementRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return Ok(text_response(
                StatusCode::BAD_REQUEST,
                &format!("invalid increment body: {}", e),
            ))
        }
    };

    state.store()?.update_card_count(&name, request.increment)?;
    Ok(empty_response(StatusCode::OK))
}

fn list_cards(state: &AppState) -> Result<Response<Body>, BoxError> {
    let cards = state.store()?.list_cards()?;
    json_response(StatusCode::OK, &cards)
}

/// GET /card/list/json — the list as a downloadable attachment.
fn export_cards(state: &AppState) -> Result<Response<Body>, BoxError> {
    let cards = state.store()?.list_cards()?;
    let mut response = json_response(StatusCode::OK, &cards)?;
    response.headers_mut().insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=cards.json"),
    );
    Ok(response)
}

/// PUT /card/list/json — bulk overwrite from a JSON array body.
async fn import_cards(req: Request<Body>, state: &AppState) -> Result<Response<Body>, BoxError> {
    let body = hyper::body::to_bytes(req.into_body()).await?;
    let cards: Vec<Card> = match serde_json::from_slice(&body) {
        Ok(cards) => cards,
        Err(e) => {
            return Ok(text_response(
                StatusCode::BAD_REQUEST,
                &format!("invalid card list body: {}", e),
            ))
        }
    };
    if cards.iter().any(|card| card.name.is_empty()) {
        return Ok(text_response(
            StatusCode::BAD_REQUEST,
            "card name must not be empty",
        ));
    }

    state.store()?.bulk_upsert_cards(&cards)?;
    Ok(empty_response(StatusCode::OK))
}

/// PUT /deck and PUT /deck/:id — upsert keyed by id; the path variant
/// forces the id before the write.
async fn upsert_deck(
    req: Request<Body>,
    state: &AppState,
    path_id: Option<String>,
) -> Result<Response<Body>, BoxError> {
    let body = hyper::body::to_bytes(req.into_body()).await?;
    let mut deck: Deck = match serde_json::from_slice(&body) {
        Ok(deck) => deck,
        Err(e) => {
            return Ok(text_response(
                StatusCode::BAD_REQUEST,
                &format!("invalid deck body: {}", e),
            ))
        }
    };

    if let Some(raw_id) = path_id {
        deck.id = match decode_segment(&raw_id) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
    }
    if deck.id.is_empty() {
        return Ok(text_response(
            StatusCode::BAD_REQUEST,
            "deck id must not be empty",
        ));
    }

    state.store()?.upsert_deck(&deck)?;
    Ok(empty_response(StatusCode::OK))
}

fn list_decks(state: &AppState) -> Result<Response<Body>, BoxError> {
    let decks = state.store()?.list_decks()?;
    json_response(StatusCode::OK, &decks)
}

/// Percent-decodes a path segment; undecodable segments get a 400.
fn decode_segment(raw: &str) -> Result<String, Response<Body>> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            text_response(
                StatusCode::BAD_REQUEST,
                &format!("invalid path segment: {}", e),
            )
        })
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response<Body>, BoxError> {
    let body = serde_json::to_vec(value)?;
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))?)
}

fn text_response(status: StatusCode, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(message.to_string()))
        .unwrap()
}

fn empty_response(status: StatusCode) -> Response<Body> {
    Response::builder().status(status).body(Body::empty()).unwrap()
}

fn with_cors(mut response: Response<Body>) -> Response<Body> {
    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, POST, PATCH, DELETE, OPTIONS, PUT"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}
