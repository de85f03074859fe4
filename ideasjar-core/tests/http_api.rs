//! HttpIdeaApi and IdeaList against an in-process stub of the ideas API.
//!
//! The stub mirrors the real resource closely enough for status and body
//! handling: numeric ids, newest first, trimmed content, 404 on unknown ids,
//! 400 on blank content.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use ideasjar_core::{
    HttpIdeaApi, Idea, IdeaApi, IdeaDraft, IdeaId, IdeaList, IdeasError, Priority,
    PriorityBreakdown, Stats,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Store = Arc<Mutex<Vec<Idea>>>;

fn seed() -> Vec<Idea> {
    let now = Utc::now();
    vec![
        Idea {
            id: IdeaId::Num(2),
            content: "Record a podcast intro".into(),
            is_voice: true,
            priority: Priority::High,
            improved_text: None,
            created_at: Some(now),
            updated_at: Some(now),
        },
        Idea {
            id: IdeaId::Num(1),
            content: "Fix the bike chain".into(),
            is_voice: false,
            priority: Priority::Low,
            improved_text: None,
            created_at: Some(now),
            updated_at: Some(now),
        },
    ]
}

#[derive(Deserialize)]
struct ListParams {
    priority: Option<Priority>,
}

async fn list_ideas(
    State(store): State<Store>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Idea>> {
    let ideas = store.lock().unwrap();
    Json(
        ideas
            .iter()
            .filter(|i| params.priority.map_or(true, |p| i.priority == p))
            .cloned()
            .collect(),
    )
}

async fn create_idea(
    State(store): State<Store>,
    Json(draft): Json<IdeaDraft>,
) -> Result<Json<Idea>, StatusCode> {
    if draft.content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut ideas = store.lock().unwrap();
    let next = ideas
        .iter()
        .filter_map(|i| match i.id {
            IdeaId::Num(n) => Some(n),
            IdeaId::Text(_) => None,
        })
        .max()
        .unwrap_or(0)
        + 1;
    let now = Utc::now();
    let idea = Idea {
        id: IdeaId::Num(next),
        content: draft.content.trim().to_string(),
        is_voice: draft.is_voice,
        priority: draft.priority,
        improved_text: None,
        created_at: Some(now),
        updated_at: Some(now),
    };
    ideas.insert(0, idea.clone());
    Ok(Json(idea))
}

async fn get_idea(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<Json<Idea>, StatusCode> {
    store
        .lock()
        .unwrap()
        .iter()
        .find(|i| i.id == IdeaId::Num(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_idea(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(draft): Json<IdeaDraft>,
) -> Result<Json<Idea>, StatusCode> {
    let mut ideas = store.lock().unwrap();
    let idea = ideas
        .iter_mut()
        .find(|i| i.id == IdeaId::Num(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    if draft.content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    idea.content = draft.content.trim().to_string();
    idea.is_voice = draft.is_voice;
    idea.priority = draft.priority;
    idea.updated_at = Some(Utc::now());
    Ok(Json(idea.clone()))
}

async fn delete_idea(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let mut ideas = store.lock().unwrap();
    let before = ideas.len();
    ideas.retain(|i| i.id != IdeaId::Num(id));
    if ideas.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"message": "Idea deleted successfully"})))
}

async fn search_ideas(State(store): State<Store>, Path(query): Path<String>) -> Json<Vec<Idea>> {
    let ideas = store.lock().unwrap();
    Json(
        ideas
            .iter()
            .filter(|i| i.content.to_lowercase().contains(&query.to_lowercase()))
            .cloned()
            .collect(),
    )
}

async fn improve_idea(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<Json<Idea>, StatusCode> {
    let mut ideas = store.lock().unwrap();
    let idea = ideas
        .iter_mut()
        .find(|i| i.id == IdeaId::Num(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    idea.improved_text = Some(format!("Improved version: {}", idea.content));
    Ok(Json(idea.clone()))
}

async fn stats(State(store): State<Store>) -> Json<Value> {
    let ideas = store.lock().unwrap();
    let voice = ideas.iter().filter(|i| i.is_voice).count();
    let count = |p: Priority| ideas.iter().filter(|i| i.priority == p).count();
    let percentage = if ideas.is_empty() {
        0.0
    } else {
        voice as f64 * 100.0 / ideas.len() as f64
    };
    Json(json!({
        "total_ideas": ideas.len(),
        "voice_ideas": voice,
        "text_ideas": ideas.len() - voice,
        "voice_percentage": percentage,
        "priority_breakdown": {
            "high": count(Priority::High),
            "medium": count(Priority::Medium),
            "low": count(Priority::Low),
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": "2025-06-15T12:00:00.000000",
        "database": "connected"
    }))
}

fn stub_router(store: Store) -> Router {
    Router::new()
        .route("/ideas", get(list_ideas).post(create_idea))
        .route("/ideas/search/{query}", get(search_ideas))
        .route(
            "/ideas/{id}",
            get(get_idea).put(update_idea).delete(delete_idea),
        )
        .route("/ideas/{id}/improve", post(improve_idea))
        .route("/stats", get(stats))
        .route("/health", get(health))
        .with_state(store)
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn stub() -> (HttpIdeaApi, Store) {
    let store: Store = Arc::new(Mutex::new(seed()));
    let endpoint = serve(stub_router(store.clone())).await;
    (HttpIdeaApi::new(format!("{}/", endpoint)).unwrap(), store)
}

#[tokio::test]
async fn list_returns_server_order() {
    let (api, _) = stub().await;
    let ideas = api.list().await.unwrap();
    let ids: Vec<_> = ideas.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![IdeaId::Num(2), IdeaId::Num(1)]);
}

#[tokio::test]
async fn list_by_priority_sends_query_parameter() {
    let (api, _) = stub().await;

    let high = api.list_by_priority(Some(Priority::High)).await.unwrap();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].id, IdeaId::Num(2));

    let low = api.list_by_priority(Some(Priority::Low)).await.unwrap();
    assert_eq!(low.iter().map(|i| &i.id).collect::<Vec<_>>(), vec![&IdeaId::Num(1)]);

    assert!(api
        .list_by_priority(Some(Priority::Medium))
        .await
        .unwrap()
        .is_empty());
    assert_eq!(api.list_by_priority(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_update_delete_round_trip() {
    let (api, store) = stub().await;

    let created = api
        .create(&IdeaDraft::new("  Sketch a logo ").voice(true))
        .await
        .unwrap();
    assert_eq!(created.id, IdeaId::Num(3));
    assert_eq!(created.content, "Sketch a logo");
    assert!(created.created_at.is_some());

    let updated = api
        .update(
            &created.id,
            &IdeaDraft::new("Sketch two logos").priority(Priority::High),
        )
        .await
        .unwrap();
    assert_eq!(updated.content, "Sketch two logos");
    assert_eq!(updated.priority, Priority::High);
    assert!(!updated.is_voice);

    api.delete(&created.id).await.unwrap();
    assert_eq!(store.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_id_is_status_404() {
    let (api, _) = stub().await;

    let err = api.delete(&IdeaId::Num(404)).await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        IdeasError::Status { method, url, .. } => {
            assert_eq!(method, reqwest::Method::DELETE);
            assert!(url.ends_with("/ideas/404"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    assert!(api.get(&IdeaId::Num(404)).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn blank_content_is_rejected() {
    let (api, _) = stub().await;
    let err = api.create(&IdeaDraft::new("   ")).await.unwrap_err();
    assert_eq!(err.status_code(), Some(reqwest::StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn search_encodes_query() {
    let (api, _) = stub().await;
    let hits = api.search("bike chain").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, IdeaId::Num(1));
}

#[tokio::test]
async fn improve_returns_rewritten_idea() {
    let (api, _) = stub().await;
    let idea = api.improve(&IdeaId::Num(1)).await.unwrap();
    assert_eq!(
        idea.improved_text.as_deref(),
        Some("Improved version: Fix the bike chain")
    );
}

#[tokio::test]
async fn stats_and_health_decode() {
    let (api, _) = stub().await;

    let stats = api.stats().await.unwrap();
    assert_eq!(
        stats,
        Stats {
            total_ideas: 2,
            voice_ideas: 1,
            text_ideas: 1,
            voice_percentage: 50.0,
            priority_breakdown: PriorityBreakdown {
                high: 1,
                medium: 0,
                low: 1
            },
        }
    );

    let health = api.health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.database.as_deref(), Some("connected"));
}

#[tokio::test]
async fn garbage_body_is_decode_error() {
    let app = Router::new().route("/ideas", get(|| async { "definitely not json" }));
    let api = HttpIdeaApi::new(serve(app).await).unwrap();

    let err = api.list().await.unwrap_err();
    assert!(matches!(err, IdeasError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpIdeaApi::new(format!("http://{}", addr)).unwrap();
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, IdeasError::Transport { .. }), "got {err:?}");
}

#[tokio::test]
async fn idea_list_over_http() {
    let (api, store) = stub().await;
    let mut list = IdeaList::new(api);
    list.load().await.unwrap();
    assert_eq!(list.ideas().len(), 2);

    list.begin_create();
    list.draft_mut().content = "Plan a picnic".into();
    list.submit().await.unwrap();
    assert_eq!(list.ideas()[0].content, "Plan a picnic");
    assert_eq!(list.ideas().len(), 3);

    let target = list.ideas()[2].clone();
    list.begin_edit(&target);
    list.draft_mut().content = "Fix the bike chain and brakes".into();
    list.submit().await.unwrap();
    assert_eq!(list.ideas()[2].content, "Fix the bike chain and brakes");

    list.set_query("BIKE");
    assert_eq!(list.filtered().count(), 1);

    let before = list.ideas().to_vec();
    assert!(list.remove(&IdeaId::Num(77)).await.is_err());
    assert_eq!(list.ideas(), before.as_slice());

    list.remove(&IdeaId::Num(1)).await.unwrap();
    assert_eq!(list.ideas().len(), 2);
    assert_eq!(store.lock().unwrap().len(), 2);
}
