use crate::extract::{current_voter_key, voter_key, AdminAuth, CoupleRoleClaim};
use crate::session_store::VoterSessionStore;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::header::{CONTENT_TYPE, USER_AGENT};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use uuid::Uuid;
use wedding_app::domain::{
    Feedback, FeedbackSubmission, Guest, GuestStats, GuestUpdate, NewGuest, SiteSettings,
    SiteSettingsUpdate, SongSubmission, SongView, TrackSuggestion, VoteDirection,
};
use wedding_app::AppContext;
use wedding_errors::AppError;

const SESSION_DAYS: i64 = 60;

pub fn app_router(ctx: AppContext, sessions: VoterSessionStore) -> Router {
    let session_layer = SessionManagerLayer::new(sessions)
        .with_secure(ctx.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(SESSION_DAYS)));

    // Song search is also called from other origins.
    let search_routes = Router::new().route("/api/search", get(search_songs)).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]),
    );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/songs", get(list_songs).post(submit_song))
        .route("/api/songs/{id}", delete(remove_song))
        .route("/api/songs/{id}/vote", post(vote_song))
        .route("/api/songs/{id}/special-vote", post(special_vote_song))
        .route("/api/guests", get(list_guests).post(add_guest))
        .route("/api/guests/import", post(import_guests))
        .route("/api/guests/stats", get(guest_stats))
        .route("/api/guests/{id}", patch(update_guest).delete(remove_guest))
        .route("/api/feedback", get(list_feedback).post(submit_feedback))
        .route("/api/feedback/{id}", delete(remove_feedback))
        .route("/api/settings", get(site_settings).put(update_site_settings))
        .merge(search_routes)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(ctx)
}

#[derive(Deserialize)]
struct VoteBody {
    direction: VoteDirection,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct SearchResults {
    results: Vec<TrackSuggestion>,
}

#[derive(Deserialize)]
struct ImportBody {
    text: String,
}

#[derive(Serialize)]
struct ImportResult {
    imported: usize,
}

async fn list_songs(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<Vec<SongView>>, AppError> {
    let voter = current_voter_key(&session).await;
    Ok(Json(ctx.songs.ranked(voter.as_deref()).await?))
}

async fn submit_song(
    State(ctx): State<AppContext>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    Json(submission): Json<SongSubmission>,
) -> Result<(StatusCode, Json<SongView>), AppError> {
    ctx.rate_limiter.check_rate_limit(addr.ip())?;

    let song = ctx.songs.submit(submission).await?;
    let voter = current_voter_key(&session).await;
    Ok((StatusCode::CREATED, Json(song.into_view(voter.as_deref()))))
}

async fn vote_song(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(body): Json<VoteBody>,
) -> Result<Json<SongView>, AppError> {
    let voter = voter_key(&session).await?;
    let song = ctx.songs.toggle_vote(id, &voter, body.direction).await?;
    Ok(Json(song.into_view(Some(&voter))))
}

async fn special_vote_song(
    State(ctx): State<AppContext>,
    CoupleRoleClaim(role): CoupleRoleClaim,
    session: Session,
    Path(id): Path<Uuid>,
    Json(body): Json<VoteBody>,
) -> Result<Json<SongView>, AppError> {
    let song = ctx.songs.toggle_special_vote(id, role, body.direction).await?;
    let voter = current_voter_key(&session).await;
    Ok(Json(song.into_view(voter.as_deref())))
}

async fn remove_song(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.songs.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_songs(
    State(ctx): State<AppContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, AppError> {
    let results = ctx.search.execute(&query.q).await?;
    Ok(Json(SearchResults { results }))
}

async fn list_guests(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
) -> Result<Json<Vec<Guest>>, AppError> {
    Ok(Json(ctx.guests.list().await?))
}

async fn add_guest(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
    Json(new_guest): Json<NewGuest>,
) -> Result<(StatusCode, Json<Guest>), AppError> {
    let guest = ctx.guests.add(new_guest).await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

async fn import_guests(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
    Json(body): Json<ImportBody>,
) -> Result<Json<ImportResult>, AppError> {
    let imported = ctx.guests.import(&body.text).await?;
    Ok(Json(ImportResult { imported }))
}

async fn guest_stats(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
) -> Result<Json<GuestStats>, AppError> {
    Ok(Json(ctx.guests.stats().await?))
}

async fn update_guest(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
    Path(id): Path<Uuid>,
    Json(update): Json<GuestUpdate>,
) -> Result<Json<Guest>, AppError> {
    Ok(Json(ctx.guests.update(id, update).await?))
}

async fn remove_guest(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.guests.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_feedback(
    State(ctx): State<AppContext>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(submission): Json<FeedbackSubmission>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    ctx.rate_limiter.check_rate_limit(addr.ip())?;

    let user_agent = headers.get(USER_AGENT).and_then(|value| value.to_str().ok());
    let feedback = ctx.feedback.submit(submission, user_agent).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

async fn list_feedback(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
) -> Result<Json<Vec<Feedback>>, AppError> {
    Ok(Json(ctx.feedback.list().await?))
}

async fn remove_feedback(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.feedback.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn site_settings(State(ctx): State<AppContext>) -> Result<Json<SiteSettings>, AppError> {
    Ok(Json(ctx.settings.current().await?))
}

async fn update_site_settings(
    State(ctx): State<AppContext>,
    _admin: AdminAuth,
    Json(update): Json<SiteSettingsUpdate>,
) -> Result<Json<SiteSettings>, AppError> {
    Ok(Json(ctx.settings.update(update).await?))
}
