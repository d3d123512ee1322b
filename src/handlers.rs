use crate::cards::build_cards;
use crate::errors::AppError;
use crate::form::submit_result;
use crate::models::{DashboardResponse, ResultSubmission, ResultView, SubmitResponse};
use crate::notify::Notification;
use crate::state::AppState;
use crate::trend::build_trend;
use crate::ui::{render_index, ModalView, PageView};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub modal: Option<String>,
    pub notice: Option<String>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let modal = (query.modal.as_deref() == Some("add")).then(|| ModalView::defaults(today()));
    let notifications: Vec<Notification> = query
        .notice
        .as_deref()
        .and_then(Notification::from_notice)
        .into_iter()
        .collect();

    Html(render_dashboard(&state, &notifications, modal.as_ref()).await)
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(submission): Form<ResultSubmission>,
) -> Response {
    let outcome = {
        let mut store = state.store.lock().await;
        submit_result(&mut store, &state.ranges, &submission)
    };

    match outcome {
        Ok(_) => Redirect::to("/?notice=added").into_response(),
        Err(err) => {
            warn!("rejected test result: {err}");
            let modal = ModalView::rejected(&submission, err.to_string());
            let page = render_dashboard(&state, &[], Some(&modal)).await;
            (StatusCode::BAD_REQUEST, Html(page)).into_response()
        }
    }
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let store = state.store.lock().await;
    Json(DashboardResponse {
        cards: build_cards(&store, &state.ranges),
        trend: build_trend(&store),
    })
}

pub async fn list_results(State(state): State<AppState>) -> Json<Vec<ResultView>> {
    let store = state.store.lock().await;
    Json(store.records().iter().map(ResultView::from).collect())
}

pub async fn create_result(
    State(state): State<AppState>,
    payload: Result<Json<ResultSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let Json(submission) = payload.map_err(|rejection| {
        warn!("rejected test result body: {rejection}");
        AppError::bad_request(rejection.body_text())
    })?;

    let result = {
        let mut store = state.store.lock().await;
        submit_result(&mut store, &state.ranges, &submission)
    }
    .inspect_err(|err| warn!("rejected test result: {err}"))?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            result: ResultView::from(&result),
            notification: Notification::result_added(),
        }),
    ))
}

async fn render_dashboard(
    state: &AppState,
    notifications: &[Notification],
    modal: Option<&ModalView>,
) -> String {
    let (cards, trend) = {
        let store = state.store.lock().await;
        (build_cards(&store, &state.ranges), build_trend(&store))
    };

    render_index(&PageView {
        cards: &cards,
        trend: &trend,
        notifications,
        modal,
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
