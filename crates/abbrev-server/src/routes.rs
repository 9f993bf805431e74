use abbrev_batch::BatchOptions;
use abbrev_core::{AbbrevError, AbbreviationRequest, AbbreviationResult};
use abbrev_engine::{verify_with_target, DictionarySource};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health)).route("/api/stats", get(stats))
}

pub fn abbreviation_routes() -> Router<AppState> {
    Router::new()
        .route("/api/abbreviate", post(abbreviate))
        .route("/api/verify", post(verify))
        .route("/api/batch", post(batch))
}

pub fn dictionary_routes() -> Router<AppState> {
    Router::new().route("/api/dictionary", get(list_dictionary).post(update_dictionary))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.config.application.name,
        "model": state.abbreviator.model_status(),
        "dictionary_size": state.dictionary.len(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

async fn stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.usage.snapshot()))
}

#[derive(Debug, Deserialize)]
struct AbbreviateBody {
    text: Option<String>,
    texts: Option<Vec<String>>,
    target_length: Option<usize>,
    use_model: Option<bool>,
}

fn result_json(original: &str, result: &AbbreviationResult, target_length: usize) -> Value {
    json!({
        "original": original,
        "abbreviated": result.abbreviated,
        "original_length": result.original_length,
        "final_length": result.final_length(),
        "applied_rules": result.applied_rules,
        "method_used": result.method_used,
        "reduction_percentage": result.reduction_pct(),
        "target_met": result.target_met(target_length),
    })
}

async fn abbreviate(State(state): State<AppState>, Json(body): Json<AbbreviateBody>) -> Result<Json<Value>, ApiError> {
    let target_length = body.target_length.unwrap_or(state.config.abbreviation.target_length);
    let use_model = body.use_model.unwrap_or(state.config.abbreviation.use_model);

    let texts = match (body.texts, body.text) {
        (Some(texts), _) => Ok(texts),
        (None, Some(text)) => Err(text),
        (None, None) => return Err(ApiError::bad_request("request must contain 'text' or 'texts'")),
    };

    let value = blocking(move || {
        let run = |text: String| -> Result<Value, AbbrevError> {
            let request = AbbreviationRequest::new(text, target_length).with_model(use_model);
            let result = state.abbreviator.process(&request)?;
            state.usage.record(&result, target_length);
            Ok(result_json(&request.text, &result, target_length))
        };
        match texts {
            Ok(texts) => {
                let results = texts.into_iter().map(run).collect::<Result<Vec<_>, _>>()?;
                Ok(json!({ "results": results }))
            }
            Err(text) => run(text),
        }
    })
    .await?;
    Ok(Json(value))
}

/// Run CPU-bound or file-writing work off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, AbbrevError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => Ok(result?),
        Err(e) => {
            tracing::error!(error = %e, "blocking task failed");
            Err(ApiError::internal("request handler failed"))
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyBody {
    original: String,
    abbreviated: String,
    #[serde(default)]
    applied_rules: Vec<String>,
    target_length: Option<usize>,
}

async fn verify(State(state): State<AppState>, Json(body): Json<VerifyBody>) -> Json<Value> {
    let target_length = body.target_length.unwrap_or(state.config.abbreviation.target_length);
    let report = verify_with_target(&body.original, &body.abbreviated, &body.applied_rules, target_length);
    Json(json!(report))
}

async fn list_dictionary(State(state): State<AppState>) -> Json<Value> {
    let entries: Vec<Value> = state
        .dictionary
        .snapshot()
        .entries()
        .into_iter()
        .map(|(original, abbreviated)| json!({ "original": original, "abbreviated": abbreviated }))
        .collect();
    Json(json!({ "count": entries.len(), "entries": entries }))
}

#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    #[serde(default)]
    original: String,
    #[serde(default)]
    abbreviated: String,
}

#[derive(Debug, Deserialize)]
struct DictionaryUpdate {
    entries: Vec<DictionaryEntry>,
}

async fn update_dictionary(State(state): State<AppState>, Json(body): Json<DictionaryUpdate>) -> Result<Json<Value>, ApiError> {
    let stats = blocking(move || {
        state.dictionary.upsert(body.entries.iter().map(|e| (e.original.as_str(), e.abbreviated.as_str())))
    })
    .await?;
    Ok(Json(json!(stats)))
}

#[derive(Debug, Deserialize)]
struct BatchQuery {
    target_length: Option<usize>,
    use_model: Option<bool>,
}

async fn batch(State(state): State<AppState>, Query(query): Query<BatchQuery>, body: String) -> Result<Json<Value>, ApiError> {
    let mut opts = BatchOptions::from_config(&state.config);
    if let Some(target_length) = query.target_length {
        if target_length == 0 {
            return Err(ApiError::bad_request("target_length must be a positive integer"));
        }
        opts = opts.with_target_length(target_length);
    }
    if let Some(use_model) = query.use_model {
        opts = opts.with_model(use_model);
    }

    let output = state.batch.process_csv(body.as_bytes(), &opts).await?;
    state.usage.record_batch(&output.stats);
    let s = &output.stats;
    Ok(Json(json!({
        "csv_data": output.csv,
        "stats": {
            "processed_count": s.processed,
            "skipped_count": s.skipped,
            "failed_count": s.failed,
            "success_count": s.success_count,
            "success_rate": format!("{:.1}%", s.success_rate),
            "avg_reduction": format!("{:.1}%", s.avg_reduction),
            "processing_time": format!("{:.2}s", s.elapsed.as_secs_f64()),
            "method_used": if opts.use_model && state.abbreviator.model_status().available { "ML+Rules" } else { "Rules only" },
        }
    })))
}
