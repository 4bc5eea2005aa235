use crate::{
    auth::auth::AuthUser,
    config::Config,
    dashboard::service::{DashboardError, DashboardPayload, build_dashboard_with_timeout},
    store::{RecordStore, access::Access, mysql::MySqlStore},
    utils::{
        data_cache::DataCache,
        date_range::{DateRange, TimeFilter},
    },
};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use utoipa::ToSchema;

/// Computed dashboards keyed by caller scope, date range and day of computation.
pub type DashboardCache = DataCache<String, Arc<DashboardPayload>>;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsRequest {
    /// daily | weekly | monthly | 3months | 6months | yearly
    #[schema(example = "monthly")]
    pub time_filter: Option<String>,
    /// Overrides `timeFilter` together with `endDate`
    #[schema(example = "2024-01-01", format = "date")]
    pub start_date: Option<String>,
    #[schema(example = "2024-01-31", format = "date")]
    pub end_date: Option<String>,
    /// Skip the cache and recompute
    #[serde(default)]
    #[schema(example = false)]
    pub refresh: bool,
}

impl DashboardStatsRequest {
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        DateRange::resolve(
            self.time_filter.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            today,
        )
    }
}

/// `today` is part of the key since active-driver counts are per day.
fn cache_key(access: &Access, range: DateRange, today: NaiveDate) -> String {
    format!(
        "dashboard:{}:{}:{}:{}",
        access.cache_scope(),
        range.start,
        range.end,
        today
    )
}

/// Serves from the cache unless `refresh` is set; only successful payloads
/// are stored.
pub async fn cached_dashboard<S: RecordStore>(
    store: &S,
    cache: &DashboardCache,
    access: &Access,
    range: DateRange,
    today: NaiveDate,
    timeout: Duration,
    refresh: bool,
) -> Result<Arc<DashboardPayload>, DashboardError> {
    let key = cache_key(access, range, today);

    if refresh {
        // a failed recompute must not leave the stale entry behind
        cache.delete(&key).await;
    } else if let Some(hit) = cache.get(&key).await {
        debug!(key = %key, "Dashboard cache hit");
        return Ok(hit);
    }

    let payload = Arc::new(build_dashboard_with_timeout(store, access, range, today, timeout).await?);
    cache.set(key, payload.clone()).await;

    Ok(payload)
}

/// Precomputes the default (monthly) company dashboard.
pub async fn warmup_dashboard_cache<S: RecordStore>(
    store: &S,
    cache: &DashboardCache,
    today: NaiveDate,
    timeout: Duration,
) -> Result<(), DashboardError> {
    let range = DateRange::for_filter(TimeFilter::default(), today);
    if cache.has(&cache_key(&Access::ServiceRole, range, today)) {
        debug!("Dashboard cache already warm");
        return Ok(());
    }

    cached_dashboard(store, cache, &Access::ServiceRole, range, today, timeout, false).await?;

    info!(start = %range.start, end = %range.end, "Dashboard cache warmup complete");
    Ok(())
}

fn success_response(payload: &DashboardPayload) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": payload.data,
        "meta": payload.meta,
    }))
}

fn failure_response(err: &DashboardError) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "error": err.to_string(),
    }))
}

/// Company, car and driver profit & loss for a reporting window
#[utoipa::path(
    post,
    path = "/api/dashboard/stats",
    request_body(
        content = DashboardStatsRequest,
        description = "Reporting window; explicit dates take precedence over timeFilter",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Dashboard computed", body = Object, example = json!({
            "success": true,
            "data": {
                "companyStats": {
                    "totalCars": 1,
                    "totalOwners": 1,
                    "totalActiveDrivers": 1,
                    "totalMandatoryDues": 7500.0,
                    "totalEarnings": 15.0,
                    "totalExpenses": 0.0,
                    "netProfit": -7485.0
                },
                "carLevelPL": [{"car": "GR-1001-24", "earnings": 15.0, "expenses": 0.0, "net": 15.0, "due": 7500.0}],
                "driverLevelPL": [{"driver": "Kwame Mensah", "earnings": 15.0, "expenses": 0.0, "net": 15.0}],
                "earningsByPlatform": [
                    {"name": "Uber", "value": 10.0, "color": "#3b82f6"},
                    {"name": "Bolt", "value": 5.0, "color": "#10b981"},
                    {"name": "Individual", "value": 0.0, "color": "#f59e0b"}
                ],
                "earningsByDate": [{"date": "2024-01-01", "uber": 10.0, "bolt": 5.0, "individual": 0.0, "total": 15.0}],
                "expensesByType": []
            },
            "meta": {
                "dateRange": {"start": "2023-12-15", "end": "2024-01-15"},
                "earnings": {"count": 1, "minDate": "2024-01-01", "maxDate": "2024-01-01", "total": 15.0},
                "expenses": {"count": 0, "minDate": null, "maxDate": null, "total": 0.0}
            }
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "A read failed or timed out", body = Object, example = json!({
            "success": false,
            "error": "Earnings error: failed to fetch driver earnings"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn calculate_dashboard_stats(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    cache: web::Data<DashboardCache>,
    config: web::Data<Config>,
    payload: Option<web::Json<DashboardStatsRequest>>,
) -> actix_web::Result<impl Responder> {
    auth.require_dashboard_access()?;

    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let today = Local::now().date_naive();
    let range = request.date_range(today);
    info!(
        start = %range.start,
        end = %range.end,
        user_id = %auth.user_id,
        user = %auth.name,
        "calculate-dashboard-stats"
    );

    let user_id = auth.user_id.clone();
    let access = Access::Caller(auth);
    let timeout = Duration::from_secs(config.dashboard_timeout_secs);

    match cached_dashboard(
        store.get_ref(),
        cache.get_ref(),
        &access,
        range,
        today,
        timeout,
        request.refresh,
    )
    .await
    {
        Ok(payload) => Ok(success_response(&payload)),
        Err(e) => {
            error!(error = %e, user_id = %user_id, "Error in calculate-dashboard-stats");
            Ok(failure_response(&e))
        }
    }
}

/// Drop every cached dashboard, e.g. after bulk data corrections
#[utoipa::path(
    delete,
    path = "/api/dashboard/cache",
    responses(
        (status = 200, description = "Cache cleared", body = Object, example = json!({
            "message": "Dashboard cache cleared"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn clear_dashboard_cache(
    auth: AuthUser,
    cache: web::Data<DashboardCache>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin_or_accountant()?;

    cache.clear();
    info!(user_id = %auth.user_id, user = %auth.name, "Dashboard cache cleared");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Dashboard cache cleared"
    })))
}
