use crate::api::dashboard::DashboardStatsRequest;
use crate::dashboard::aggregate::{
    CarProfitLoss, CompanyStats, DailyEarnings, DashboardStats, DriverProfitLoss,
    ExpenseTypeTotal, PlatformEarnings,
};
use crate::dashboard::service::{DashboardMeta, DashboardPayload, RecordSetMeta};
use crate::utils::date_range::DateRange;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Zap Stop Fleet API",
        version = "1.0.0",
        description = r#"
## Zap Stop fleet dashboard

Financial overview for a ride-hailing fleet: company totals, per-car and
per-driver profit & loss, earnings by platform and by day, expenses by type.

### Reporting window
- `timeFilter`: daily, weekly, monthly (default), 3months, 6months, yearly
- `startDate` + `endDate` (YYYY-MM-DD) override `timeFilter`

### Security
Endpoints require a **JWT Bearer** access token. Admins and accountants see the
whole fleet, drivers only their own figures, owners are refused.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::dashboard::calculate_dashboard_stats,
        crate::api::dashboard::clear_dashboard_cache
    ),
    components(
        schemas(
            DashboardStatsRequest,
            DashboardPayload,
            DashboardStats,
            DashboardMeta,
            RecordSetMeta,
            DateRange,
            CompanyStats,
            CarProfitLoss,
            DriverProfitLoss,
            PlatformEarnings,
            DailyEarnings,
            ExpenseTypeTotal
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Dashboard", description = "Fleet financial dashboard APIs"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
