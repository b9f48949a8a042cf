use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static SIGNUP_COUNT: AtomicU64 = AtomicU64::new(0);
static LOGIN_COUNT: AtomicU64 = AtomicU64::new(0);
static LOGIN_FAILURE_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_signup_count() {
    SIGNUP_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_login_count() {
    LOGIN_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_login_failure_count() {
    LOGIN_FAILURE_COUNT.fetch_add(1, Ordering::Relaxed);
}

fn render() -> String {
    let counters = [
        ("http_requests_total", "Total number of account API requests", &REQUEST_COUNT),
        ("http_errors_total", "Total number of failed account API requests", &ERROR_COUNT),
        ("signups_total", "Accounts created", &SIGNUP_COUNT),
        ("logins_total", "Successful logins", &LOGIN_COUNT),
        ("login_failures_total", "Rejected login attempts", &LOGIN_FAILURE_COUNT),
    ];

    counters
        .iter()
        .map(|(name, help, counter)| {
            format!(
                "# HELP {name} {help}\n# TYPE {name} counter\n{name} {}\n",
                counter.load(Ordering::Relaxed)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String)
    )
)]
pub async fn get_metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_counter() {
        increment_signup_count();
        let text = render();

        for name in [
            "http_requests_total",
            "http_errors_total",
            "signups_total",
            "logins_total",
            "login_failures_total",
        ] {
            assert!(text.contains(&format!("# TYPE {} counter", name)));
        }

        let signups = text
            .lines()
            .find(|line| line.starts_with("signups_total "))
            .and_then(|line| line.split(' ').nth(1))
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap();
        assert!(signups >= 1);
    }
}
