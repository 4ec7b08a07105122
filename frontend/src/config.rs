use shared::constants::API_BASE_URL;
use web_sys::window;

/// Trunk's dev server port; the API runs separately in development
const DEV_SERVER_PORT: &str = "8080";

pub fn get_api_base_url() -> String {
    if let Some(window) = window() {
        let location = window.location();
        if let (Ok(host), Ok(port)) = (location.hostname(), location.port()) {
            if host.contains("crystaltides") {
                // API is served under the same origin in production
                return String::new();
            }

            if port != DEV_SERVER_PORT {
                let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
                let host = location.host().unwrap_or(host);
                return format!("{}//{}", protocol, host);
            }
        }
    }

    API_BASE_URL.to_string()
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", get_api_base_url(), path)
}
