pub mod auth_request_cookies;
