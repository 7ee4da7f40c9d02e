// tabshell services
// Services are stateless or lightly stateful helpers: content hosting, the
// proxy fetcher, notifications and settings.

pub mod content_host;
pub mod notification_center;
pub mod proxy_service;
pub mod settings_engine;
