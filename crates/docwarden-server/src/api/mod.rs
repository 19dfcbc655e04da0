// ABOUTME: API module containing the HTTP handlers of the mock user-info server.
// ABOUTME: Split into the userinfo proxy and the dev-ui callback echo.

pub mod dev_ui;
pub mod userinfo;
