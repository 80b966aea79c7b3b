//! Homepage handler.

use axum::response::Html;

/// GET / - minimal landing page pointing at the login flow.
pub async fn index() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><title>stagepass</title></head>
<body>
    <h1>stagepass</h1>
    <p>Browse upcoming events and keep the ones you care about.</p>
    <a href="/login">Sign in with Google</a>
</body>
</html>"#,
    )
}
