use actix_web::{http::header::ContentType, HttpResponse};

const ACCESS_DENIED_HTML: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Access Denied</title></head>
<body>
  <main>
    <h1>Access Denied</h1>
    <p>Your account is not on the list of authorized users.
       Ask the administrator to grant you access.</p>
    <form method="post" action="/auth/logout"><button type="submit">Sign out</button></form>
  </main>
</body>
</html>
"#;

pub fn access_denied() -> HttpResponse {
    HttpResponse::Forbidden()
        .content_type(ContentType::html())
        .body(ACCESS_DENIED_HTML)
}

pub fn login_page(authorize_url: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
  <main>
    <h1>Quizify Study</h1>
    <p>Sign in to generate quizzes from a topic or study guide.</p>
    <a href="{}">Sign in with GitHub</a>
  </main>
</body>
</html>
"#,
        escape_attribute(authorize_url)
    )
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
