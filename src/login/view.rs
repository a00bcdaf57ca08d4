//! Sign-in view and its HTML rendering.

use url::form_urlencoded;

use super::GateConfig;

const TITLE: &str = "Welcome!";
const SUBTITLE: &str = "Connect your account to continue";

/// One "continue with ..." affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInButton {
    pub provider: String,
    pub label: String,
    pub href: String,
}

impl SignInButton {
    fn new(provider: &str, callback_url: Option<&str>) -> Self {
        let mut href = format!("/api/auth/signin/{}", provider);
        if let Some(callback) = callback_url {
            href.push_str("?callbackUrl=");
            href.extend(form_urlencoded::byte_serialize(callback.as_bytes()));
        }

        Self {
            provider: provider.to_string(),
            label: format!("Continue with {}", display_name(provider)),
            href,
        }
    }
}

fn display_name(provider: &str) -> String {
    match provider {
        "github" => "GitHub".to_string(),
        "gitlab" => "GitLab".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Everything the sign-in page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub title: String,
    pub subtitle: String,
    pub callback_url: Option<String>,
    pub buttons: Vec<SignInButton>,
    pub privacy_policy_path: String,
}

impl LoginView {
    pub fn new(config: &GateConfig, callback_url: Option<&str>) -> Self {
        Self {
            title: TITLE.to_string(),
            subtitle: SUBTITLE.to_string(),
            callback_url: callback_url.map(str::to_string),
            buttons: config
                .sign_in_providers
                .iter()
                .map(|p| SignInButton::new(p, callback_url))
                .collect(),
            privacy_policy_path: config.privacy_policy_path.clone(),
        }
    }

    /// Render the page as a standalone HTML document.
    pub fn render(&self) -> String {
        let buttons: String = self
            .buttons
            .iter()
            .map(|b| {
                format!(
                    r#"        <a class="signin signin-{}" href="{}">{}</a>
"#,
                    escape_html(&b.provider),
                    escape_html(&b.href),
                    escape_html(&b.label)
                )
            })
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Sign in | Scoopika</title>
</head>
<body>
  <main class="login">
    <header class="brand">
      <img src="/logo.svg" alt="Scoopika" width="40" height="40">
      <h2>{title}</h2>
      <p>{subtitle}</p>
    </header>
    <section class="signin-buttons">
{buttons}    </section>
    <p class="legal">By continue you agree to our <a href="{privacy}" target="_blank" rel="noopener">Privacy policy</a></p>
  </main>
</body>
</html>
"#,
            title = escape_html(&self.title),
            subtitle = escape_html(&self.subtitle),
            buttons = buttons,
            privacy = escape_html(&self.privacy_policy_path),
        )
    }
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
