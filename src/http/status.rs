//! Diagnostic status page.
//!
//! Plain HTML, intentionally unstyled: the page is an operator surface for
//! checking what the process has loaded, not a product UI.

use axum::response::Html;

use crate::http::server::AppState;
use crate::lifecycle::signals::RELOAD_SIGNAL_NAME;
use crate::redirects::RedirectTable;

/// Escape text for embedding in the page, keeping line breaks and runs of
/// spaces readable.
fn escape(text: &str) -> String {
    html_escape::encode_text(text)
        .replace('\n', "<br />\n")
        .replace("  ", "&nbsp; ")
}

/// An `<a>` element whose label is its own target.
fn anchor(target: &str) -> String {
    format!(
        "<a href=\"{href}\">{label}</a>",
        href = html_escape::encode_double_quoted_attribute(target),
        label = html_escape::encode_text(target),
    )
}

/// `H:MM:SS` rendering of process uptime, with a day count once it matters.
fn format_uptime(uptime: std::time::Duration) -> String {
    let total = uptime.as_secs();
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    if days > 0 {
        format!("{days} days, {hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours}:{minutes:02}:{seconds:02}")
    }
}

/// Human description of the configured reload mechanisms.
fn reload_mechanism(reload_path: Option<&str>) -> String {
    match reload_path {
        Some(path) => format!("(process signal {RELOAD_SIGNAL_NAME} or path \"{path}\")"),
        None => format!("(process signal {RELOAD_SIGNAL_NAME})"),
    }
}

/// The loaded table as linkable JSON-like text, keys in sorted order.
fn redirects_to_html(snapshot: &RedirectTable) -> String {
    let mut out = String::from("{<br />\n");
    for (from_path, entry) in snapshot.iter() {
        out.push_str(&format!(
            "&nbsp; \"{from}\": [<br />\n\
             &nbsp; &nbsp; \"{to}\",<br />\n\
             &nbsp; &nbsp; \"{user}\",<br />\n\
             &nbsp; &nbsp; \"{date}\"<br />\n\
             &nbsp; ],<br />\n",
            from = anchor(from_path),
            to = anchor(&entry.to_url),
            user = html_escape::encode_text(&entry.created_by),
            date = entry.created_at.format("%Y-%m-%d %H:%M:%S"),
        ));
    }
    out.push('}');
    out
}

/// Render the whole status document against one table snapshot.
pub fn render(state: &AppState, snapshot: &RedirectTable) -> Html<String> {
    let identity = &state.identity;
    let code = state.options.redirect_code;

    let title = escape(&format!("{} status", crate::PROGRAM_NAME));
    let overall = escape(&format!(
        "Program {program} version {version}\n\
         Process ID {pid} listening on {addr} on host {host}\n\
         Process start datetime {start} (up time {uptime})\n\
         Successful Redirect Status Code is {code} ({reason})",
        program = crate::PROGRAM_NAME,
        version = identity.version,
        pid = identity.pid,
        addr = identity.listen_addr,
        host = identity.hostname,
        start = identity.started_at.format("%Y-%m-%d %H:%M:%S"),
        uptime = format_uptime(identity.started_instant.elapsed()),
        code = code.as_u16(),
        reason = code.canonical_reason().unwrap_or("Unknown"),
    ));
    let args = escape(&identity.command_line);
    let counter = escape(
        &serde_json::to_string_pretty(&state.counter.snapshot())
            .unwrap_or_else(|_| "{}".to_string()),
    );
    let loaded_at = escape(&snapshot.loaded_at().format("%Y-%m-%dT%H:%M:%S").to_string());
    let redirects = redirects_to_html(snapshot);
    let reload_info = escape(&reload_mechanism(state.options.reload_path.as_deref()));
    let files = escape(
        &serde_json::to_string_pretty(&state.sources.files)
            .unwrap_or_else(|_| "[]".to_string()),
    );

    Html(format!(
        r#"<!DOCTYPE html>

<html lang="en">
  <head>
  <meta charset="utf-8"/>
  <title>{title}</title>
  </head>
  <body>
    <div>
        <h3>Process Information:</h3>
        <pre>
{overall}
        </pre>
    </div>
    <div>
        <h4>Command-line Arguments:</h4>
        <pre>
{args}
        </pre>
    </div>
    <div>
        <h3>Redirects Counter:</h3>
        Counting of successful redirect responses:
        <pre>
{counter}
        </pre>
        <h3>Currently Loaded Redirects:</h3>
        Last Reload Time {loaded_at}
        <pre>
{redirects}
        </pre>
    </div>
    <div>
        <h3>Redirect Files Searched During a Reload {reload_info}:</h3>
        <pre>
{files}
        </pre>
    </div>
  </body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirects::RedirectEntry;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::time::Duration;

    #[test]
    fn uptime_formats() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0:00:00");
        assert_eq!(format_uptime(Duration::from_secs(3_723)), "1:02:03");
        assert_eq!(
            format_uptime(Duration::from_secs(2 * 86_400 + 3_600 + 61)),
            "2 days, 1:01:01"
        );
    }

    #[test]
    fn escape_handles_markup_and_whitespace() {
        assert_eq!(escape("<b>"), "&lt;b&gt;");
        assert_eq!(escape("a\nb"), "a<br />\nb");
        assert_eq!(escape("a  b"), "a&nbsp; b");
    }

    #[test]
    fn anchor_escapes_target() {
        let a = anchor("http://x/?a=1&b=2");
        assert!(a.starts_with("<a href=\""));
        assert!(a.contains("&amp;"));
        assert!(!a.contains("b=2\"\">"));
    }

    #[test]
    fn redirects_render_in_key_order_with_links() {
        let mut entries = BTreeMap::new();
        let created_at = NaiveDate::from_ymd_opt(2019, 9, 7)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        entries.insert(
            "/z".to_string(),
            RedirectEntry {
                to_url: "http://z".to_string(),
                created_by: "bob".to_string(),
                created_at,
            },
        );
        entries.insert(
            "/a".to_string(),
            RedirectEntry {
                to_url: "http://a".to_string(),
                created_by: "<eve>".to_string(),
                created_at,
            },
        );

        let html = redirects_to_html(&RedirectTable::new(entries));
        let a = html.find("/a").unwrap();
        let z = html.find("/z").unwrap();
        assert!(a < z);
        assert!(html.contains("<a href=\"http://a\">http://a</a>"));
        assert!(html.contains("&lt;eve&gt;"));
        assert!(html.contains("2019-09-07 12:00:00"));
    }
}
