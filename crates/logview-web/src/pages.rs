//! HTML rendering for the human-facing pages.
//!
//! Two pages, both rendered server-side into plain strings: the project
//! table on the landing page, and the per-project viewer that subscribes to
//! the event stream. The markup is small enough that `format!` plus explicit
//! escaping stays readable; a template engine would be more machinery than
//! page.

use logview_core::ProjectRegistry;

/// Landing page: the current project table plus usage hints.
pub fn config_table(registry: &ProjectRegistry) -> String {
    let mut rows = String::new();
    for (name, path) in registry.iter() {
        rows.push_str("      <tr><td>");
        rows.push_str(&escape(name));
        rows.push_str("</td><td>");
        rows.push_str(&escape(&path.display().to_string()));
        rows.push_str("</td></tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head><title>logview</title></head>
  <body>
    <h2>Projects</h2>
    <p>Open <code>/&lt;project&gt;</code> to watch a log live, or consume
    <code>/log_stream/&lt;project&gt;</code> directly as an event stream.</p>
    <table border="1">
      <tr><th>Project</th><th>Log file</th></tr>
{rows}    </table>
  </body>
</html>
"#
    )
}

/// Per-project viewer: subscribes to the project's event stream and appends
/// each delivered line to the page.
///
/// The stream URL is derived from `location.pathname` in the browser, so the
/// project name never has to be embedded into the script.
pub fn viewer(project: &str) -> String {
    let name = escape(project);
    format!(
        r#"<!DOCTYPE html>
<html>
  <head><title>{name} - logview</title></head>
  <body>
    <h2>{name}</h2>
    <pre id="log"></pre>
    <script>
      const log = document.getElementById("log");
      const source = new EventSource("/log_stream" + window.location.pathname);
      source.onmessage = (event) => {{
        log.textContent += event.data + "\n";
        window.scrollTo(0, document.body.scrollHeight);
      }};
    </script>
  </body>
</html>
"#
    )
}

/// Minimal HTML escaping for text nodes and attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
