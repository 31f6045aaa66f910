//! HTML rendering
//!
//! The page template must already contain the container element (by default
//! `<div id="data-table"></div>`). Each render replaces everything between the
//! container's opening tag and the closing tag that balances it with one
//! `market-table` block per market. Titles and cells are escaped as text.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{RenderError, RenderPlan, RenderTarget, Result, COLUMN_HEADERS};

/// Page shell used when no template file is configured
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="5">
    <title>Market Data</title>
</head>
<body>
    <h1>Market Data</h1>
    <div id="data-table"></div>
</body>
</html>
"#;

// =============================================================================
// Page
// =============================================================================

/// A page template split around its container element
#[derive(Debug, Clone)]
pub struct HtmlPage {
    container_id: String,
    /// Template text up to and including the container's opening tag
    before: String,
    /// Template text from the container's closing tag onwards
    after: String,
}

impl HtmlPage {
    /// Locate the container element in `template`.
    ///
    /// Fails when no element carries `id="<container_id>"` or when that
    /// element has no closing tag.
    pub fn from_template(template: &str, container_id: &str) -> Result<Self> {
        let missing = || RenderError::ContainerMissing(container_id.to_string());
        let unclosed = || RenderError::ContainerUnclosed(container_id.to_string());

        let attr_pos = find_id_attribute(template, container_id).ok_or_else(missing)?;

        let tag_start = template[..attr_pos].rfind('<').ok_or_else(missing)?;
        let tag_name = template[tag_start + 1..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if tag_name.is_empty() {
            return Err(missing());
        }

        let open_end = template[attr_pos..]
            .find('>')
            .map(|i| attr_pos + i + 1)
            .ok_or_else(unclosed)?;
        if template[..open_end].ends_with("/>") {
            return Err(unclosed());
        }

        let close_start =
            find_matching_close(template, &tag_name, open_end).ok_or_else(unclosed)?;

        Ok(Self {
            container_id: container_id.to_string(),
            before: template[..open_end].to_string(),
            after: template[close_start..].to_string(),
        })
    }

    /// The default page with the given container id
    pub fn default_page(container_id: &str) -> Result<Self> {
        let template = DEFAULT_TEMPLATE.replace("data-table", container_id);
        Self::from_template(&template, container_id)
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Full document with the container filled from `plan`
    pub fn render(&self, plan: &RenderPlan) -> String {
        let body = render_container(plan);
        let mut html = String::with_capacity(self.before.len() + body.len() + self.after.len());
        html.push_str(&self.before);
        html.push_str(&body);
        html.push_str(&self.after);
        html
    }
}

/// Byte offset of an `id` attribute whose quoted value is exactly `id`.
///
/// The attribute name is matched without regard to case and may have
/// whitespace around `=`. The value itself is case-sensitive.
fn find_id_attribute(template: &str, id: &str) -> Option<usize> {
    let lower = template.to_ascii_lowercase();

    lower
        .match_indices("id")
        .map(|(pos, _)| pos)
        .find(|&pos| {
            let standalone = template[..pos]
                .chars()
                .next_back()
                .map_or(false, |c| c.is_ascii_whitespace());
            standalone && quoted_value(&template[pos + 2..]) == Some(id)
        })
}

/// Value of `= "..."` or `= '...'` at the start of `rest`
fn quoted_value(rest: &str) -> Option<&str> {
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|&c| c == '"' || c == '\'')?;
    let value = &rest[1..];
    value.find(quote).map(|end| &value[..end])
}

/// Start of the `</tag_name>` that closes the element opened just before `from`.
///
/// Nested elements with the same name are counted, comments are skipped and
/// tag names compare without regard to case.
fn find_matching_close(template: &str, tag_name: &str, from: usize) -> Option<usize> {
    let lower = template.to_ascii_lowercase();
    let open = format!("<{}", tag_name);
    let close = format!("</{}", tag_name);
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(i) = lower[pos..].find('<') {
        let start = pos + i;
        let rest = &lower[start..];

        if rest.starts_with("<!--") {
            pos = start + rest.find("-->").map_or(rest.len(), |end| end + 3);
            continue;
        }

        let tag_end = start + rest.find('>')? + 1;
        if starts_tag(rest, &close) {
            depth -= 1;
            if depth == 0 {
                return Some(start);
            }
        } else if starts_tag(rest, &open) && !lower[..tag_end].ends_with("/>") {
            depth += 1;
        }
        pos = tag_end;
    }

    None
}

/// `rest` begins with `prefix` and the tag name ends right after it
fn starts_tag(rest: &str, prefix: &str) -> bool {
    rest.strip_prefix(prefix)
        .and_then(|after| after.chars().next())
        .map_or(false, |c| c.is_ascii_whitespace() || c == '>' || c == '/')
}

// =============================================================================
// Container Contents
// =============================================================================

/// Inner HTML of the container: one titled table per market
pub fn render_container(plan: &RenderPlan) -> String {
    let mut html = String::new();

    for table in &plan.tables {
        html.push_str("\n<div class=\"market-table\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", escape_text(&table.title)));
        html.push_str("<table>\n<thead>\n<tr>");
        for header in COLUMN_HEADERS {
            html.push_str(&format!("<th>{}</th>", header));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for row in &table.rows {
            html.push_str("<tr>");
            for cell in &row.cells {
                html.push_str(&format!("<td>{}</td>", escape_text(cell)));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>\n</div>\n");
    }

    html
}

/// Escape text so it renders literally inside an element
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>', '"', '\''][..]) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

// =============================================================================
// File Target
// =============================================================================

/// Writes the rendered page to a file on every replace
pub struct HtmlFileTarget {
    page: HtmlPage,
    path: PathBuf,
}

impl HtmlFileTarget {
    pub fn new(page: HtmlPage, path: impl Into<PathBuf>) -> Self {
        Self {
            page,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temp file next to the output, renamed over it once fully written
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RenderTarget for HtmlFileTarget {
    fn replace_contents(&self, plan: &RenderPlan) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let html = self.page.render(plan);
        let temp = self.temp_path();
        fs::write(&temp, html)?;
        fs::rename(&temp, &self.path)?;

        debug!(
            "[HTML] Wrote {} tables to {}",
            plan.market_count(),
            self.path.display()
        );
        Ok(())
    }
}
