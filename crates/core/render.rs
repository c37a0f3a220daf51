use bookrec::Candidate;

const SEPARATOR: &str = "---";

/// Renders the `candidates` in order, each followed by a separator line.
pub fn render(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "No books found".to_owned();
    }

    let mut out = String::new();
    for candidate in candidates {
        out.push_str(&render_candidate(candidate));
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}

fn render_candidate(candidate: &Candidate) -> String {
    let mut lines = Vec::with_capacity(4);

    let title = candidate.title().unwrap_or("No title");
    if candidate.authors().is_empty() {
        lines.push(format!("**{title}**"));
    } else {
        lines.push(format!("**{title}** by {}", candidate.authors().join(", ")));
    }

    if let Some(url) = candidate.cover_url() {
        lines.push(format!("Cover: {url}"));
    }
    if !candidate.description().is_empty() {
        lines.push(candidate.description().to_owned());
    }
    if let Some(link) = candidate.preview_link() {
        lines.push(format!("Preview: {link}"));
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
