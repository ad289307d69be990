use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io;
use std::path::Path;
use tokio::fs;

// Everything but unreserved characters and the path separator.
const HREF: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, PartialEq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

pub async fn read_entries(dir: &Path) -> Result<Vec<Entry>, io::Error> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let is_symlink = entry.file_type().await?.is_symlink();
        // follows symlinks, a link to a directory is navigable
        let is_dir = fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

pub fn render(display_path: &str, entries: &[Entry]) -> String {
    let title = format!("Directory listing for {}", escape(display_path));
    let items = entries
        .iter()
        .map(|entry| {
            let (display, link) = match (entry.is_dir, entry.is_symlink) {
                (true, false) => (format!("{}/", entry.name), format!("{}/", entry.name)),
                (true, true) => (format!("{}@", entry.name), format!("{}/", entry.name)),
                (false, true) => (format!("{}@", entry.name), entry.name.clone()),
                (false, false) => (entry.name.clone(), entry.name.clone()),
            };
            format!(
                "<li><a href=\"{href}\">{text}</a></li>\n",
                href = utf8_percent_encode(&link, HREF),
                text = escape(&display)
            )
        })
        .collect::<String>();
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body>\n",
            "<h1>{title}</h1>\n",
            "<hr>\n",
            "<ul>\n",
            "{items}",
            "</ul>\n",
            "<hr>\n",
            "</body>\n",
            "</html>\n",
        ),
        title = title,
        items = items
    )
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> Entry {
        Entry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn marks_directories_and_links() {
        let html = render(
            "/",
            &[
                entry("assets", true, false),
                entry("current", true, true),
                entry("latest.txt", false, true),
                entry("notes.txt", false, false),
            ],
        );
        assert!(html.contains("<title>Directory listing for /</title>"));
        assert!(html.contains("<li><a href=\"assets/\">assets/</a></li>"));
        assert!(html.contains("<li><a href=\"current/\">current@</a></li>"));
        assert!(html.contains("<li><a href=\"latest.txt\">latest.txt@</a></li>"));
        assert!(html.contains("<li><a href=\"notes.txt\">notes.txt</a></li>"));
    }

    #[test]
    fn escapes_names() {
        let html = render("/<dir>/", &[entry("a&b <c>.html", false, false)]);
        assert!(html.contains("Directory listing for /&lt;dir&gt;/"));
        assert!(html.contains("href=\"a%26b%20%3Cc%3E.html\""));
        assert!(html.contains(">a&amp;b &lt;c&gt;.html</a>"));
    }

    #[tokio::test]
    async fn sorts_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("A.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();

        assert_eq!(
            entries,
            vec![
                entry("A.txt", false, false),
                entry("b.txt", false, false),
                entry("c", true, false),
            ]
        );
    }
}
