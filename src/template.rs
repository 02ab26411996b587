//! Page template assembler.
//!
//! Pages live on disk under a fixed layout:
//!
//! ```text
//! <html_root>/page/<name>.html   whole documents, or per-page body fragments
//! <html_root>/temp/meta.html     optional <head> includes
//! <html_root>/temp/resources.html
//! <html_root>/temp/header.html   optional shared chrome
//! <html_root>/temp/footer.html
//! <html_root>/temp/scripts.html
//! ```
//!
//! The files are read-only inputs. A missing file is an empty contribution,
//! never an error: a page with no footer simply has no footer.

use std::fs;
use std::path::PathBuf;

use crate::config::{Assembly, SiteConfig};

/// Request-scoped display state, built by the action and passed down
/// explicitly. Never stamped onto a shared model instance.
#[derive(Clone, Debug, Default)]
pub struct PageContext {
    title: Option<String>,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page-specific title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// `"{page title} | {site title}"` when a page title is set, else the
    /// site title alone.
    pub fn full_title(&self, site_title: &str) -> String {
        match &self.title {
            Some(title) => format!("{title} | {site_title}"),
            None => site_title.to_owned(),
        }
    }
}

/// The page model: turns a page name into an HTML string.
pub struct Pages {
    root: PathBuf,
    assembly: Assembly,
    site_title: String,
}

impl Pages {
    pub fn new(site: &SiteConfig) -> Self {
        Self {
            root: site.html_root.clone(),
            assembly: site.assembly,
            site_title: site.title.clone(),
        }
    }

    /// Returns the HTML for `name` under the configured assembly strategy.
    pub fn page(&self, name: &str, cx: &PageContext) -> String {
        match self.assembly {
            Assembly::Verbatim => self.fragment(&format!("page/{name}.html")),
            Assembly::Fragments => self.compose(name, cx),
        }
    }

    /// Composes a full document from fragments around `page/<name>.html`.
    ///
    /// Always structurally valid: doctype, head, and body are emitted even
    /// when every fragment file is missing.
    fn compose(&self, name: &str, cx: &PageContext) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push("<!DOCTYPE html>".to_owned());
        parts.push("<html>".to_owned());
        parts.push("<head>".to_owned());
        self.push_fragment(&mut parts, "temp/meta.html");
        self.push_fragment(&mut parts, "temp/resources.html");
        parts.push(format!("<title>{}</title>", cx.full_title(&self.site_title)));
        parts.push("</head>".to_owned());
        parts.push(format!("<body class=\"{name}\">"));
        self.push_fragment(&mut parts, "temp/header.html");
        self.push_fragment(&mut parts, &format!("page/{name}.html"));
        self.push_fragment(&mut parts, "temp/footer.html");
        self.push_fragment(&mut parts, "temp/scripts.html");
        parts.push("</body>".to_owned());
        parts.push("</html>".to_owned());

        parts.join("\n")
    }

    fn push_fragment(&self, parts: &mut Vec<String>, rel: &str) {
        let fragment = self.fragment(rel);
        if !fragment.is_empty() {
            parts.push(fragment);
        }
    }

    /// Reads one file relative to the HTML root. Missing or unreadable
    /// files contribute the empty string.
    fn fragment(&self, rel: &str) -> String {
        match fs::read_to_string(self.root.join(rel)) {
            Ok(text) => text.trim_end_matches('\n').to_owned(),
            Err(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn site(root: &Path, assembly: Assembly) -> SiteConfig {
        SiteConfig {
            html_root: root.to_path_buf(),
            assembly,
            ..SiteConfig::default()
        }
    }

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn verbatim_returns_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "page/about.html", "<h1>About</h1>\n");

        let pages = Pages::new(&site(dir.path(), Assembly::Verbatim));
        assert_eq!(pages.page("about", &PageContext::new()), "<h1>About</h1>");
    }

    #[test]
    fn verbatim_missing_page_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pages = Pages::new(&site(dir.path(), Assembly::Verbatim));
        assert_eq!(pages.page("ghost", &PageContext::new()), "");
    }

    #[test]
    fn fragments_compose_in_document_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "temp/meta.html", "<meta charset=\"utf-8\">");
        write(dir.path(), "temp/header.html", "<header>top</header>");
        write(dir.path(), "page/home.html", "<main>hello</main>");
        write(dir.path(), "temp/footer.html", "<footer>bottom</footer>");

        let pages = Pages::new(&site(dir.path(), Assembly::Fragments));
        let html = pages.page("home", &PageContext::new().with_title("Home"));

        let expected = "\
<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>Home | Web app</title>
</head>
<body class=\"home\">
<header>top</header>
<main>hello</main>
<footer>bottom</footer>
</body>
</html>";
        assert_eq!(html, expected);
    }

    #[test]
    fn all_fragments_missing_is_still_structurally_valid() {
        let dir = tempfile::tempdir().unwrap();
        let pages = Pages::new(&site(dir.path(), Assembly::Fragments));
        let html = pages.page("void", &PageContext::new());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<head>"));
        assert!(html.contains("<title>Web app</title>"));
        assert!(html.contains("<body class=\"void\">"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn full_title_combines_page_and_site() {
        assert_eq!(
            PageContext::new().with_title("About us").full_title("Web app"),
            "About us | Web app"
        );
        assert_eq!(PageContext::new().full_title("Web app"), "Web app");
    }
}
