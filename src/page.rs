//! The page controller: static site pages served through the model/view
//! chain.

use std::collections::HashMap;

use crate::action::{Action, BoxedAction};
use crate::controller::{Context, Controller};
use crate::locale::Localizations;
use crate::response::{Response, Status};
use crate::template::{PageContext, Pages};

/// Serves `home`, `about`, and `contact` plus the `not_found` fallback.
///
/// Expects a [`Pages`] model registered as `"page"`. Each action sets its
/// page title on a fresh [`PageContext`] and delegates to the shared
/// build-page routine.
pub struct PageController {
    actions: HashMap<&'static str, BoxedAction>,
}

impl PageController {
    pub fn new() -> Self {
        let mut actions: HashMap<&'static str, BoxedAction> = HashMap::new();
        actions.insert("index", home.into_boxed_action());
        actions.insert("home", home.into_boxed_action());
        actions.insert("about", about.into_boxed_action());
        actions.insert("contact", contact.into_boxed_action());
        actions.insert("not_found", not_found.into_boxed_action());
        Self { actions }
    }
}

impl Default for PageController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for PageController {
    fn action(&self, name: &str) -> Option<BoxedAction> {
        self.actions.get(name).cloned()
    }
}

async fn home(cx: Context) -> Response {
    build_page(&cx, "home", PageContext::new()).await
}

async fn about(cx: Context) -> Response {
    build_page(&cx, "about", PageContext::new().with_title("About us")).await
}

async fn contact(cx: Context) -> Response {
    build_page(&cx, "contact", PageContext::new().with_title("Contact us")).await
}

async fn not_found(cx: Context) -> Response {
    build_page(&cx, "not_found", PageContext::new().with_title("Not found"))
        .await
        .with_status(Status::NotFound)
}

/// Fetch the page from the model, substitute tokens, hand to the view.
///
/// A missing page model is logged and recorded on the request's error list,
/// then degrades to a bare 404, never a fatal failure.
async fn build_page(cx: &Context, name: &str, page_cx: PageContext) -> Response {
    let pages = match cx.models().get::<Pages>("page") {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!(page = name, error = %e, "page model unavailable");
            cx.errors().record(e.to_string());
            return Response::status(Status::NotFound);
        }
    };

    let source = pages.page(name, &page_cx);
    let html = Localizations::new(cx.site(), &page_cx).render(&source);
    cx.view().render(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Assembly, SiteConfig};
    use crate::model::Models;
    use std::fs;
    use std::sync::Arc;

    fn context_with_pages() -> (tempfile::TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("page")).unwrap();
        fs::write(
            dir.path().join("page/about.html"),
            "<main>{$ABOUT_TITLE$}</main>",
        )
        .unwrap();

        let mut site = SiteConfig {
            html_root: dir.path().to_path_buf(),
            assembly: Assembly::Fragments,
            ..SiteConfig::default()
        };
        site.strings.insert("ABOUT_TITLE".to_owned(), "About Us title".to_owned());

        let models = Models::new().register("page", Pages::new(&site));
        let cx = Context::new(Arc::new(site), Arc::new(models));
        (dir, cx)
    }

    #[tokio::test]
    async fn about_renders_substituted_page() {
        let (_dir, cx) = context_with_pages();
        let res = about(cx).await;
        assert_eq!(res.status_code(), 200);

        let body = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(body.contains("<title>About us | Web app</title>"));
        assert!(body.contains("<main>About Us title</main>"));
        assert!(!body.contains("{$"));
    }

    #[tokio::test]
    async fn not_found_action_is_a_404_page() {
        let (_dir, cx) = context_with_pages();
        let res = not_found(cx).await;
        assert_eq!(res.status_code(), 404);

        let body = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(body.contains("<title>Not found | Web app</title>"));
    }

    #[tokio::test]
    async fn missing_page_model_degrades_and_records() {
        let cx = Context::new(
            Arc::new(SiteConfig::default()),
            Arc::new(Models::new()),
        );
        let errors = cx.errors().clone();

        let res = home(cx).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(errors.len(), 1);
        assert!(errors.messages()[0].contains("page"));
    }

    #[test]
    fn action_table_is_closed() {
        let controller = PageController::new();
        assert!(controller.action("about").is_some());
        assert!(controller.action("not_found").is_some());
        assert!(controller.action("build_page").is_none());
        assert!(controller.action("drop_tables").is_none());
    }
}
