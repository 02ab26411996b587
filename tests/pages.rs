//! End-to-end page serving through `App::handle`: the full
//! resolve → dispatch → assemble → substitute → render chain, no socket.

use std::fs;
use std::path::Path;

use plinth::{App, Assembly, Config, Models, PageController, Pages, Router};

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn app(root: &Path) -> App {
    let mut config = Config::from_toml(
        r#"
        [site]
        title = "Demo site"
        base_path = "webapp"
        assembly = "fragments"

        [site.strings]
        HOME_TITLE = "Welcome home"
        "#,
    )
    .unwrap();
    config.site.html_root = root.to_path_buf();
    assert_eq!(config.site.assembly, Assembly::Fragments);

    let models = Models::new().register("page", Pages::new(&config.site));
    let router = Router::new(&config.site).mount("page", PageController::new());
    App::new(config.site, models, router)
}

fn fixture(root: &Path) {
    write(root, "temp/header.html", "<header>{$SITE_TITLE$}</header>");
    write(root, "page/home.html", "<main>{$HOME_TITLE$}</main>");
    write(root, "page/about.html", "<main>about us</main>");
    write(root, "page/not_found.html", "<main>nothing here</main>");
}

#[tokio::test]
async fn root_path_serves_the_home_page() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());

    let res = app(dir.path()).handle("/").await;
    assert_eq!(res.status_code(), 200);

    let body = String::from_utf8(res.body().to_vec()).unwrap();
    assert!(body.contains("<title>Demo site</title>"));
    assert!(body.contains("<header>Demo site</header>"));
    assert!(body.contains("<main>Welcome home</main>"));
}

#[tokio::test]
async fn named_action_serves_its_page() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());

    let res = app(dir.path()).handle("/page/about").await;
    assert_eq!(res.status_code(), 200);

    let body = String::from_utf8(res.body().to_vec()).unwrap();
    assert!(body.contains("<title>About us | Demo site</title>"));
    assert!(body.contains("<main>about us</main>"));
    assert!(body.contains("<body class=\"about\">"));
}

#[tokio::test]
async fn base_path_prefix_is_transparent() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());

    let direct = app(dir.path()).handle("/page/about").await;
    let prefixed = app(dir.path()).handle("/webapp/page/about").await;
    assert_eq!(direct.body(), prefixed.body());
}

#[tokio::test]
async fn unknown_controller_serves_the_not_found_page() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());

    let res = app(dir.path()).handle("/bogus/whatever").await;
    assert_eq!(res.status_code(), 404);

    let body = String::from_utf8(res.body().to_vec()).unwrap();
    assert!(body.contains("<main>nothing here</main>"));
    assert!(body.contains("<title>Not found | Demo site</title>"));
}

#[tokio::test]
async fn unknown_action_serves_the_not_found_page() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());

    let res = app(dir.path()).handle("/page/bogus").await;
    assert_eq!(res.status_code(), 404);
}

#[tokio::test]
async fn every_path_yields_a_response() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());

    for path in ["", "/", "//", "/a/b/c/d/e", "/page", "/page/", "/page/about?x=1"] {
        let res = app.handle(path).await;
        assert!(
            res.status_code() == 200 || res.status_code() == 404,
            "path {path:?} produced status {}",
            res.status_code()
        );
    }
}
