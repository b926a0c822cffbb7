//! Page store behavior against a real filesystem.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use statico::cache::{
    CacheConfig, CacheError, DiskFilesystem, PageStore, RequestFacts, ResponseFacts,
};
use tempfile::TempDir;

fn disk_store(workdir: &TempDir) -> (PageStore, String) {
    let root = workdir
        .path()
        .join("static-cache")
        .to_string_lossy()
        .into_owned();
    let config = CacheConfig {
        root: Some(root.clone()),
        ..Default::default()
    };
    (PageStore::new(config, Arc::new(DiskFilesystem)), root)
}

fn get_request(path: &str, query: Option<&str>) -> RequestFacts {
    RequestFacts {
        method: "GET".to_string(),
        path: path.to_string(),
        query: query.map(str::to_string),
    }
}

fn response(content_type: &str, body: &str) -> ResponseFacts {
    ResponseFacts {
        status: 200,
        content_type: Some(content_type.to_string()),
        structured_json: false,
        body: Bytes::from(body.to_string()),
    }
}

#[tokio::test]
async fn stores_html_page_minified_under_slug_path() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);

    store
        .put(
            &get_request("/blog/my-post", None),
            &response("text/html", "<html>\n  <body>post</body>\n</html>"),
        )
        .await
        .expect("put succeeds");

    let stored = std::fs::read_to_string(Path::new(&root).join("blog/my-post.html"))
        .expect("entry exists on disk");
    assert_eq!(stored, "<html><body>post</body></html>");
}

#[tokio::test]
async fn stores_json_with_query_suffix_verbatim() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);
    let body = "{\n  \"id\": 5,\n  \"sort\": \"asc\"\n}";

    store
        .put(
            &get_request("/api/items", Some("id=5&sort=asc")),
            &response("application/json", body),
        )
        .await
        .expect("put succeeds");

    let stored = std::fs::read_to_string(Path::new(&root).join("api/items[id=5&sort=asc].json"))
        .expect("entry exists on disk");
    assert_eq!(stored, body);
}

#[tokio::test]
async fn stores_xml_verbatim_and_forget_removes_it() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);
    let body = "<feed>\n  <entry>first</entry>\n</feed>";

    store
        .put(&get_request("/feed", None), &response("text/xml", body))
        .await
        .expect("put succeeds");

    // XML is never minified.
    let stored =
        std::fs::read_to_string(Path::new(&root).join("feed.xml")).expect("entry exists on disk");
    assert_eq!(stored, body);

    assert!(store.forget("feed").await.expect("forget"));
    assert!(!Path::new(&root).join("feed.xml").exists());
}

#[tokio::test]
async fn root_request_stores_index_token() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);

    store
        .put(&get_request("/", None), &response("text/html", "<p>home</p>"))
        .await
        .expect("put succeeds");

    assert!(Path::new(&root).join("__index.html").is_file());
}

#[tokio::test]
async fn query_sanitization_keeps_file_names_safe() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);

    store
        .put(
            &get_request("/search", Some("q=../../etc/passwd&page=2")),
            &response("text/html", "<p>results</p>"),
        )
        .await
        .expect("put succeeds");

    // Traversal characters are stripped before the name reaches disk.
    assert!(Path::new(&root).join("search[q=etcpasswd&page=2].html").is_file());
    assert!(!workdir.path().join("etc").exists());
}

#[tokio::test]
async fn forget_removes_existing_variant_then_reports_nothing() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);

    store
        .put(
            &get_request("/blog/my-post", None),
            &response("text/html", "<p>post</p>"),
        )
        .await
        .expect("put succeeds");

    assert!(store.forget("blog/my-post").await.expect("first forget"));
    assert!(!Path::new(&root).join("blog/my-post.html").exists());

    assert!(!store.forget("blog/my-post").await.expect("second forget"));
}

#[tokio::test]
async fn clear_removes_the_whole_root_once() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);

    store
        .put(
            &get_request("/blog/a", None),
            &response("text/html", "<p>a</p>"),
        )
        .await
        .expect("put a");
    store
        .put(
            &get_request("/api/b", None),
            &response("application/json", "{}"),
        )
        .await
        .expect("put b");

    assert!(store.clear(None).await.expect("clear"));
    assert!(!Path::new(&root).exists());

    assert!(!store.clear(None).await.expect("second clear is a no-op"));
}

#[tokio::test]
async fn clear_with_pattern_only_touches_matches() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);

    store
        .put(
            &get_request("/blog/a", None),
            &response("text/html", "<p>a</p>"),
        )
        .await
        .expect("put blog entry");
    store
        .put(
            &get_request("/api/b", None),
            &response("application/json", "{}"),
        )
        .await
        .expect("put api entry");

    assert!(store.clear(Some("blog")).await.expect("clear blog"));
    assert!(!Path::new(&root).join("blog").exists());
    assert!(Path::new(&root).join("api/b.json").is_file());

    assert!(!store.clear(Some("blog")).await.expect("nothing left"));
}

#[tokio::test]
async fn repeated_put_overwrites_in_place() {
    let workdir = TempDir::new().expect("tempdir");
    let (store, root) = disk_store(&workdir);
    let request = get_request("/page", None);

    store
        .put(&request, &response("text/html", "<p>first</p>"))
        .await
        .expect("first put");
    store
        .put(&request, &response("text/html", "<p>second</p>"))
        .await
        .expect("second put");

    let stored =
        std::fs::read_to_string(Path::new(&root).join("page.html")).expect("entry exists");
    assert_eq!(stored, "<p>second</p>");
}

#[tokio::test]
async fn unconfigured_store_refuses_operations() {
    let store = PageStore::new(CacheConfig::default(), Arc::new(DiskFilesystem));

    let err = store
        .put(
            &get_request("/blog/my-post", None),
            &response("text/html", "<p>post</p>"),
        )
        .await
        .expect_err("no root configured");
    assert!(matches!(err, CacheError::Configuration { .. }));

    let err = store.forget("blog/my-post").await.expect_err("no root");
    assert!(matches!(err, CacheError::Configuration { .. }));
}
