#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POPULAR: &str = include_str!("../../../fixtures/tmdb/movie_popular.json");
const CONFIGURATION: &str = include_str!("../../../fixtures/tmdb/configuration.json");
const GENRE_MOVIE: &str = include_str!("../../../fixtures/tmdb/genre_movie_list.json");
const GENRE_TV: &str = include_str!("../../../fixtures/tmdb/genre_tv_list.json");
const DETAILS: &str = include_str!("../../../fixtures/tmdb/movie_details_278.json");
const CREDITS: &str = include_str!("../../../fixtures/tmdb/movie_credits_278.json");
const VIDEOS: &str = include_str!("../../../fixtures/tmdb/movie_videos_278.json");
const NOT_FOUND: &str = r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#;

/// Mounts the catalog endpoints every command loads first.
async fn mount_catalog(server: &MockServer) {
    for (route, body) in [
        ("/3/configuration", CONFIGURATION),
        ("/3/genre/movie/list", GENRE_MOVIE),
        ("/3/genre/tv/list", GENRE_TV),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }
}

/// Writes a config pointing at the mock server with a short backoff.
fn write_config(dir: &std::path::Path, server: &MockServer) {
    let content = format!(
        "[api]\nbase_url = \"{}/3/\"\n\n[retry]\nmax_retries = 2\ndelay_base_ms = 10\n",
        server.uri()
    );
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_help_lists_commands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("trending"))
        .stdout(predicate::str::contains("top-rated"))
        .stdout(predicate::str::contains("explore"));
}

#[test]
fn test_search_requires_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_explore_rejects_unknown_sort() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.args(["explore", "--media", "movie", "--sort-by", "rating"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sort order 'rating'"));
}

#[test]
fn test_missing_token_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env_remove("TMDB_API_TOKEN")
        .env("MOVIX_MODE", "production")
        .arg("--dir")
        .arg(dir.path())
        .arg("popular")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Something went wrong."))
        .stdout(predicate::str::contains(
            "TMDB_API_TOKEN environment variable is required",
        ));
}

#[test]
fn test_invalid_config_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[retry\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .arg("--dir")
        .arg(dir.path())
        .arg("genres")
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed to parse"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_popular_end_to_end() {
    // Arrange
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(POPULAR))
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .env("MOVIX_MODE", "production")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .arg("popular")
        .assert()
        .success()
        .stdout(predicate::str::contains("What's Popular"))
        .stdout(predicate::str::contains("The Shawshank Redemption"))
        .stdout(predicate::str::contains("23 Sep, 1994"))
        .stdout(predicate::str::contains("Drama, Crime"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_popular_retries_server_error() {
    // Arrange
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_string(POPULAR))
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .env("MOVIX_MODE", "production")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .arg("popular")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retrying"))
        .stdout(predicate::str::contains("The Shawshank Redemption"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_details_fail() {
    // Arrange
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    for route in ["/3/movie/999999999", "/3/movie/999999999/credits"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(404).set_body_string(NOT_FOUND))
            .mount(&mock_server)
            .await;
    }
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .env("MOVIX_MODE", "production")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["details", "--media", "movie", "--id", "999999999"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Something went wrong."))
        .stdout(predicate::str::contains(
            "The resource you requested could not be found.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_hides_people() {
    // Arrange
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/3/search/multi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("../../../fixtures/tmdb/search_multi_batman.json")),
        )
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .env("MOVIX_MODE", "production")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["search", "--query", "batman"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search results of 'batman'"))
        .stdout(predicate::str::contains("Batman Begins"))
        .stdout(predicate::str::contains("Bruce Wayne").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_loads_requested_pages() {
    // Arrange
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    for (page, title, calls) in [
        (1, "Batman Begins", 1_u64),
        (2, "Batman Returns", 1),
        (3, "Batman Forever", 0),
    ] {
        let body = format!(
            r#"{{"results":[{{"id":{page},"media_type":"movie","title":"{title}"}}],"total_pages":3,"total_results":3}}"#
        );
        Mock::given(method("GET"))
            .and(path("/3/search/multi"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(calls)
            .mount(&mock_server)
            .await;
    }
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .env("MOVIX_MODE", "production")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["search", "--query", "batman", "--pages", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batman Begins"))
        .stdout(predicate::str::contains("Batman Returns"))
        .stdout(predicate::str::contains("Batman Forever").not())
        .stdout(predicate::str::contains("Total: 2 titles"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_details_lists_cast_profiles() {
    // Arrange
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    for (route, body) in [
        ("/3/movie/278", DETAILS),
        ("/3/movie/278/credits", CREDITS),
        ("/3/movie/278/videos", VIDEOS),
        ("/3/movie/278/similar", r#"{"results":[]}"#),
        ("/3/movie/278/recommendations", r#"{"results":[]}"#),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&mock_server)
            .await;
    }
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .env("MOVIX_MODE", "production")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .args(["details", "--media", "movie", "--id", "278"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== Top Cast =="))
        .stdout(predicate::str::contains(
            "https://image.tmdb.org/t/p/original/djLVFETFTvPyVUdrd7aLVykobof.jpg",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_home_banner_shares_top_rated_request() {
    // Arrange
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;
    for (route, calls) in [
        ("/3/trending/movie/day", 1_u64),
        ("/3/movie/popular", 1),
        ("/3/movie/top_rated", 1),
        ("/3/movie/upcoming", 0),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(POPULAR))
            .expect(calls)
            .mount(&mock_server)
            .await;
    }
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("movix");
    cmd.env("TMDB_API_TOKEN", "test-token")
        .env("MOVIX_MODE", "production")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(dir.path())
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backdrop: https://image.tmdb.org/t/p/original/"))
        .stdout(predicate::str::contains("== Top Rated =="));
}
