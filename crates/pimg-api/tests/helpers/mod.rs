//! Test helpers: build the router against a mockito GitHub server.
//!
//! Run from workspace root: `cargo test -p pimg-api`.

pub mod fixtures;

use axum_test::TestServer;
use pimg_api::setup::{build_state, routes};
use pimg_core::{BaseConfig, Config, GitHubConfig, StorageStrategy};

/// Origin used in synthesized image URLs during tests.
pub const TEST_ORIGIN: &str = "http://localhost:8787";

/// Test application: HTTP server plus the fake GitHub API it talks to.
pub struct TestApp {
    pub server: TestServer,
    pub github: mockito::ServerGuard,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config(api_base_url: &str, strategy: StorageStrategy) -> Config {
    Config {
        base: BaseConfig {
            server_port: 8787,
            environment: "test".to_string(),
            public_base_url: Some(TEST_ORIGIN.to_string()),
            max_upload_size_bytes: 1024 * 1024,
            http_concurrency_limit: 64,
        },
        github: GitHubConfig {
            api_base_url: api_base_url.to_string(),
            user_agent: "Pimg-Worker".to_string(),
            request_timeout_secs: 5,
            gist_public: false,
            default_repository: None,
            branch: "main".to_string(),
            commit_path: "images".to_string(),
        },
        storage_strategy: strategy,
    }
}

pub async fn setup_test_app(strategy: StorageStrategy) -> TestApp {
    setup_test_app_with(strategy, |_| {}).await
}

/// Like [`setup_test_app`] but lets the caller adjust the config first.
pub async fn setup_test_app_with(
    strategy: StorageStrategy,
    customize: impl FnOnce(&mut Config),
) -> TestApp {
    let github = mockito::Server::new_async().await;
    let mut config = create_test_config(&github.url(), strategy);
    customize(&mut config);

    let state = build_state(config).expect("Failed to build app state");
    let server = TestServer::new(routes::setup_routes(state)).expect("Failed to create test server");

    TestApp { server, github }
}
