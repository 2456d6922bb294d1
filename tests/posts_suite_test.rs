use restcheck::http::Client;
use restcheck::runner::{CaseState, RunOptions};
use restcheck::suites::posts::{POST_COUNT, posts_suite};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn fixture_posts(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|id| {
            json!({
                "userId": (id - 1) / 10 + 1,
                "id": id,
                "title": format!("post title {}", id),
                "body": format!("post body {}", id)
            })
        })
        .collect()
}

/// 按路径中的 id 返回对应条目，数字和字符串 id 都支持
struct PostById {
    posts: Vec<Value>,
}

impl Respond for PostById {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segment = request.url.path().rsplit('/').next().unwrap_or_default();

        let matches = |post: &&Value| match &post["id"] {
            Value::String(id) => id == segment,
            id => id.to_string() == segment,
        };
        match self.posts.iter().find(matches) {
            Some(post) => ResponseTemplate::new(200).set_body_json(post),
            None => ResponseTemplate::new(404).set_body_json(json!({})),
        }
    }
}

/// 回显提交的字段并分配 id 101
struct CreatePost;

impl Respond for CreatePost {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut body: Value = request.body_json().unwrap_or_else(|_| json!({}));
        body["id"] = json!(101);
        ResponseTemplate::new(201).set_body_json(body)
    }
}

/// 模拟 posts API
async fn posts_server(posts: Vec<Value>) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&posts))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/posts/[^/]+$"))
        .respond_with(PostById { posts })
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts/invalid"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(CreatePost)
        .mount(&mock_server)
        .await;

    mock_server
}

fn client_for(server: &MockServer) -> Client {
    Client::new()
        .unwrap()
        .with_base_url(url::Url::parse(&server.uri()).unwrap())
}

/// 完整套件在正常服务上全部通过
#[tokio::test]
async fn test_posts_suite_passes() {
    let mock_server = posts_server(fixture_posts(POST_COUNT)).await;

    let report = posts_suite()
        .run(&client_for(&mock_server), &RunOptions::default())
        .await;

    for result in &report.results {
        assert!(
            result.passed(),
            "case '{}' failed: {:?}",
            result.name,
            result.error
        );
    }
    assert_eq!(report.summary.total, 7);
    assert_eq!(report.summary.passed, 7);

    // 每个用例 1 次 before_each，外加详情、404、创建各 1 次，性能用例 10 次
    assert_eq!(report.summary.requests, 7 + 1 + 1 + 1 + 10);
    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 20);

    let performance = report.result("should test performance").unwrap();
    assert_eq!(performance.requests, 11);
    assert_eq!(performance.diagnostics.len(), 1);
    assert!(performance.diagnostics[0].starts_with("Performed 10 requests in "));
}

/// 字符串 id 原样拼进路径，不带 JSON 引号
#[tokio::test]
async fn test_specific_post_with_string_ids() {
    let posts: Vec<Value> = fixture_posts(POST_COUNT)
        .into_iter()
        .map(|mut post| {
            post["id"] = json!(format!("post-{}", post["id"]));
            post
        })
        .collect();
    let mock_server = posts_server(posts).await;

    let options = RunOptions {
        filter: Some("specific post".to_string()),
    };
    let report = posts_suite()
        .run(&client_for(&mock_server), &options)
        .await;

    let result = report.result("should return a specific post").unwrap();
    assert!(result.passed(), "unexpected error: {:?}", result.error);

    let received = mock_server.received_requests().await.unwrap();
    let detail = received.last().unwrap();
    assert!(detail.url.path().starts_with("/posts/post-"));
    assert!(!detail.url.path().contains("%22"));
}

/// 条目数量不对时列表和详情用例失败，类型检查仍然通过
#[tokio::test]
async fn test_wrong_post_count_fails_length_checks() {
    let mock_server = posts_server(fixture_posts(99)).await;

    let report = posts_suite()
        .run(&client_for(&mock_server), &RunOptions::default())
        .await;

    let list = report.result("should return a list of posts").unwrap();
    assert!(list.failed());
    assert_eq!(list.failed_during, Some(CaseState::Asserting));
    let error = list.error.as_deref().unwrap();
    assert!(error.contains("@posts.body"), "unexpected error: {}", error);
    assert!(error.contains("have length 100"), "unexpected error: {}", error);

    assert!(report.result("should return a specific post").unwrap().failed());
    assert!(report.result("should have valid userId attribute").unwrap().passed());
    assert_eq!(report.summary.failed, 2);
}

/// 字段类型错误时逐元素检查在第一个坏元素处失败
#[tokio::test]
async fn test_bad_user_id_type_is_reported() {
    let mut posts = fixture_posts(POST_COUNT);
    posts[4]["userId"] = json!("1");
    posts[9]["userId"] = json!(null);
    let mock_server = posts_server(posts).await;

    let options = RunOptions {
        filter: Some("userId".to_string()),
    };
    let report = posts_suite()
        .run(&client_for(&mock_server), &options)
        .await;

    assert_eq!(report.summary.skipped, 6);
    let result = report.result("should have valid userId attribute").unwrap();
    assert!(result.failed());
    let error = result.error.as_deref().unwrap();
    assert!(error.contains("@posts.body[4].userId"), "unexpected error: {}", error);
    assert!(!error.contains("body[9]"));
}

/// 服务不可达时所有用例在请求阶段失败
#[tokio::test]
async fn test_unreachable_server_fails_every_case() {
    let client = Client::new()
        .unwrap()
        .with_base_url(url::Url::parse("http://127.0.0.1:1").unwrap());

    let report = posts_suite().run(&client, &RunOptions::default()).await;

    assert_eq!(report.summary.failed, 7);
    for result in &report.results {
        assert_eq!(result.failed_during, Some(CaseState::Requesting));
        assert_eq!(result.requests, 1);
    }
}
