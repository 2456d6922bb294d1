//! 针对 posts REST API 的端到端检查
//!
//! 所有路径都是相对路径，由客户端的 base URL 决定目标服务
//! （默认 `https://jsonplaceholder.typicode.com`）。

use std::time::Instant;

use rand::seq::IndexedRandom;
use serde_json::{Value, json};

use crate::assertion::ValueKind;
use crate::http::Request;
use crate::runner::{Suite, TestCase};
use crate::CheckError;

/// `GET /posts` 应返回的条目数
pub const POST_COUNT: usize = 100;

/// 性能诊断中连续发出的请求数
pub const PERFORMANCE_ITERATIONS: usize = 10;

/// 字符串原样使用，其余值按 JSON 文本渲染
fn path_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn posts_suite() -> Suite {
    Suite::new("posts API")
        .before_each(|ctx| {
            Box::pin(async move {
                ctx.request_as(Request::get("/posts")?, "posts").await?;
                Ok(())
            })
        })
        .case(TestCase::new("should return a list of posts", |ctx| {
            Box::pin(async move {
                let posts = ctx.get("posts")?;
                posts.its("status")?.equals(200)?;
                posts.its("body")?.has_length(POST_COUNT)?;
                posts
                    .path("headers.content-type")?
                    .includes("application/json")?;
                Ok(())
            })
        }))
        .case(TestCase::new("should return a specific post", |ctx| {
            Box::pin(async move {
                let body = ctx.get("posts")?.its("body")?;
                body.has_length(POST_COUNT)?;

                let sampled = body
                    .elements()?
                    .choose(&mut rand::rng())
                    .cloned()
                    .ok_or_else(|| CheckError::Other("no posts to sample".to_string()))?;
                let id = sampled.its("id")?;

                let request = Request::get(&format!("/posts/{}", path_segment(id.value())))?;
                let post = ctx.request_as(request, "post").await?;
                post.its("body")?.deep_equals(sampled.into_value())?;
                Ok(())
            })
        }))
        .case(TestCase::new("should have valid userId attribute", |ctx| {
            Box::pin(async move {
                ctx.get("posts")?.its("body")?.each(|post| {
                    post.its("userId")?.is_a(ValueKind::Number)?;
                    Ok(())
                })?;
                Ok(())
            })
        }))
        .case(TestCase::new("should have valid title attribute", |ctx| {
            Box::pin(async move {
                ctx.get("posts")?.its("body")?.each(|post| {
                    post.its("title")?.is_a(ValueKind::String)?;
                    Ok(())
                })?;
                Ok(())
            })
        }))
        .case(TestCase::new("should return error for invalid post ID", |ctx| {
            Box::pin(async move {
                let request = Request::get("/posts/invalid")?.fail_on_status_code(false);
                ctx.request_as(request, "invalidPost").await?;

                ctx.get("invalidPost")?.its("status")?.equals(404)?;
                Ok(())
            })
        }))
        .case(TestCase::new("should create a new post", |ctx| {
            Box::pin(async move {
                let new_post = json!({
                    "title": "New Post",
                    "body": "This is a new post.",
                    "userId": 1
                });

                let request = Request::post("/posts")?.with_json(&new_post)?;
                ctx.request_as(request, "createdPost").await?;

                let created = ctx.get("createdPost")?;
                created.its("status")?.equals(201)?;
                let body = created.its("body")?;
                for field in ["title", "body", "userId"] {
                    body.its(field)?.equals(new_post[field].clone())?;
                }
                Ok(())
            })
        }))
        .case(TestCase::new("should test performance", |ctx| {
            Box::pin(async move {
                let start = Instant::now();
                for _ in 0..PERFORMANCE_ITERATIONS {
                    ctx.request(Request::get("/posts")?).await?;
                }
                let duration = start.elapsed();

                ctx.log(format!(
                    "Performed {} requests in {}ms",
                    PERFORMANCE_ITERATIONS,
                    duration.as_millis()
                ));
                Ok(())
            })
        }))
}
