use std::sync::Arc;

use booky_domain::{
    CommentView, NewComment, NewPost, Panel, PostCardView, PostDetails, PostImage, Toast,
};
use tracing::warn;

use crate::ApplicationResult;
use crate::context::AppContext;

/// The post feed and comment threads.
#[derive(Clone)]
pub struct PostsController {
    ctx: Arc<AppContext>,
}

impl PostsController {
    /// Creates the controller.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Loads the feed, optionally limited to one community.
    pub async fn load(&self, community_filter: Option<&str>) -> Panel<PostCardView> {
        let panel = match self.ctx.api().posts(community_filter).await {
            Ok(posts) => Panel::from_items(
                posts.iter().map(PostCardView::from).collect(),
                "No posts yet. Start the conversation!",
            ),
            Err(e) => {
                warn!(error = %e, "posts load failed");
                Panel::error("Could not load posts")
            }
        };
        self.ctx.update_screen(|s| s.posts = panel.clone()).await;
        panel
    }

    /// Publishes a post, then reloads the feed with the same filter.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank body (no network call),
    /// otherwise the API error.
    pub async fn create(
        &self,
        body: &str,
        community_id: Option<String>,
        image: Option<PostImage>,
    ) -> ApplicationResult<()> {
        let body = body.trim();
        if body.is_empty() {
            return Err(self.ctx.reject("Write something before publishing"));
        }
        let community_id = community_id.filter(|id| !id.trim().is_empty());
        let post = NewPost {
            body: body.to_string(),
            community_id: community_id.clone(),
        };
        if let Err(e) = self.ctx.api().create_post(&post, image).await {
            self.ctx.report("Could not publish the post", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success("Post published"));
        self.load(community_id.as_deref()).await;
        Ok(())
    }

    /// Loads the comments of a post.
    pub async fn details(&self, post_id: &str) -> Panel<CommentView> {
        let comments = match self.ctx.api().post_comments(post_id).await {
            Ok(comments) => Panel::from_items(
                comments.iter().map(CommentView::from).collect(),
                "No comments yet",
            ),
            Err(e) => {
                warn!(error = %e, post_id, "comments load failed");
                Panel::error("Could not load comments")
            }
        };
        let details = PostDetails {
            post_id: post_id.to_string(),
            comments: comments.clone(),
        };
        self.ctx
            .update_screen(|s| s.post_details = Some(details))
            .await;
        comments
    }

    /// Adds a comment, then reloads the thread.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank comment (no network call),
    /// otherwise the API error.
    pub async fn comment(&self, post_id: &str, body: &str) -> ApplicationResult<()> {
        let body = body.trim();
        if body.is_empty() {
            return Err(self.ctx.reject("Write a comment first"));
        }
        let comment = NewComment {
            post_id: post_id.to_string(),
            body: body.to_string(),
        };
        if let Err(e) = self.ctx.api().add_comment(&comment).await {
            self.ctx.report("Could not add the comment", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success("Comment added"));
        self.details(post_id).await;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use booky_domain::{HttpMethod, MultipartPart, PartKind, RequestBody, ToastKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_load_with_filter() {
        let harness = Harness::signed_in("u1").await;
        harness.http.respond(
            HttpMethod::Get,
            "/posts",
            200,
            json!([{"id": 1, "body": "Hello\nworld", "commentsCount": 2}]),
        );
        let panel = PostsController::new(harness.ctx.clone())
            .load(Some("c1"))
            .await;
        assert_eq!(panel.items()[0].title, "Hello");
        assert_eq!(panel.items()[0].content, "world");
        assert_eq!(panel.items()[0].community, "General");
        assert_eq!(harness.http.calls()[0].query, "communityId=c1");
    }

    #[tokio::test]
    async fn test_create_sends_multipart() {
        let harness = Harness::signed_in("u1").await;
        harness.http.respond(HttpMethod::Post, "/posts", 201, json!({}));
        harness.http.respond(HttpMethod::Get, "/posts", 200, json!([]));
        let image = PostImage {
            file_name: "cover.png".into(),
            bytes: vec![1, 2, 3],
        };
        PostsController::new(harness.ctx.clone())
            .create(" Hi ", None, Some(image))
            .await
            .unwrap();

        let call = &harness.http.calls_to(HttpMethod::Post, "/posts")[0];
        let RequestBody::Multipart(parts) = &call.body else {
            panic!("expected multipart body");
        };
        assert_eq!(
            parts[0],
            MultipartPart::json("post", &json!({"body": "Hi", "communityId": null})).unwrap()
        );
        assert_eq!(parts[1].name, "image");
        assert!(matches!(&parts[1].kind, PartKind::File { file_name, .. } if file_name == "cover.png"));
        assert!(harness.ctx.screen().await.posts.is_empty());
    }

    #[tokio::test]
    async fn test_blank_post_and_comment_rejected() {
        let harness = Harness::signed_in("u1").await;
        let controller = PostsController::new(harness.ctx.clone());
        assert!(controller.create("\n ", None, None).await.is_err());
        assert!(controller.comment("p1", "").await.is_err());
        assert!(harness.http.calls().is_empty());
        assert_eq!(harness.notifier.messages(ToastKind::Warning).len(), 2);
    }

    #[tokio::test]
    async fn test_comment_payload_and_reload() {
        let harness = Harness::signed_in("u1").await;
        harness.http.respond(HttpMethod::Post, "/comments", 201, json!({}));
        harness.http.respond(
            HttpMethod::Get,
            "/posts/p1/comments",
            200,
            json!([{"id": 1, "body": "Nice", "user": {"id": "u2", "name": "Bea"}}]),
        );
        PostsController::new(harness.ctx.clone())
            .comment("p1", " Nice ")
            .await
            .unwrap();

        let call = &harness.http.calls_to(HttpMethod::Post, "/comments")[0];
        assert_eq!(call.json(), json!({"postId": "p1", "body": "Nice"}));
        let details = harness.ctx.screen().await.post_details.unwrap();
        assert_eq!(details.post_id, "p1");
        assert_eq!(details.comments.items()[0].author, "Bea");
    }
}
