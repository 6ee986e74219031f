use booky_domain::{ApiRequest, Comment, MultipartPart, NewComment, NewPost, Post, PostImage};

use super::BookyApi;
use crate::ApplicationResult;

impl BookyApi {
    /// `GET /posts`, optionally filtered by community.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn posts(&self, community_id: Option<&str>) -> ApplicationResult<Vec<Post>> {
        let mut request = ApiRequest::get("/posts");
        if let Some(id) = community_id.filter(|id| !id.is_empty()) {
            request = request.with_query("communityId", id);
        }
        self.send_list(request).await
    }

    /// `POST /posts` as multipart: a JSON `post` part and an optional `image`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self, image), fields(has_image = image.is_some()))]
    pub async fn create_post(
        &self,
        post: &NewPost,
        image: Option<PostImage>,
    ) -> ApplicationResult<()> {
        let mut parts = vec![MultipartPart::json("post", post)?];
        if let Some(image) = image {
            parts.push(MultipartPart::file("image", image.file_name, image.bytes));
        }
        self.send_unit(ApiRequest::post("/posts").with_multipart(parts))
            .await
    }

    /// `GET /posts/{id}/comments`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn post_comments(&self, post_id: &str) -> ApplicationResult<Vec<Comment>> {
        self.send_list(ApiRequest::get(format!("/posts/{post_id}/comments")))
            .await
    }

    /// `POST /comments`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn add_comment(&self, comment: &NewComment) -> ApplicationResult<()> {
        self.send_unit(ApiRequest::post("/comments").with_json(comment)?)
            .await
    }
}
