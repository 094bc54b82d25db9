use askama::Template;
use cm_core::models::{Community, Post, User};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub communities: &'a [Community],
    pub current_user: Option<&'a User>,
}

#[derive(Template)]
#[template(path = "community.html")]
pub struct CommunityTemplate<'a> {
    pub title: &'a str,
    pub community: &'a Community,
    pub posts: &'a [Post],
    pub current_user: Option<&'a User>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate<'a> {
    pub title: &'a str,
    pub community: &'a Community,
    pub post: &'a Post,
    pub current_user: Option<&'a User>,
}
