use rocket::serde::json::Json;
use serde::Serialize;

use crate::guards::auth::CurrentUser;
use crate::links::{self, Links};

#[derive(Serialize)]
pub struct HomeResponse {
    #[serde(rename = "_links")]
    pub links: Links,
}

/// APIの入口。各コレクションへのリンクを返します。
#[get("/")]
pub fn index(_user: CurrentUser) -> Json<HomeResponse> {
    Json(HomeResponse {
        links: links::home_links(),
    })
}

pub fn routes() -> Vec<rocket::Route> {
    routes![index]
}
