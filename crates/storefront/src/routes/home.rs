//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;

use crate::error::Result;
use crate::routes::NavContext;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavContext,
}

/// Display the landing page.
pub async fn home(session: Session) -> Result<HomeTemplate> {
    Ok(HomeTemplate {
        nav: NavContext::load(&session).await?,
    })
}
