pub mod articles;
pub mod users;

pub use articles::{ArticleStore, PgArticleStore};
pub use users::{PgUserStore, UserStore};
