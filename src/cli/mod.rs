mod commands;
mod handlers;

pub use commands::{Cli, Commands, GlobalArgs};
pub use handlers::{
    handle_check, handle_get, handle_list, handle_nav, handle_related, handle_serve,
    handle_sitemap,
};
