// Route handlers, one module per resource. Every handler answers with the
// `{status, message, data}` envelope from `middleware::response`.

pub mod form;
pub mod galleries;
pub mod influencers;
pub mod media;
pub mod news;
pub mod system;
pub mod users;
