mod http;

pub use http::HttpSource;
