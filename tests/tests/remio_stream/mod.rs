mod forward_http;
mod seekable_http;
