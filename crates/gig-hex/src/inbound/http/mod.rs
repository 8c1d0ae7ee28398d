mod server;

pub use server::{AppState, HttpServer, HttpServerConfig, LoginRequest, RegisterRequest};
