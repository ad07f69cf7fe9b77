// Authentication: JWT sessions, password hashing, role middleware

pub mod errors;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use errors::AuthError;
pub use jwt::{extract_bearer_token, JwtService};
pub use middleware::{
    admin_only_middleware, cors_layer, extract_user_session, jwt_auth_middleware,
    security_headers_layer,
};
pub use models::{
    AuthCheck, Claims, LoginRequest, LoginResponse, MessageResponse, UserInfo, UserRole,
    UserSession,
};
pub use service::AuthService;
