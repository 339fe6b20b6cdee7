pub mod dispatch_auth;
