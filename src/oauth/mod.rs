pub mod authorization_request;
pub mod return_target;
