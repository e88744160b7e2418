//! Wire messages for the `todo` package (see `proto/todo.proto`).
//!
//! Kept by hand instead of generated at build time so the gateway builds
//! without `protoc`. Field tags must match the .proto file.

pub mod paths {
    pub const REGISTER_USER: &str = "/todo.Auth/RegisterUser";
    pub const LOGIN_USER: &str = "/todo.Auth/LoginUser";

    pub const CREATE_TASK: &str = "/todo.DBWork/CreateTask";
    pub const DELETE_TASK: &str = "/todo.DBWork/DeleteTask";
    pub const DONE_TASK: &str = "/todo.DBWork/DoneTask";
    pub const GET_ALL_TASK: &str = "/todo.DBWork/GetAllTask";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginResponse {
    #[prost(string, tag = "1")]
    pub token: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateRequest {
    #[prost(string, tag = "1")]
    pub title: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(int64, tag = "3")]
    pub userid: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateResponse {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub userid: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DoneRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub userid: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DoneResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAllRequest {
    #[prost(int64, tag = "1")]
    pub userid: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Task {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(bool, tag = "4")]
    pub done: bool,
    #[prost(int64, tag = "5")]
    pub uid: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAllResponse {
    #[prost(message, repeated, tag = "1")]
    pub tasks: Vec<Task>,
}
