//! Extractors whose rejections render as [`AppError`] JSON bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with malformed bodies reported as `BAD_REQUEST`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with unparsable segments reported as `BAD_REQUEST`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `axum::extract::Multipart` with a missing or invalid multipart content
/// type reported as `BAD_REQUEST`.
#[derive(FromRequest)]
#[from_request(rejection(AppError))]
pub struct AppMultipart(pub axum::extract::Multipart);
