//! Request extractors

use axum::extract::FromRequest;

use crate::error::Error;

/// JSON body whose rejections use the crate error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);
